//! Catalog query orchestration.

mod orchestrator;

pub use orchestrator::{FETCH_FAILED_MESSAGE, RETRY_LATER_MESSAGE};
pub(crate) use orchestrator::spawn_orchestrator;
