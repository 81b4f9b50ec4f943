//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod movie;
pub mod state;
pub mod term;
pub mod trending;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{MovieId, TrendingEntryId};
pub use movie::{MovieSummary, PosterSize};
pub use state::RequestState;
pub use term::SearchTerm;
pub use trending::{TrendingEntry, TrendingState};
