use crate::movie::MovieSummary;

/// Lifecycle of one catalog request cycle, consumed by the presentation
/// layer through a watch channel.
///
/// Exactly one value is live at a time; each orchestrator outcome replaces
/// the previous value atomically. `Success` with an empty result set is the
/// "no movies found" condition, which is distinct from `Error`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(Vec<MovieSummary>),
    Error(String),
}

impl RequestState {
    /// Well-formed response that surfaced zero results.
    pub fn is_empty_success(&self) -> bool {
        matches!(self, RequestState::Success(results) if results.is_empty())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }
}
