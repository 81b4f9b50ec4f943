use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug)]
pub enum ModelError {
    /// A trending entry cannot be keyed by a term that normalizes to nothing.
    EmptyTerm,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyTerm => write!(f, "search term is empty after normalization"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
