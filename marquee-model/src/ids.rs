use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable movie identifier assigned by the catalog service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl MovieId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for trending counter records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrendingEntryId(pub Uuid);

impl Default for TrendingEntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl TrendingEntryId {
    pub fn new() -> Self {
        TrendingEntryId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<Uuid> for TrendingEntryId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TrendingEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
