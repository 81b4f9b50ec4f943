use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use marquee_model::{MovieSummary, SearchTerm, TrendingEntry, TrendingEntryId};

use crate::error::TrendingStoreError;
use crate::trending::TrendingStore;

/// In-process counter store.
///
/// Counters live in a dashmap keyed by normalized term; create and
/// increment run under the shard write lock, so concurrent hits for one
/// term never lose an update. Used by tests and as a session-local
/// fallback when no hosted store is configured.
#[derive(Debug, Default)]
pub struct MemoryTrendingStore {
    entries: DashMap<SearchTerm, TrendingEntry>,
}

impl MemoryTrendingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrendingStore for MemoryTrendingStore {
    async fn find_by_term(
        &self,
        term: &SearchTerm,
    ) -> Result<Option<TrendingEntry>, TrendingStoreError> {
        Ok(self.entries.get(term).map(|entry| entry.value().clone()))
    }

    async fn create(
        &self,
        term: SearchTerm,
        representative: &MovieSummary,
    ) -> Result<TrendingEntry, TrendingStoreError> {
        match self.entries.entry(term.clone()) {
            // A create that lost the first-hit race counts as a repeat hit.
            Entry::Occupied(mut occupied) => {
                occupied.get_mut().record_repeat();
                Ok(occupied.get().clone())
            }
            Entry::Vacant(vacant) => {
                let entry = TrendingEntry::first_hit(term, representative)
                    .map_err(|err| TrendingStoreError::Malformed(err.to_string()))?;
                vacant.insert(entry.clone());
                Ok(entry)
            }
        }
    }

    async fn increment(&self, id: TrendingEntryId) -> Result<TrendingEntry, TrendingStoreError> {
        match self.entries.iter_mut().find(|entry| entry.value().id == id) {
            Some(mut entry) => {
                entry.value_mut().record_repeat();
                Ok(entry.value().clone())
            }
            None => Err(TrendingStoreError::Malformed(format!(
                "no trending entry with id {id}"
            ))),
        }
    }

    async fn list_top_n(&self, limit: usize) -> Result<Vec<TrendingEntry>, TrendingStoreError> {
        let mut entries: Vec<TrendingEntry> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by(TrendingEntry::rank_order);
        entries.truncate(limit);
        Ok(entries)
    }
}
