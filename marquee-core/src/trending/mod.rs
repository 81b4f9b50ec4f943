//! Trending aggregation over a shared counter store.

mod http;
mod memory;

pub use http::HttpTrendingStore;
pub use memory::MemoryTrendingStore;

use std::sync::Arc;

use async_trait::async_trait;

use marquee_model::{MovieSummary, SearchTerm, TrendingEntry, TrendingEntryId};

use crate::error::TrendingStoreError;

/// User-facing message when the counter store cannot produce a listing.
pub const TRENDING_UNAVAILABLE_MESSAGE: &str =
    "error fetching trending movies, please try again later";

/// Persistent hit-counter store shared by every client instance.
///
/// The store owns atomicity of `increment`: implementations must not lose
/// updates under concurrent writers for the same term.
#[async_trait]
pub trait TrendingStore: Send + Sync {
    async fn find_by_term(
        &self,
        term: &SearchTerm,
    ) -> Result<Option<TrendingEntry>, TrendingStoreError>;

    /// Creates the entry for a term's first hit, count 1, bound to the
    /// representative movie.
    async fn create(
        &self,
        term: SearchTerm,
        representative: &MovieSummary,
    ) -> Result<TrendingEntry, TrendingStoreError>;

    /// Atomically bumps the hit count of an existing entry.
    async fn increment(&self, id: TrendingEntryId) -> Result<TrendingEntry, TrendingStoreError>;

    /// Top `limit` entries, count descending, ties broken by most recent
    /// update. An empty store yields an empty sequence, not an error.
    async fn list_top_n(&self, limit: usize) -> Result<Vec<TrendingEntry>, TrendingStoreError>;
}

/// Records search hits and reads the ranked trending listing.
pub struct TrendingAggregator<S: TrendingStore + ?Sized> {
    store: Arc<S>,
}

impl<S: TrendingStore + ?Sized> Clone for TrendingAggregator<S> {
    fn clone(&self) -> Self {
        TrendingAggregator {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TrendingStore + ?Sized> std::fmt::Debug for TrendingAggregator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendingAggregator").finish_non_exhaustive()
    }
}

impl<S: TrendingStore + ?Sized> TrendingAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        TrendingAggregator { store }
    }

    /// Records one hit for `query` against its top result.
    ///
    /// Every call is a genuine increment; there is no dedup. Queries that
    /// normalize to an empty term are dropped without touching the store.
    /// The representative movie only matters on the first hit for a term;
    /// later hits never overwrite it.
    pub async fn record_hit(
        &self,
        query: &str,
        representative: &MovieSummary,
    ) -> Result<(), TrendingStoreError> {
        let term = SearchTerm::normalize(query);
        if term.is_empty() {
            return Ok(());
        }
        match self.store.find_by_term(&term).await? {
            Some(entry) => {
                self.store.increment(entry.id).await?;
            }
            None => {
                self.store.create(term, representative).await?;
            }
        }
        Ok(())
    }

    /// Current top `limit` trending entries.
    pub async fn list_trending(
        &self,
        limit: usize,
    ) -> Result<Vec<TrendingEntry>, TrendingStoreError> {
        self.store.list_top_n(limit).await
    }
}
