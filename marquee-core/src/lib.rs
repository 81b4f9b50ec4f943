//! # Marquee Core
//!
//! Search synchronization and trending aggregation for the Marquee movie
//! client.
//!
//! ## Overview
//!
//! `marquee-core` turns raw per-keystroke input into catalog queries and
//! observable state:
//!
//! - **Quiet-window debouncing**: input changes settle into a committed
//!   query only after a configurable period of inactivity
//! - **Catalog orchestration**: one request cycle per committed query,
//!   published as `Idle -> Loading -> Success | Error` transitions, with
//!   stale in-flight responses dropped instead of applied out of order
//! - **Trending aggregation**: successful non-empty searches record a hit
//!   against the top result in a shared counter store; the ranked top-N
//!   listing loads independently at session start
//!
//! ## Architecture
//!
//! - [`debounce`]: the timing primitive
//! - [`catalog`]: the read-only catalog client seam and its HTTP
//!   implementation
//! - [`trending`]: the counter-store seam, aggregator, and the HTTP and
//!   in-memory stores
//! - [`search`]: the request orchestrator
//! - [`session`]: the per-session controller exposing the presentation
//!   boundary (input setter plus two watch receivers)

pub mod catalog;
pub mod debounce;
pub mod error;
pub mod search;
pub mod session;
pub mod trending;

// Intentionally curated re-exports for downstream consumers.
pub use catalog::{CatalogClient, TmdbCatalog};
pub use error::{CatalogError, TrendingStoreError};
pub use search::{FETCH_FAILED_MESSAGE, RETRY_LATER_MESSAGE};
pub use session::{SearchSession, SessionOptions};
pub use trending::{
    HttpTrendingStore, MemoryTrendingStore, TRENDING_UNAVAILABLE_MESSAGE,
    TrendingAggregator, TrendingStore,
};
