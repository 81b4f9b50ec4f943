//! Read-only access to the movie catalog service.

mod tmdb;

pub use tmdb::{TMDB_API_BASE, TmdbCatalog};

use async_trait::async_trait;
use marquee_model::MovieSummary;

use crate::error::CatalogError;

/// Seam between the orchestrator and the catalog service.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Title search, most relevant result first.
    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieSummary>, CatalogError>;

    /// Default listing ordered by popularity descending.
    async fn discover_popular(&self) -> Result<Vec<MovieSummary>, CatalogError>;
}
