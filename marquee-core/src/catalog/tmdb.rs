use async_trait::async_trait;
use reqwest::{Client, header};
use serde::Deserialize;
use url::Url;

use marquee_model::{MovieId, MovieSummary};

use crate::catalog::CatalogClient;
use crate::error::CatalogError;

/// Default base URL of the hosted catalog API.
pub const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";

/// Catalog client for the TMDB-compatible HTTP API.
///
/// Both endpoints carry the bearer credential and expect a JSON body with
/// a `results` array; any non-success status is surfaced as
/// [`CatalogError::Api`] before decoding is attempted.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    http: Client,
    base_url: String,
    api_token: String,
}

impl TmdbCatalog {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_token)
    }

    /// Injects a preconfigured HTTP client (timeouts, proxy settings).
    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        TmdbCatalog {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
        }
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, CatalogError> {
        Url::parse_with_params(&format!("{}/{path}", self.base_url), params)
            .map_err(|err| CatalogError::Decode(format!("invalid catalog url: {err}")))
    }

    async fn fetch(&self, url: Url) -> Result<Vec<MovieSummary>, CatalogError> {
        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::Api(response.status()));
        }

        let page = response.json::<ResultsPage>().await?;
        Ok(page.results.into_iter().map(MovieSummary::from).collect())
    }
}

#[async_trait]
impl CatalogClient for TmdbCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<Vec<MovieSummary>, CatalogError> {
        let url = self.endpoint(
            "search/movie",
            &[("query", query), ("page", &page.to_string())],
        )?;
        self.fetch(url).await
    }

    async fn discover_popular(&self) -> Result<Vec<MovieSummary>, CatalogError> {
        let url = self.endpoint("discover/movie", &[("sort_by", "popularity.desc")])?;
        self.fetch(url).await
    }
}

#[derive(Debug, Deserialize)]
struct ResultsPage {
    #[serde(default)]
    results: Vec<MovieRecord>,
}

#[derive(Debug, Deserialize)]
struct MovieRecord {
    id: u64,
    title: String,
    poster_path: Option<String>,
    #[serde(default)]
    popularity: f64,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
}

impl From<MovieRecord> for MovieSummary {
    fn from(record: MovieRecord) -> Self {
        MovieSummary {
            id: MovieId(record.id),
            title: record.title,
            poster_path: record.poster_path,
            popularity: record.popularity,
            // The catalog sends "" for unreleased titles.
            release_date: record.release_date.filter(|date| !date.is_empty()),
            vote_average: record.vote_average,
        }
    }
}
