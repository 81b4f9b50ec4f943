use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marquee_model::{MovieId, MovieSummary, SearchTerm, TrendingEntry, TrendingEntryId};

use crate::error::TrendingStoreError;
use crate::trending::TrendingStore;

/// Header carrying the store credential.
const API_KEY_HEADER: &str = "x-api-key";

/// Client for the hosted counter store.
///
/// `increment` maps to a single server-side atomic operation, so concurrent
/// writers from different client instances never lose updates; this client
/// does not read-modify-write counts.
#[derive(Debug, Clone)]
pub struct HttpTrendingStore {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HttpTrendingStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url, api_key)
    }

    /// Injects a preconfigured HTTP client (timeouts, proxy settings).
    pub fn with_client(
        http: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        HttpTrendingStore {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn entries_url(&self) -> String {
        format!("{}/entries", self.base_url)
    }

    async fn decode_entry(
        response: reqwest::Response,
    ) -> Result<TrendingEntry, TrendingStoreError> {
        if !response.status().is_success() {
            return Err(TrendingStoreError::Api(response.status()));
        }
        let record = response.json::<EntryRecord>().await?;
        record.try_into()
    }

    async fn decode_page(
        response: reqwest::Response,
    ) -> Result<Vec<TrendingEntry>, TrendingStoreError> {
        if !response.status().is_success() {
            return Err(TrendingStoreError::Api(response.status()));
        }
        let page = response.json::<EntryPage>().await?;
        page.entries
            .into_iter()
            .map(TrendingEntry::try_from)
            .collect()
    }
}

#[async_trait]
impl TrendingStore for HttpTrendingStore {
    async fn find_by_term(
        &self,
        term: &SearchTerm,
    ) -> Result<Option<TrendingEntry>, TrendingStoreError> {
        let response = self
            .http
            .get(self.entries_url())
            .query(&[("term", term.as_str())])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        let entries = Self::decode_page(response).await?;
        Ok(entries.into_iter().next())
    }

    async fn create(
        &self,
        term: SearchTerm,
        representative: &MovieSummary,
    ) -> Result<TrendingEntry, TrendingStoreError> {
        let body = CreateEntryBody {
            term: term.as_str(),
            movie_id: representative.id.value(),
            title: &representative.title,
            poster_path: representative.poster_path.as_deref(),
        };
        let response = self
            .http
            .post(self.entries_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;
        Self::decode_entry(response).await
    }

    async fn increment(&self, id: TrendingEntryId) -> Result<TrendingEntry, TrendingStoreError> {
        let response = self
            .http
            .post(format!("{}/{id}/increment", self.entries_url()))
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        Self::decode_entry(response).await
    }

    async fn list_top_n(&self, limit: usize) -> Result<Vec<TrendingEntry>, TrendingStoreError> {
        let response = self
            .http
            .get(format!("{}/top", self.entries_url()))
            .query(&[("limit", limit.to_string())])
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        Self::decode_page(response).await
    }
}

#[derive(Debug, Deserialize)]
struct EntryRecord {
    id: Uuid,
    term: String,
    count: u64,
    movie_id: u64,
    title: String,
    poster_path: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct EntryPage {
    #[serde(default)]
    entries: Vec<EntryRecord>,
}

#[derive(Debug, Serialize)]
struct CreateEntryBody<'a> {
    term: &'a str,
    movie_id: u64,
    title: &'a str,
    poster_path: Option<&'a str>,
}

impl TryFrom<EntryRecord> for TrendingEntry {
    type Error = TrendingStoreError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let term = SearchTerm::normalize(&record.term);
        if term.is_empty() {
            return Err(TrendingStoreError::Malformed(format!(
                "entry {} has an empty term",
                record.id
            )));
        }
        Ok(TrendingEntry {
            id: TrendingEntryId(record.id),
            term,
            count: record.count,
            movie_id: MovieId(record.movie_id),
            title: record.title,
            poster_path: record.poster_path,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_store_record() {
        let body = r#"{
            "id": "0192cdb0-9f3c-7d10-bb1a-111111111111",
            "term": "batman",
            "count": 12,
            "movie_id": 268,
            "title": "Batman",
            "poster_path": "/cij4dd21v2Rk2YtUQbV5kW69WB2.jpg",
            "created_at": "2026-08-01T10:00:00Z",
            "updated_at": "2026-08-20T18:30:00Z"
        }"#;

        let record: EntryRecord = serde_json::from_str(body).expect("valid record");
        let entry = TrendingEntry::try_from(record).expect("well-formed entry");
        assert_eq!(entry.term.as_str(), "batman");
        assert_eq!(entry.count, 12);
        assert_eq!(entry.movie_id, MovieId(268));
    }

    #[test]
    fn rejects_records_with_empty_terms() {
        let body = r#"{
            "id": "0192cdb0-9f3c-7d10-bb1a-222222222222",
            "term": "   ",
            "count": 1,
            "movie_id": 1,
            "title": "x",
            "poster_path": null,
            "created_at": "2026-08-01T10:00:00Z",
            "updated_at": "2026-08-01T10:00:00Z"
        }"#;

        let record: EntryRecord = serde_json::from_str(body).expect("valid record");
        assert!(matches!(
            TrendingEntry::try_from(record),
            Err(TrendingStoreError::Malformed(_))
        ));
    }

    #[test]
    fn missing_entries_array_decodes_as_empty() {
        let page: EntryPage = serde_json::from_str("{}").expect("valid page");
        assert!(page.entries.is_empty());
    }
}
