use thiserror::Error;

/// Failures reaching or decoding the movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(String),

    #[error("catalog responded with status {0}")]
    Api(reqwest::StatusCode),

    #[error("malformed catalog response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else {
            CatalogError::Network(err.to_string())
        }
    }
}

/// Failures reaching the trending counter store or reading its records.
///
/// Never conflated with an empty-but-successful listing, which is a plain
/// empty `Vec`.
#[derive(Debug, Error)]
pub enum TrendingStoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("store responded with status {0}")]
    Api(reqwest::StatusCode),

    #[error("malformed store record: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for TrendingStoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TrendingStoreError::Malformed(err.to_string())
        } else {
            TrendingStoreError::Network(err.to_string())
        }
    }
}
