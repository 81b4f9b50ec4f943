//! Environment-driven configuration for Marquee.
//!
//! Centralizes setting names, defaults and validation so the shell binary
//! and any embedding application share one source of truth. Settings come
//! from `MARQUEE_*` environment variables after a best-effort `.env` load;
//! the [`MarqueeConfig::from_lookup`] seam keeps tests independent of the
//! process environment.

use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Default base URL of the hosted catalog API.
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Default base URL of the catalog's image host.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

const DEFAULT_TRENDING_LIMIT: usize = 5;
const DEFAULT_QUIET_WINDOW_MS: u64 = 500;
const DEFAULT_SEARCH_PAGE: u32 = 1;

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Catalog service connection settings.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Bearer credential sent with every catalog request.
    pub api_token: String,
    pub image_base_url: String,
}

/// Counter store connection settings. Without a base URL and key the
/// session falls back to in-process counters.
#[derive(Debug, Clone)]
pub struct TrendingConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    /// Entries fetched for the startup trending listing.
    pub limit: usize,
}

/// Search path tunables.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Inactivity period before raw input commits as a query.
    pub quiet_window_ms: u64,
    /// Result page requested from the catalog.
    pub page: u32,
}

/// Complete Marquee configuration.
#[derive(Debug, Clone)]
pub struct MarqueeConfig {
    pub catalog: CatalogConfig,
    pub trending: TrendingConfig,
    pub search: SearchConfig,
}

impl MarqueeConfig {
    /// Loads from the process environment after a best-effort `.env` read.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_token = required(&lookup, "MARQUEE_TMDB_API_TOKEN")?;
        let base_url = base_url_or(&lookup, "MARQUEE_CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL)?;
        let image_base_url =
            base_url_or(&lookup, "MARQUEE_IMAGE_BASE_URL", DEFAULT_IMAGE_BASE_URL)?;

        let trending_base_url = optional_base_url(&lookup, "MARQUEE_TRENDING_BASE_URL")?;
        let trending_api_key = non_empty(lookup("MARQUEE_TRENDING_API_KEY"));
        let limit = parsed_or(&lookup, "MARQUEE_TRENDING_LIMIT", DEFAULT_TRENDING_LIMIT)?;
        if limit == 0 {
            return Err(ConfigError::Invalid {
                key: "MARQUEE_TRENDING_LIMIT",
                reason: "must be at least 1".to_string(),
            });
        }

        let quiet_window_ms = parsed_or(&lookup, "MARQUEE_QUIET_WINDOW_MS", DEFAULT_QUIET_WINDOW_MS)?;
        if quiet_window_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "MARQUEE_QUIET_WINDOW_MS",
                reason: "must be at least 1".to_string(),
            });
        }

        let page = parsed_or(&lookup, "MARQUEE_SEARCH_PAGE", DEFAULT_SEARCH_PAGE)?;
        if page == 0 {
            return Err(ConfigError::Invalid {
                key: "MARQUEE_SEARCH_PAGE",
                reason: "catalog pages start at 1".to_string(),
            });
        }

        Ok(MarqueeConfig {
            catalog: CatalogConfig {
                base_url,
                api_token,
                image_base_url,
            },
            trending: TrendingConfig {
                base_url: trending_base_url,
                api_key: trending_api_key,
                limit,
            },
            search: SearchConfig {
                quiet_window_ms,
                page,
            },
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    non_empty(lookup(key)).ok_or(ConfigError::Missing(key))
}

fn parsed_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup(key)) {
        Some(raw) => raw.parse::<T>().map_err(|err| ConfigError::Invalid {
            key,
            reason: err.to_string(),
        }),
        None => Ok(default),
    }
}

fn validate_base_url(key: &'static str, raw: String) -> Result<String, ConfigError> {
    Url::parse(&raw).map_err(|err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
    })?;
    Ok(raw.trim_end_matches('/').to_string())
}

fn base_url_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<String, ConfigError> {
    let raw = non_empty(lookup(key)).unwrap_or_else(|| default.to_string());
    validate_base_url(key, raw)
}

fn optional_base_url(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<String>, ConfigError> {
    non_empty(lookup(key))
        .map(|raw| validate_base_url(key, raw))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn token_alone_yields_defaults() {
        let config = MarqueeConfig::from_lookup(env(&[("MARQUEE_TMDB_API_TOKEN", "token")]))
            .expect("valid config");
        assert_eq!(config.catalog.base_url, DEFAULT_CATALOG_BASE_URL);
        assert_eq!(config.catalog.image_base_url, DEFAULT_IMAGE_BASE_URL);
        assert_eq!(config.trending.base_url, None);
        assert_eq!(config.trending.limit, 5);
        assert_eq!(config.search.quiet_window_ms, 500);
        assert_eq!(config.search.page, 1);
    }

    #[test]
    fn missing_token_is_rejected() {
        let error = MarqueeConfig::from_lookup(env(&[])).expect_err("must fail");
        assert!(matches!(error, ConfigError::Missing("MARQUEE_TMDB_API_TOKEN")));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let error = MarqueeConfig::from_lookup(env(&[("MARQUEE_TMDB_API_TOKEN", "   ")]))
            .expect_err("must fail");
        assert!(matches!(error, ConfigError::Missing(_)));
    }

    #[test]
    fn overrides_are_parsed_and_trailing_slashes_trimmed() {
        let config = MarqueeConfig::from_lookup(env(&[
            ("MARQUEE_TMDB_API_TOKEN", "token"),
            ("MARQUEE_CATALOG_BASE_URL", "https://catalog.example/v3/"),
            ("MARQUEE_TRENDING_BASE_URL", "https://counters.example/"),
            ("MARQUEE_TRENDING_API_KEY", "key"),
            ("MARQUEE_TRENDING_LIMIT", "10"),
            ("MARQUEE_QUIET_WINDOW_MS", "250"),
            ("MARQUEE_SEARCH_PAGE", "2"),
        ]))
        .expect("valid config");
        assert_eq!(config.catalog.base_url, "https://catalog.example/v3");
        assert_eq!(
            config.trending.base_url.as_deref(),
            Some("https://counters.example")
        );
        assert_eq!(config.trending.limit, 10);
        assert_eq!(config.search.quiet_window_ms, 250);
        assert_eq!(config.search.page, 2);
    }

    #[test]
    fn unparsable_or_zero_values_are_rejected() {
        let unparsable = MarqueeConfig::from_lookup(env(&[
            ("MARQUEE_TMDB_API_TOKEN", "token"),
            ("MARQUEE_TRENDING_LIMIT", "lots"),
        ]));
        assert!(matches!(
            unparsable,
            Err(ConfigError::Invalid {
                key: "MARQUEE_TRENDING_LIMIT",
                ..
            })
        ));

        let zero = MarqueeConfig::from_lookup(env(&[
            ("MARQUEE_TMDB_API_TOKEN", "token"),
            ("MARQUEE_QUIET_WINDOW_MS", "0"),
        ]));
        assert!(matches!(
            zero,
            Err(ConfigError::Invalid {
                key: "MARQUEE_QUIET_WINDOW_MS",
                ..
            })
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let error = MarqueeConfig::from_lookup(env(&[
            ("MARQUEE_TMDB_API_TOKEN", "token"),
            ("MARQUEE_CATALOG_BASE_URL", "not a url"),
        ]))
        .expect_err("must fail");
        assert!(matches!(
            error,
            ConfigError::Invalid {
                key: "MARQUEE_CATALOG_BASE_URL",
                ..
            }
        ));
    }
}
