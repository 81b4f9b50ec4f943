//! Terminal presentation adapter for the Marquee search core.
//!
//! Reads raw input lines from stdin, feeds them to the session as
//! pre-debounce input changes, and prints every state transition the core
//! publishes. All rendering decisions live here; the core only exposes its
//! observable surface.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use marquee_config::MarqueeConfig;
use marquee_core::catalog::{CatalogClient, TmdbCatalog};
use marquee_core::session::{SearchSession, SessionOptions};
use marquee_core::trending::{HttpTrendingStore, MemoryTrendingStore, TrendingStore};
use marquee_model::{RequestState, TrendingState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = MarqueeConfig::load().context("loading configuration")?;

    let catalog: Arc<dyn CatalogClient> = Arc::new(TmdbCatalog::new(
        config.catalog.base_url.clone(),
        config.catalog.api_token.clone(),
    ));
    let store: Arc<dyn TrendingStore> =
        match (&config.trending.base_url, &config.trending.api_key) {
            (Some(base_url), Some(api_key)) => {
                Arc::new(HttpTrendingStore::new(base_url.clone(), api_key.clone()))
            }
            _ => {
                tracing::info!("no trending store configured, counters stay in-process");
                Arc::new(MemoryTrendingStore::new())
            }
        };

    let session = SearchSession::start(
        catalog,
        store,
        SessionOptions {
            quiet_window: Duration::from_millis(config.search.quiet_window_ms),
            trending_limit: config.trending.limit,
            page: config.search.page,
        },
    );

    let mut state = session.state();
    let mut trending = session.trending();
    let printer = tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = state.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    print_state(&state.borrow());
                }
                changed = trending.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    print_trending(&trending.borrow());
                }
            }
        }
    });

    println!("type to search, enter an empty line for the popular listing, ctrl-d to quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        session.set_input(line).await;
    }

    drop(session);
    let _ = printer.await;
    Ok(())
}

fn print_state(state: &RequestState) {
    match state {
        RequestState::Idle => {}
        RequestState::Loading => println!("searching..."),
        RequestState::Success(results) if results.is_empty() => println!("no movies found"),
        RequestState::Success(results) => {
            println!("-- movies --");
            for movie in results {
                println!(
                    "  {} ({})",
                    movie.title,
                    movie.release_date.as_deref().unwrap_or("unreleased")
                );
            }
        }
        RequestState::Error(message) => println!("! {message}"),
    }
}

fn print_trending(trending: &TrendingState) {
    match trending {
        TrendingState::Loading => {}
        TrendingState::Ready(entries) if entries.is_empty() => println!("no trending movies yet"),
        TrendingState::Ready(entries) => {
            println!("-- trending --");
            for (index, entry) in entries.iter().enumerate() {
                println!(
                    "  {}. {} ({} searches)",
                    index + 1,
                    entry.title,
                    entry.count
                );
            }
        }
        TrendingState::Unavailable(message) => println!("! {message}"),
    }
}
