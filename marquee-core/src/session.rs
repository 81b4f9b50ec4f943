//! Per-session controller wiring the debouncer, orchestrator and
//! trending aggregator together.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use marquee_model::{RequestState, TrendingState};

use crate::catalog::CatalogClient;
use crate::debounce::{DEFAULT_QUIET_WINDOW, spawn_quiet_window};
use crate::search::spawn_orchestrator;
use crate::trending::{TRENDING_UNAVAILABLE_MESSAGE, TrendingAggregator, TrendingStore};

/// Tunables for one search session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Inactivity period before raw input commits as a query.
    pub quiet_window: Duration,
    /// Number of trending entries fetched at startup.
    pub trending_limit: usize,
    /// Result page requested from the catalog.
    pub page: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            quiet_window: DEFAULT_QUIET_WINDOW,
            trending_limit: 5,
            page: 1,
        }
    }
}

/// The single owning controller for one search session.
///
/// Constructed once per session and torn down on drop. Exposes exactly
/// three things to the presentation layer: a setter for the raw
/// pre-debounce input, the current [`RequestState`], and the current
/// [`TrendingState`]. The two state slices are independent; one failing
/// never corrupts the other.
#[derive(Debug)]
pub struct SearchSession {
    input: mpsc::Sender<String>,
    state: watch::Receiver<RequestState>,
    trending: watch::Receiver<TrendingState>,
    tasks: Vec<JoinHandle<()>>,
}

impl SearchSession {
    /// Starts the session tasks: debouncer, orchestrator, the startup
    /// trending load, and the initial default-listing fetch (issued
    /// immediately, without waiting out a quiet window).
    pub fn start(
        catalog: Arc<dyn CatalogClient>,
        store: Arc<dyn TrendingStore>,
        options: SessionOptions,
    ) -> Self {
        let (input_tx, input_rx) = mpsc::channel(32);
        let (committed_tx, committed_rx) = mpsc::channel(8);
        let (state_tx, state_rx) = watch::channel(RequestState::Idle);
        let (trending_tx, trending_rx) = watch::channel(TrendingState::Loading);

        let aggregator: TrendingAggregator<dyn TrendingStore> = TrendingAggregator::new(store);

        let debouncer = spawn_quiet_window(input_rx, committed_tx.clone(), options.quiet_window);
        let orchestrator = spawn_orchestrator(
            catalog,
            aggregator.clone(),
            committed_rx,
            state_tx,
            options.page,
        );

        let startup_fetch = tokio::spawn(async move {
            let _ = committed_tx.send(String::new()).await;
        });

        let limit = options.trending_limit;
        let trending_load = tokio::spawn(async move {
            match aggregator.list_trending(limit).await {
                Ok(entries) => {
                    let _ = trending_tx.send(TrendingState::Ready(entries));
                }
                Err(error) => {
                    tracing::warn!(%error, "failed to load trending movies");
                    let _ = trending_tx
                        .send(TrendingState::Unavailable(
                            TRENDING_UNAVAILABLE_MESSAGE.to_string(),
                        ));
                }
            }
        });

        tracing::info!(
            quiet_window_ms = options.quiet_window.as_millis() as u64,
            trending_limit = limit,
            "search session started"
        );

        SearchSession {
            input: input_tx,
            state: state_rx,
            trending: trending_rx,
            tasks: vec![debouncer, orchestrator, startup_fetch, trending_load],
        }
    }

    /// Feeds one raw input change into the quiet-window debouncer.
    pub async fn set_input(&self, value: impl Into<String>) {
        let _ = self.input.send(value.into()).await;
    }

    /// Subscription to the request lifecycle of the latest committed query.
    pub fn state(&self) -> watch::Receiver<RequestState> {
        self.state.clone()
    }

    /// Subscription to the trending listing (or its failure).
    pub fn trending(&self) -> watch::Receiver<TrendingState> {
        self.trending.clone()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        // Detached record-hit tasks are deliberately not owned here; a
        // pending count still lands after the session goes away.
        for task in &self.tasks {
            task.abort();
        }
    }
}
