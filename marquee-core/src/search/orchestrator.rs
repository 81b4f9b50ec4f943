use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use marquee_model::{MovieSummary, RequestState};

use crate::catalog::CatalogClient;
use crate::error::CatalogError;
use crate::trending::{TrendingAggregator, TrendingStore};

/// Fixed message for a catalog response with a non-success status.
pub const FETCH_FAILED_MESSAGE: &str = "failed to fetch movies";

/// Generic message for transport and decode failures.
pub const RETRY_LATER_MESSAGE: &str = "error fetching movies, please try again later";

struct FetchOutcome {
    generation: u64,
    query: String,
    result: Result<Vec<MovieSummary>, CatalogError>,
}

/// Spawns the orchestrator task: one `Loading -> (Success | Error)`
/// transition sequence per committed query, published on `state`.
///
/// Every issued request carries a generation number; only the outcome of
/// the most recently issued request may set the state, so an older
/// in-flight response that resolves late is dropped instead of applied out
/// of order. Trending hits are recorded for every successful non-empty
/// search response, stale or not, and never block a state transition.
pub(crate) fn spawn_orchestrator(
    catalog: Arc<dyn CatalogClient>,
    aggregator: TrendingAggregator<dyn TrendingStore>,
    mut committed: mpsc::Receiver<String>,
    state: watch::Sender<RequestState>,
    page: u32,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<FetchOutcome>(8);
        let mut generation: u64 = 0;

        loop {
            tokio::select! {
                next = committed.recv() => {
                    let Some(query) = next else { break };
                    generation += 1;
                    state.send_replace(RequestState::Loading);
                    issue_fetch(
                        Arc::clone(&catalog),
                        outcome_tx.clone(),
                        generation,
                        query,
                        page,
                    );
                }
                Some(outcome) = outcome_rx.recv() => {
                    // The count still lands even when the response itself
                    // has been superseded.
                    if let Ok(results) = &outcome.result {
                        maybe_record_hit(&aggregator, &outcome.query, results.first());
                    }
                    if outcome.generation != generation {
                        tracing::debug!(
                            stale = outcome.generation,
                            current = generation,
                            query = %outcome.query,
                            "dropping stale catalog response"
                        );
                        continue;
                    }
                    apply_outcome(&state, outcome);
                }
            }
        }
    })
}

fn issue_fetch(
    catalog: Arc<dyn CatalogClient>,
    outcome_tx: mpsc::Sender<FetchOutcome>,
    generation: u64,
    query: String,
    page: u32,
) {
    tokio::spawn(async move {
        let result = if query.is_empty() {
            catalog.discover_popular().await
        } else {
            catalog.search(&query, page).await
        };
        let _ = outcome_tx
            .send(FetchOutcome {
                generation,
                query,
                result,
            })
            .await;
    });
}

/// Fire-and-forget hit recording; a failure is logged and never alters
/// the request state.
fn maybe_record_hit(
    aggregator: &TrendingAggregator<dyn TrendingStore>,
    query: &str,
    top_result: Option<&MovieSummary>,
) {
    if query.is_empty() {
        return;
    }
    let Some(top) = top_result.cloned() else {
        return;
    };
    let aggregator = aggregator.clone();
    let query = query.to_string();
    tokio::spawn(async move {
        if let Err(error) = aggregator.record_hit(&query, &top).await {
            tracing::warn!(%error, query, "failed to record trending hit");
        }
    });
}

fn apply_outcome(state: &watch::Sender<RequestState>, outcome: FetchOutcome) {
    match outcome.result {
        Ok(results) => {
            state.send_replace(RequestState::Success(results));
        }
        Err(CatalogError::Api(status)) => {
            tracing::warn!(%status, query = %outcome.query, "catalog rejected request");
            state.send_replace(RequestState::Error(FETCH_FAILED_MESSAGE.to_string()));
        }
        Err(error) => {
            tracing::warn!(%error, query = %outcome.query, "catalog request failed");
            state.send_replace(RequestState::Error(RETRY_LATER_MESSAGE.to_string()));
        }
    }
}
