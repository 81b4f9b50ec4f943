//! Quiet-window debouncing of raw input values.
//!
//! Converts a rapidly changing input stream into a committed value emitted
//! only after no new change arrived for the configured window. Each arrival
//! restarts the window and supersedes the pending value, so at most one
//! value is emitted per quiet period and it is always the latest one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

/// Quiet window applied when the session is not configured otherwise.
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(500);

/// Spawns the debounce task bridging `input` to `committed`.
///
/// A pending value is flushed when the input side closes; the task ends
/// when either channel is gone. Pure timing primitive, no other side
/// effects.
pub fn spawn_quiet_window(
    mut input: mpsc::Receiver<String>,
    committed: mpsc::Sender<String>,
    window: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(mut pending) = input.recv().await {
            loop {
                tokio::select! {
                    next = input.recv() => match next {
                        Some(value) => pending = value,
                        None => {
                            let _ = committed.send(pending).await;
                            return;
                        }
                    },
                    _ = time::sleep(window) => {
                        if committed.send(pending).await.is_err() {
                            return;
                        }
                        break;
                    }
                }
            }
        }
    })
}
