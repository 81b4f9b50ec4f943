use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, timeout};

use marquee_core::debounce::spawn_quiet_window;

const WINDOW: Duration = Duration::from_millis(500);

#[tokio::test(start_paused = true)]
async fn rapid_changes_commit_once_with_the_latest_value() {
    let (input_tx, input_rx) = mpsc::channel(16);
    let (committed_tx, mut committed_rx) = mpsc::channel(16);
    let _task = spawn_quiet_window(input_rx, committed_tx, WINDOW);

    // Keystrokes land well inside the quiet window of each other.
    for value in ["b", "ba", "bat", "batman"] {
        input_tx.send(value.to_string()).await.expect("send input");
        time::sleep(Duration::from_millis(100)).await;
    }

    let committed = committed_rx.recv().await.expect("committed value");
    assert_eq!(committed, "batman");

    // Nothing else settles once input stops.
    let silent = timeout(WINDOW * 4, committed_rx.recv()).await;
    assert!(silent.is_err(), "no further commits expected");
}

#[tokio::test(start_paused = true)]
async fn values_separated_by_the_window_commit_separately() {
    let (input_tx, input_rx) = mpsc::channel(16);
    let (committed_tx, mut committed_rx) = mpsc::channel(16);
    let _task = spawn_quiet_window(input_rx, committed_tx, WINDOW);

    input_tx.send("dune".to_string()).await.expect("send input");
    time::sleep(WINDOW + Duration::from_millis(50)).await;
    input_tx
        .send("dune part two".to_string())
        .await
        .expect("send input");

    assert_eq!(committed_rx.recv().await.expect("first commit"), "dune");
    assert_eq!(
        committed_rx.recv().await.expect("second commit"),
        "dune part two"
    );
}

#[tokio::test(start_paused = true)]
async fn no_commit_while_changes_keep_arriving() {
    let (input_tx, input_rx) = mpsc::channel(16);
    let (committed_tx, mut committed_rx) = mpsc::channel(16);
    let _task = spawn_quiet_window(input_rx, committed_tx, WINDOW);

    // Changes arrive faster than the window forever, so nothing commits
    // within this horizon.
    for i in 0..20 {
        input_tx.send(format!("q{i}")).await.expect("send input");
        time::sleep(Duration::from_millis(400)).await;
        assert!(
            committed_rx.try_recv().is_err(),
            "no commit while typing continues"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn pending_value_flushes_when_input_closes() {
    let (input_tx, input_rx) = mpsc::channel(16);
    let (committed_tx, mut committed_rx) = mpsc::channel(16);
    let _task = spawn_quiet_window(input_rx, committed_tx, WINDOW);

    input_tx
        .send("interstellar".to_string())
        .await
        .expect("send input");
    drop(input_tx);

    assert_eq!(
        committed_rx.recv().await.expect("flushed value"),
        "interstellar"
    );
    assert!(committed_rx.recv().await.is_none(), "debouncer shut down");
}
