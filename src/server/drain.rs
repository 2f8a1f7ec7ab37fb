// Connection draining on shutdown

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Interval between counter checks while draining
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Wait until no connection is active or `timeout` elapses.
///
/// Returns the number of connections still open when it gave up
/// (0 when every connection finished).
pub async fn wait_for_connections(conn_counter: &AtomicUsize, timeout: Duration) -> usize {
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let active = conn_counter.load(Ordering::SeqCst);
        if active == 0 || tokio::time::Instant::now() >= deadline {
            return active;
        }
        tokio::select! {
            () = tokio::time::sleep(POLL_INTERVAL) => {}
            () = tokio::time::sleep_until(deadline) => {}
        }
    }
}
