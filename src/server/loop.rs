// Server loop module
// Accepts connections until shutdown is requested, then drains

use hyper_util::server::graceful::GracefulShutdown;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::time::Instant;

use super::connection::accept_connection;
use super::drain::wait_for_connections;
use crate::config::AppState;
use crate::logger;

/// Accept loop for the action listener.
///
/// Returns once `shutdown` is notified and open connections have closed
/// or `server.shutdown_timeout` has elapsed. Idle keep-alive connections
/// are closed as soon as shutdown starts.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) {
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, &graceful);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    // Stop accepting before waiting on in-flight requests
    drop(listener);

    let timeout = Duration::from_secs(state.config.server.shutdown_timeout);
    let deadline = Instant::now() + timeout;
    if tokio::time::timeout(timeout, graceful.shutdown()).await.is_err() {
        logger::log_warning("Shutdown timeout reached with requests still in flight");
    }

    // Connection tasks decrement the counter just after their watcher ends
    let remaining =
        wait_for_connections(&active_connections, deadline.saturating_duration_since(Instant::now()))
            .await;
    logger::log_shutdown_complete(remaining);
}
