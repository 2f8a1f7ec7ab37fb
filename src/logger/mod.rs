//! Logger module
//!
//! Provides logging utilities for the action server including:
//! - Subscriber setup (text or JSON, filter from `RUST_LOG` or config)
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};

/// Target used for access log lines so they can be filtered separately
pub const ACCESS_TARGET: &str = "access";

/// Initialize the global subscriber
///
/// Should be called once at application startup. `RUST_LOG` overrides
/// `logging.level` when set.
pub fn init(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    // A second init (tests, embedding) keeps the first subscriber
    let result = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .try_init(),
    };
    if let Err(e) = result {
        tracing::debug!("logger already initialized: {e}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, routes: &[&str]) {
    tracing::info!("Action server listening on http://{addr}");
    for route in routes {
        tracing::info!("  - POST http://{addr}{route}");
    }
    if config.health.enabled {
        tracing::info!("  - GET  http://{addr}{}", config.health.liveness_path);
    }
    tracing::info!(
        payload = ?config.action.payload,
        max_body_size = config.http.max_body_size,
        max_connections = ?config.performance.max_connections,
        "Loaded configuration"
    );
}

pub fn log_workers(workers: Option<usize>) {
    match workers {
        Some(n) => tracing::info!("Using {n} worker threads"),
        None => tracing::info!("Using default worker threads (CPU cores)"),
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("Accepted connection from {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Server could not start; the process is about to exit
pub fn log_fatal(err: &dyn std::error::Error) {
    tracing::error!("Fatal: {err}");
}

pub fn log_action_failed(action: &str, err: &crate::error::ActionError) {
    tracing::warn!(action, status = err.status().as_u16(), "Action request failed: {err}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

pub fn log_shutdown_requested(signal: &str) {
    tracing::info!("{signal} received, stopping listener");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("All connections closed, shutdown complete");
    } else {
        tracing::warn!("Shutdown timeout reached with {remaining} connections still open");
    }
}
