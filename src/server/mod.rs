// Server module entry
// Binds the listener, wires state and signals, runs the accept loop

pub mod connection;
pub mod drain;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module gets another name
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

pub use listener::create_reusable_listener;
pub use server_loop::start_server_loop;

use crate::action;
use crate::config::{AppState, Config};
use crate::error::ServerError;
use crate::logger;
use signal::{start_signal_handler, SignalHandler};

/// Run the action server until SIGTERM/SIGINT
pub async fn run(config: &Config) -> Result<(), ServerError> {
    let addr = config.get_socket_addr()?;
    let listener = create_reusable_listener(addr)?;

    let actions = action::default_registry(&config.action.path_prefix);
    logger::log_server_start(&addr, config, &actions.paths());

    let state = Arc::new(AppState::new(config, actions));
    let signals = Arc::new(SignalHandler::new());
    start_signal_handler(Arc::clone(&signals));

    start_server_loop(
        listener,
        state,
        Arc::new(AtomicUsize::new(0)),
        Arc::clone(&signals.shutdown),
    )
    .await;

    Ok(())
}
