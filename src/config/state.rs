// Application state module
// Shared, read-only state handed to every connection

use super::types::Config;
use crate::action::ActionRegistry;

/// Application state
pub struct AppState {
    pub config: Config,
    pub actions: ActionRegistry,
}

impl AppState {
    pub fn new(config: &Config, actions: ActionRegistry) -> Self {
        Self {
            config: config.clone(),
            actions,
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
