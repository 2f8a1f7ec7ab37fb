// Action registry: mount path -> type-erased handler

use std::collections::HashMap;
use std::sync::Arc;

use super::{Action, ActionHandler};

pub struct ActionRegistry {
    prefix: String,
    handlers: HashMap<String, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    pub fn new(path_prefix: &str) -> Self {
        Self {
            prefix: normalize_prefix(path_prefix),
            handlers: HashMap::new(),
        }
    }

    /// Mount an action at `<prefix>/<NAME>`, replacing any previous one
    pub fn register<A: Action>(&mut self, action: A) {
        let path = self.mount_path(A::NAME);
        self.handlers.insert(path, Arc::new(action));
    }

    /// Exact path match, like a plain mux pattern without trailing slash
    pub fn resolve(&self, path: &str) -> Option<Arc<dyn ActionHandler>> {
        self.handlers.get(path).cloned()
    }

    /// Mounted paths, sorted
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn mount_path(&self, name: &str) -> String {
        format!("{}/{name}", self.prefix)
    }
}

/// "/" -> "", "actions/" -> "/actions"
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
