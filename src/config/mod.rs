// Configuration module entry point
// Loads layered configuration and holds shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    ActionConfig, Config, HealthConfig, HttpConfig, LogFormat, LoggingConfig, PayloadMode,
    PerformanceConfig, ServerConfig,
};

/// Default config file (resolved as `config.toml`, `config.json`, ...)
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Environment variable prefix, e.g. `ACTION__SERVER__PORT=9000`
const ENV_PREFIX: &str = "ACTION";

/// `ACTION__SECTION__KEY` variables
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error; defaults and environment apply.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_layers(config_path, environment())
    }

    /// File, then environment on top, then defaults for anything unset
    fn load_layers(
        config_path: &str,
        env: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(env)
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.shutdown_timeout", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "action-server")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .set_default("action.payload", "raw")?
            .set_default("action.path_prefix", "/")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ServerError::Address { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let cfg = Config::load_from("definitely-missing-config-file").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert_eq!(cfg.action.payload, PayloadMode::Raw);
        assert_eq!(cfg.action.path_prefix, "/");
        assert_eq!(cfg.http.max_body_size, 1_048_576);
        assert!(cfg.health.enabled);
        assert_eq!(cfg.health.liveness_path, "/healthz");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[action]
payload = "hasura"
path_prefix = "/actions"

[health]
enabled = false
"#,
        )
        .unwrap();

        let base = dir.path().join("custom");
        let cfg = Config::load_from(base.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.action.payload, PayloadMode::Hasura);
        assert_eq!(cfg.action.path_prefix, "/actions");
        assert!(!cfg.health.enabled);
    }

    #[test]
    fn test_environment_overrides_file_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("env.toml"), "[server]\nport = 9090\n").unwrap();
        let base = dir.path().join("env");

        // Injected instead of set on the process so parallel tests keep defaults
        let vars: config::Map<String, String> = [
            ("ACTION__SERVER__PORT", "9000"),
            ("ACTION__HTTP__MAX_BODY_SIZE", "2048"),
            ("OTHER__SERVER__PORT", "1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let cfg =
            Config::load_layers(base.to_str().unwrap(), environment().source(Some(vars))).unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.http.max_body_size, 2048);
        assert_eq!(cfg.server.host, "0.0.0.0");

        let cfg = Config::load_layers(
            base.to_str().unwrap(),
            environment().source(Some(config::Map::new())),
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.http.max_body_size, 1_048_576);
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::load_from("definitely-missing-config-file").unwrap();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 3000;
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "127.0.0.1:3000");

        cfg.server.host = "not a host".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::Address { .. })
        ));
    }
}
