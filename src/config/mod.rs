// Configuration module entry point
// Manages application configuration and shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, LoggingConfig, ModelConfig, PerformanceConfig, RoutesConfig,
    ServerConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("PREDICTOR"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("model.dir", "artifacts")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "casualty-predictor/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 65_536)? // prediction bodies are small
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let config = Config::load_from("does-not-exist").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.model.dir, "artifacts");
        assert_eq!(config.model.model_file, "model.json");
        assert!(config.routes.health.enabled);
        assert_eq!(config.http.max_body_size, 65_536);
    }

    #[test]
    fn socket_addr_parses() {
        let config = Config::load_from("does-not-exist").unwrap();
        let addr = config.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }
}
