// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Model artifact configuration
///
/// The four files mirror the four fitted artifacts exported from training.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Directory holding the artifact files
    pub dir: String,
    #[serde(default = "default_model_file")]
    pub model_file: String,
    #[serde(default = "default_power_transformer_file")]
    pub power_transformer_file: String,
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,
    #[serde(default = "default_label_encoders_file")]
    pub label_encoders_file: String,
}

fn default_model_file() -> String {
    "model.json".to_string()
}

fn default_power_transformer_file() -> String {
    "power_transformer.json".to_string()
}

fn default_scaler_file() -> String {
    "scaler.json".to_string()
}

fn default_label_encoders_file() -> String {
    "label_encoders.json".to_string()
}

impl ModelConfig {
    /// Config with the default file names inside `dir`.
    pub fn with_dir(dir: &str) -> Self {
        Self {
            dir: dir.to_string(),
            model_file: default_model_file(),
            power_transformer_file: default_power_transformer_file(),
            scaler_file: default_scaler_file(),
            label_encoders_file: default_label_encoders_file(),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.model_file)
    }

    pub fn power_transformer_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.power_transformer_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.scaler_file)
    }

    pub fn label_encoders_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.label_encoders_file)
    }
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RoutesConfig {
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable the health check endpoint
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Health probe path (default: /health)
    #[serde(default = "default_health_path")]
    pub path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_path() -> String {
    "/health".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            path: default_health_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}
