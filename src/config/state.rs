// Application state module
// Read-only state shared by every connection

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::types::Config;
use crate::model::Predictor;

/// Application state
///
/// Built once at startup and never mutated afterwards: the configuration
/// and the loaded model artifacts. Handlers clone the `Arc`, not the data.
pub struct AppState {
    pub config: Config,
    pub predictor: Predictor,

    // Cached config value for fast access on the request path
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: Config, predictor: Predictor) -> Self {
        let cached_access_log = Arc::new(AtomicBool::new(config.logging.access_log));
        Self {
            config,
            predictor,
            cached_access_log,
        }
    }

    /// Lock-free access-log flag check for the request path.
    pub fn access_log_enabled(&self) -> bool {
        self.cached_access_log.load(Ordering::Relaxed)
    }
}
