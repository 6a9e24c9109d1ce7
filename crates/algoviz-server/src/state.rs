//! Shared application state for the API server.
//!
//! [`AppState`] owns the algorithm registry and the three services. It is
//! built once by the engine from [`AppConfig`] and shared with every handler
//! behind an `Arc`.

use std::sync::Arc;

use algoviz_core::{AlgorithmRegistry, AppConfig, build_registry};

use crate::services::{BenchmarkService, DataService, VisualizationService};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every registered algorithm.
    pub registry: Arc<AlgorithmRegistry>,
    /// Visualization sessions.
    pub visualization: VisualizationService,
    /// Benchmark tests.
    pub benchmark: BenchmarkService,
    /// Dataset generation and presets.
    pub data: DataService,
    /// Deployment environment. Any value other than `development` restricts
    /// CORS to `allowed_origins`.
    pub environment: String,
    /// Origins accepted outside development.
    pub allowed_origins: Vec<String>,
}

impl AppState {
    /// Build the services over `registry` using the limits in `config`.
    pub fn new(registry: Arc<AlgorithmRegistry>, config: &AppConfig) -> Self {
        let visualization = VisualizationService::new(
            Arc::clone(&registry),
            config.limits.clone(),
            config.sessions.ttl(),
        );
        let benchmark = BenchmarkService::new(
            Arc::clone(&registry),
            config.benchmark.clone(),
            config.limits.max_data_size,
        );
        let data = DataService::new(config.limits.max_data_size);
        Self {
            registry,
            visualization,
            benchmark,
            data,
            environment: config.server.environment.clone(),
            allowed_origins: config.server.allowed_origins.clone(),
        }
    }

    /// Whether the server runs in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(build_registry()), &AppConfig::default())
    }
}
