//! Engine binary for the algorithm visualization backend.
//!
//! This is the main entry point that wires together configuration, the
//! algorithm registry, the services and the HTTP API. It runs until the
//! server exits or `Ctrl-C` is received.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `algoviz-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Apply environment overrides and validate
//! 4. Build the algorithm registry
//! 5. Build the services into the shared application state
//! 6. Start the session sweeper
//! 7. Start the API server and wait for shutdown

mod error;
mod sweeper;

use std::path::Path;
use std::sync::Arc;

use algoviz_core::config::LoggingConfig;
use algoviz_core::{AppConfig, build_registry};
use algoviz_server::{AppState, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Configuration file read from the working directory.
const CONFIG_FILE: &str = "algoviz-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the server cannot start,
/// or the server task fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (mut config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("algoviz-engine starting");
    if !from_file {
        info!("Config file not found, using defaults");
    }

    // 3. Environment overrides and validation.
    config.apply_env_overrides();
    config.validate().map_err(EngineError::from)?;
    info!(
        host = config.server.host,
        port = config.server.port,
        environment = config.server.environment,
        max_execution_time_secs = config.limits.max_execution_time_secs,
        max_data_size = config.limits.max_data_size,
        max_concurrent_tests = config.benchmark.max_concurrent_tests,
        "Configuration loaded"
    );

    // 4. Algorithm registry.
    let registry = Arc::new(build_registry());
    info!(algorithm_count = registry.len(), "Algorithm registry built");

    // 5. Services.
    let state = Arc::new(AppState::new(Arc::clone(&registry), &config));

    // 6. Session sweeper.
    let sweeper = sweeper::spawn_session_sweeper(
        state.visualization.clone(),
        config.sessions.sweep_interval(),
    );
    info!(
        ttl_hours = config.sessions.ttl_hours,
        sweep_interval_secs = config.sessions.sweep_interval_secs,
        "Session sweeper started"
    );

    // 7. API server.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let server = algoviz_server::spawn_server(server_config, Arc::clone(&state))
        .map_err(EngineError::from)?;

    tokio::select! {
        joined = server => {
            joined.map_err(EngineError::from)?;
            warn!("API server stopped");
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
        }
    }

    sweeper.abort();
    info!("algoviz-engine stopped");
    Ok(())
}

/// Load configuration from [`CONFIG_FILE`], or defaults when it is absent.
/// The flag reports whether the file was read.
fn load_config() -> Result<(AppConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_FILE);
    if config_path.exists() {
        let config = AppConfig::from_file(config_path)?;
        Ok((config, true))
    } else {
        Ok((AppConfig::default(), false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
