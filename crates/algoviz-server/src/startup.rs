//! Server startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_server`] which launches the HTTP server on a background
//! Tokio task so the engine can run its session sweeper alongside it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use algoviz_server::startup::spawn_server;
//! use algoviz_server::{AppState, ServerConfig};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::default());
//! let handle = spawn_server(ServerConfig::default(), state)?;
//! handle.await?;
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the HTTP server on a background Tokio task.
///
/// The server runs until the runtime shuts down or the task is aborted.
/// Bind and serve failures inside the task are logged.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured address does not
/// parse. This is checked before the task is spawned.
pub fn spawn_server(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    let addr = config.socket_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state).await {
            tracing::error!(error = %e, "API server exited with error");
        }
    });

    tracing::info!(%addr, "API server spawned on background task");

    Ok(handle)
}
