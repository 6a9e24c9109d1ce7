//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and shutdown.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: algoviz_core::ConfigError,
    },

    /// The API server could not be started.
    #[error("startup error: {source}")]
    Startup {
        /// The underlying startup error.
        #[from]
        source: algoviz_server::StartupError,
    },

    /// The server task panicked or was cancelled.
    #[error("server task failed: {source}")]
    ServerTask {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}
