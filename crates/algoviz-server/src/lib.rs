//! HTTP API for the algorithm visualization backend.
//!
//! This crate provides an Axum server that exposes:
//!
//! - **Catalog endpoints** listing the registered algorithms with their
//!   metadata and complexity bounds
//! - **Visualization endpoints** that run an algorithm with step recording
//!   and replay individual steps from the stored session
//! - **Benchmark endpoints** that run background timing tests and compare
//!   them
//! - **Data endpoints** that generate datasets by pattern and serve presets
//!
//! # Architecture
//!
//! Handlers are thin: they validate the request body and call one of the
//! [`services`], which own all state in memory. Algorithms execute on the
//! blocking thread pool under a time budget so a slow run never stalls the
//! async workers.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod services;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use services::ServiceError;
pub use startup::{StartupError, spawn_server};
pub use state::AppState;
