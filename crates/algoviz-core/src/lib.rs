//! Instrumented algorithms and their execution contract.
//!
//! Every algorithm runs on a private copy of its input and narrates what it
//! does into a [`StepTracker`]: a data snapshot per step plus the comparisons,
//! operations and notes attached to it. Callers resolve algorithms by id
//! through the [`AlgorithmRegistry`].
//!
//! # Modules
//!
//! - [`algorithm`] -- The [`Algorithm`] trait, family traits and shared
//!   validation helpers.
//! - [`comparator`] -- Total ordering over heterogeneous elements.
//! - [`config`] -- Configuration loading from `algoviz-config.yaml` into
//!   strongly-typed structs.
//! - [`error`] -- [`AlgorithmError`].
//! - [`graph`] -- Graph normalization, traversals, shortest paths, spanning
//!   trees and topological sort.
//! - [`registry`] -- [`AlgorithmRegistry`] and [`build_registry`].
//! - [`searching`] -- Linear, binary and hash search.
//! - [`sorting`] -- Seven comparison sorts.
//! - [`tracker`] -- [`StepTracker`] and step handles.
//!
//! [`Algorithm`]: algorithm::Algorithm
//! [`AlgorithmError`]: error::AlgorithmError
//! [`AlgorithmRegistry`]: registry::AlgorithmRegistry
//! [`build_registry`]: registry::build_registry
//! [`StepTracker`]: tracker::StepTracker

pub mod algorithm;
pub mod comparator;
pub mod config;
pub mod error;
pub mod graph;
pub mod registry;
pub mod searching;
pub mod sorting;
pub mod tracker;

pub use algorithm::{
    Algorithm, Capability, GraphAlgorithm, Parameters, SearchingAlgorithm, SortingAlgorithm,
};
pub use config::{AppConfig, ConfigError};
pub use error::AlgorithmError;
pub use registry::{AlgorithmRegistry, build_registry};
pub use tracker::{StepHandle, StepTracker};
