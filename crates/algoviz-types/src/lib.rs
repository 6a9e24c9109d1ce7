//! Shared type definitions for the algorithm visualization backend.
//!
//! This crate is the single source of truth for every payload exchanged
//! between the algorithm core, the HTTP API and the frontend. Types flow
//! downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`element`] -- The closed element variant algorithms compare
//! - [`graph`] -- Graph input model and graph step snapshots
//! - [`step`] -- Visualization steps, comparisons, operations and counters
//! - [`algorithm`] -- Catalog metadata (categories, complexity, parameters)
//! - [`io`] -- Algorithm inputs and typed outputs
//! - [`session`] -- Visualization sessions and execution results
//! - [`benchmark`] -- Benchmark tests, results and comparisons
//! - [`dataset`] -- Generated datasets and presets

pub mod algorithm;
pub mod benchmark;
pub mod dataset;
pub mod element;
pub mod graph;
pub mod io;
pub mod session;
pub mod step;

// Re-export all public types at crate root for convenience.
pub use algorithm::{
    AlgorithmInfo, Category, Complexity, ComplexityBounds, GraphShape, ParameterSpec,
    ParameterType,
};
pub use benchmark::{
    AlgorithmComparison, BenchmarkResult, BenchmarkStatus, BenchmarkTest, ComparisonResult,
    ComparisonSummary, SizeSummary,
};
pub use dataset::{ArrayMetadata, DataPreset, DataType, GeneratedData};
pub use element::{Element, ElementKind};
pub use graph::{Distance, GraphData, GraphEdge, GraphKind, GraphNode, GraphState, WeightedEdge};
pub use io::{
    AlgorithmInput, AlgorithmOutput, PathInfo, SearchOutcome, ShortestPathResult,
    SpanningTreeResult, TopologicalResult, TraversalResult,
};
pub use session::{SessionStatus, VisualizationResult, VisualizationSession};
pub use step::{
    Comparison, ComparisonKind, ExecutionStats, Operation, OperationType, Step, StepData,
    StepMetadata,
};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. The files are written to the
        // `bindings/` directory relative to the crate root.
        use ts_rs::TS;

        // Elements and graphs
        let _ = crate::element::Element::export_all();
        let _ = crate::element::ElementKind::export_all();
        let _ = crate::graph::GraphKind::export_all();
        let _ = crate::graph::GraphData::export_all();
        let _ = crate::graph::GraphState::export_all();
        let _ = crate::graph::WeightedEdge::export_all();

        // Steps
        let _ = crate::step::Step::export_all();
        let _ = crate::step::StepData::export_all();
        let _ = crate::step::ExecutionStats::export_all();

        // Catalog
        let _ = crate::algorithm::AlgorithmInfo::export_all();
        let _ = crate::algorithm::Complexity::export_all();
        let _ = crate::algorithm::GraphShape::export_all();

        // Inputs and outputs
        let _ = crate::io::AlgorithmInput::export_all();
        let _ = crate::io::AlgorithmOutput::export_all();

        // Service payloads
        let _ = crate::session::VisualizationSession::export_all();
        let _ = crate::session::VisualizationResult::export_all();
        let _ = crate::benchmark::BenchmarkTest::export_all();
        let _ = crate::benchmark::ComparisonResult::export_all();
        let _ = crate::dataset::GeneratedData::export_all();
        let _ = crate::dataset::DataPreset::export_all();
    }
}
