//! Lookup table of every available algorithm.
//!
//! The registry is built once at startup by [`build_registry`] and shared
//! read-only by the services.

use std::collections::BTreeMap;

use algoviz_types::{AlgorithmInfo, Category};

use crate::algorithm::Algorithm;
use crate::graph::{
    BreadthFirstSearch, DepthFirstSearch, Dijkstra, Kruskal, Prim, TopologicalSort,
};
use crate::searching::{BinarySearch, HashSearch, LinearSearch};
use crate::sorting::{
    BubbleSort, HeapSort, InsertionSort, MergeSort, QuickSort, SelectionSort, ShellSort,
};

/// Algorithms keyed and ordered by id.
#[derive(Default)]
pub struct AlgorithmRegistry {
    algorithms: BTreeMap<&'static str, Box<dyn Algorithm>>,
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an algorithm, replacing any previous entry with the same id.
    pub fn register<A: Algorithm + 'static>(&mut self, algorithm: A) {
        self.algorithms.insert(algorithm.id(), Box::new(algorithm));
    }

    /// Find an algorithm by id.
    pub fn get(&self, id: &str) -> Option<&dyn Algorithm> {
        self.algorithms.get(id).map(AsRef::as_ref)
    }

    /// All algorithms in id order.
    pub fn all(&self) -> impl Iterator<Item = &dyn Algorithm> {
        self.algorithms.values().map(AsRef::as_ref)
    }

    /// Algorithms of one family in id order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &dyn Algorithm> {
        self.all().filter(move |a| a.category() == category)
    }

    /// Catalog entries for every algorithm.
    pub fn infos(&self) -> Vec<AlgorithmInfo> {
        self.all().map(Algorithm::info).collect()
    }

    /// Number of registered algorithms.
    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.algorithms.keys()).finish()
    }
}

/// Registry holding every built-in algorithm.
pub fn build_registry() -> AlgorithmRegistry {
    let mut registry = AlgorithmRegistry::new();

    registry.register(BubbleSort);
    registry.register(SelectionSort);
    registry.register(InsertionSort);
    registry.register(MergeSort);
    registry.register(QuickSort);
    registry.register(HeapSort);
    registry.register(ShellSort);

    registry.register(LinearSearch);
    registry.register(BinarySearch);
    registry.register(HashSearch);

    registry.register(BreadthFirstSearch);
    registry.register(DepthFirstSearch);
    registry.register(Dijkstra);
    registry.register(Prim);
    registry.register(Kruskal);
    registry.register(TopologicalSort);

    registry
}
