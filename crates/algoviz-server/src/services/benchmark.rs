//! Benchmark tests.
//!
//! [`BenchmarkService::run`] validates a request, stores a pending test and
//! drives it on a background task. Runs use a counting tracker so no steps are
//! retained. At most `max_concurrent_tests` tests execute at once; the rest
//! wait for a permit while still reported as pending.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Instant;

use algoviz_core::config::BenchmarkConfig;
use algoviz_core::{AlgorithmRegistry, Capability, Parameters, StepTracker};
use algoviz_types::{
    AlgorithmComparison, AlgorithmInput, BenchmarkResult, BenchmarkStatus, BenchmarkTest,
    ComparisonResult, ComparisonSummary, DataType, Element, GraphData, GraphEdge, GraphKind,
    GraphNode, SizeSummary,
};
use chrono::Utc;
use rand::Rng;
use tokio::sync::{RwLock, Semaphore};
use tracing::{debug, info, warn};

use super::ServiceError;

/// A benchmark test as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkRequest {
    /// Algorithms to measure.
    pub algorithm_ids: Vec<String>,
    /// Input sizes to measure each algorithm at.
    pub data_sizes: Vec<usize>,
    /// `array` or `graph`.
    pub data_type: String,
    /// Repetitions per algorithm and size. Missing or non-positive values
    /// fall back to the configured default.
    pub test_count: Option<i64>,
    /// Parameters passed to every run.
    pub parameters: Parameters,
}

/// Runs benchmark tests and compares their results.
#[derive(Debug, Clone)]
pub struct BenchmarkService {
    registry: Arc<AlgorithmRegistry>,
    tests: Arc<RwLock<HashMap<String, BenchmarkTest>>>,
    permits: Arc<Semaphore>,
    config: BenchmarkConfig,
    max_data_size: usize,
}

impl BenchmarkService {
    /// Create a service over `registry`.
    pub fn new(
        registry: Arc<AlgorithmRegistry>,
        config: BenchmarkConfig,
        max_data_size: usize,
    ) -> Self {
        Self {
            registry,
            tests: Arc::new(RwLock::new(HashMap::new())),
            permits: Arc::new(Semaphore::new(config.max_concurrent_tests.max(1))),
            config,
            max_data_size,
        }
    }

    /// Validate `request`, store a pending test and start it in the
    /// background. Returns the test id without waiting for any run.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidAlgorithm`] for an empty or unknown id list
    /// - [`ServiceError::DataSizeTooLarge`] for an empty size list or a size
    ///   outside `1..=max_data_size`
    /// - [`ServiceError::UnsupportedDataType`] unless the type is `array` or
    ///   `graph`
    pub async fn run(&self, request: BenchmarkRequest) -> Result<String, ServiceError> {
        if request.algorithm_ids.is_empty() {
            return Err(ServiceError::InvalidAlgorithm {
                reason: "no algorithms selected".to_owned(),
            });
        }
        if let Some(unknown) = request
            .algorithm_ids
            .iter()
            .find(|id| self.registry.get(id).is_none())
        {
            return Err(ServiceError::InvalidAlgorithm {
                reason: format!("unknown algorithm {unknown}"),
            });
        }
        if request.data_sizes.is_empty() {
            return Err(ServiceError::DataSizeTooLarge {
                size: 0,
                max: self.max_data_size,
            });
        }
        if let Some(&size) = request
            .data_sizes
            .iter()
            .find(|&&size| size == 0 || size > self.max_data_size)
        {
            return Err(ServiceError::DataSizeTooLarge {
                size,
                max: self.max_data_size,
            });
        }
        let data_type = DataType::parse(request.data_type.trim()).ok_or_else(|| {
            ServiceError::UnsupportedDataType {
                name: request.data_type.clone(),
            }
        })?;
        let test_count = request
            .test_count
            .and_then(|n| usize::try_from(n).ok())
            .filter(|&n| n > 0)
            .unwrap_or_else(|| {
                usize::try_from(self.config.default_test_count).unwrap_or(1)
            });

        let id = format!("{:016x}", rand::rng().random::<u64>());
        let test = BenchmarkTest {
            id: id.clone(),
            name: format!("Benchmark {id}"),
            algorithm_ids: request.algorithm_ids,
            data_sizes: request.data_sizes,
            data_type,
            test_count,
            parameters: request.parameters,
            status: BenchmarkStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            results: Vec::new(),
            error: None,
        };
        let plan = test.clone();
        self.tests.write().await.insert(id.clone(), test);
        info!(
            test_id = %id,
            algorithms = plan.algorithm_ids.len(),
            sizes = plan.data_sizes.len(),
            test_count,
            "benchmark queued"
        );

        let service = self.clone();
        tokio::spawn(async move { service.drive(plan).await });
        Ok(id)
    }

    /// Snapshot of a test, including the results recorded so far.
    ///
    /// # Errors
    ///
    /// [`ServiceError::TestNotFound`] for an unknown id.
    pub async fn results(&self, test_id: &str) -> Result<BenchmarkTest, ServiceError> {
        self.tests
            .read()
            .await
            .get(test_id)
            .cloned()
            .ok_or_else(|| ServiceError::TestNotFound {
                id: test_id.to_owned(),
            })
    }

    /// Aggregate the results of several tests per algorithm and size.
    ///
    /// Timings only count successful runs. The algorithm with the lowest mean
    /// of per-size average times is reported as fastest.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::NotEnoughTests`] for fewer than two ids
    /// - [`ServiceError::TestNotFound`] for an unknown id
    pub async fn compare(&self, test_ids: &[String]) -> Result<ComparisonResult, ServiceError> {
        if test_ids.len() < 2 {
            return Err(ServiceError::NotEnoughTests {
                count: test_ids.len(),
            });
        }
        let mut results = Vec::new();
        {
            let tests = self.tests.read().await;
            for id in test_ids {
                let test = tests
                    .get(id)
                    .ok_or_else(|| ServiceError::TestNotFound { id: id.clone() })?;
                results.extend(test.results.iter().cloned());
            }
        }
        Ok(summarize(test_ids, &results))
    }

    async fn drive(self, plan: BenchmarkTest) {
        let test_id = plan.id.clone();
        let Ok(_permit) = Arc::clone(&self.permits).acquire_owned().await else {
            self.fail(&test_id, "benchmark runner is closed".to_owned())
                .await;
            return;
        };

        let started = Instant::now();
        self.update(&test_id, |test| {
            test.status = BenchmarkStatus::Running;
            test.started_at = Some(Utc::now());
        })
        .await;
        debug!(%test_id, "benchmark started");

        let budget = self.config.timeout();
        for algorithm_id in &plan.algorithm_ids {
            for &size in &plan.data_sizes {
                let input = benchmark_input(plan.data_type, size);
                for run_index in 0..plan.test_count {
                    let remaining = budget.saturating_sub(started.elapsed());
                    if remaining.is_zero() {
                        self.time_out(&test_id, budget.as_secs()).await;
                        return;
                    }
                    let job = RunJob {
                        registry: Arc::clone(&self.registry),
                        test_id: test_id.clone(),
                        algorithm_id: algorithm_id.clone(),
                        data_type: plan.data_type,
                        size,
                        run_index,
                        input: input.clone(),
                        parameters: plan.parameters.clone(),
                    };
                    let worker = tokio::task::spawn_blocking(move || job.execute());
                    let result = match tokio::time::timeout(remaining, worker).await {
                        Err(_) => {
                            self.time_out(&test_id, budget.as_secs()).await;
                            return;
                        }
                        Ok(Err(join)) => {
                            self.fail(&test_id, format!("benchmark run failed: {join}"))
                                .await;
                            return;
                        }
                        Ok(Ok(result)) => result,
                    };
                    self.update(&test_id, |test| test.results.push(result))
                        .await;
                }
            }
        }

        self.update(&test_id, |test| {
            test.status = BenchmarkStatus::Completed;
            test.completed_at = Some(Utc::now());
        })
        .await;
        info!(
            %test_id,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "benchmark completed"
        );
    }

    async fn time_out(&self, test_id: &str, secs: u64) {
        warn!(%test_id, timeout_secs = secs, "benchmark timed out");
        self.fail(test_id, format!("benchmark timed out after {secs}s"))
            .await;
    }

    async fn fail(&self, test_id: &str, error: String) {
        self.update(test_id, |test| {
            test.status = BenchmarkStatus::Failed;
            test.completed_at = Some(Utc::now());
            test.error = Some(error);
        })
        .await;
    }

    async fn update(&self, test_id: &str, apply: impl FnOnce(&mut BenchmarkTest)) {
        if let Some(test) = self.tests.write().await.get_mut(test_id) {
            apply(test);
        }
    }
}

/// Everything one benchmark run needs on the blocking pool.
struct RunJob {
    registry: Arc<AlgorithmRegistry>,
    test_id: String,
    algorithm_id: String,
    data_type: DataType,
    size: usize,
    run_index: usize,
    input: AlgorithmInput,
    parameters: Parameters,
}

impl RunJob {
    fn execute(mut self) -> BenchmarkResult {
        let mut result = BenchmarkResult {
            test_id: self.test_id,
            algorithm_id: self.algorithm_id.clone(),
            algorithm_name: self.algorithm_id.clone(),
            data_size: self.size,
            data_type: self.data_type,
            run_index: self.run_index,
            execution_time: 0,
            operations: 0,
            comparisons: 0,
            swaps: 0,
            success: false,
            error: None,
            timestamp: Utc::now(),
        };
        let Some(algorithm) = self.registry.get(&self.algorithm_id) else {
            result.error = Some(format!("algorithm not found: {}", self.algorithm_id));
            return result;
        };
        result.algorithm_name = algorithm.info().name;

        let needs_target = matches!(algorithm.capability(), Capability::Searching(_))
            && !self.parameters.contains_key("target");
        let last = match &self.input {
            AlgorithmInput::Sequence(values) => values.last(),
            AlgorithmInput::Graph(_) => None,
        };
        if let (true, Some(Element::Int(last))) = (needs_target, last) {
            self.parameters.insert("target".to_owned(), (*last).into());
        }

        let mut tracker = StepTracker::counting();
        let started = Instant::now();
        let outcome = algorithm.execute(&self.input, &self.parameters, &mut tracker);
        result.execution_time = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

        let stats = tracker.stats();
        result.operations = stats.total_operations();
        result.comparisons = stats.comparisons;
        result.swaps = stats.swaps;
        result.timestamp = Utc::now();
        match outcome {
            Ok(_) => result.success = true,
            Err(e) => result.error = Some(e.to_string()),
        }
        result
    }
}

/// Deterministic benchmark input: ascending integers, or a directed unit
/// weight chain of `size` nodes.
fn benchmark_input(data_type: DataType, size: usize) -> AlgorithmInput {
    let value = |i: usize| i64::try_from(i).unwrap_or(i64::MAX);
    match data_type {
        DataType::Array => AlgorithmInput::Sequence((0..size).map(|i| Element::Int(value(i))).collect()),
        DataType::Graph => {
            let id = |i: usize| format!("node_{i}");
            let nodes = (0..size)
                .map(|i| {
                    let mut node = GraphNode::new(id(i), id(i));
                    node.value = Some(Element::Int(value(i)));
                    node
                })
                .collect();
            let edges = (1..size)
                .map(|i| GraphEdge::new(id(i.saturating_sub(1)), id(i), 1.0))
                .collect();
            AlgorithmInput::Graph(GraphData {
                nodes,
                edges,
                kind: GraphKind::Directed,
            })
        }
    }
}

fn mean(total: u64, count: usize) -> u64 {
    u64::try_from(count)
        .ok()
        .and_then(|count| total.checked_div(count))
        .unwrap_or(0)
}

fn ratio(part: usize, whole: usize) -> f64 {
    let as_f64 = |n: usize| f64::from(u32::try_from(n).unwrap_or(u32::MAX));
    if whole == 0 {
        0.0
    } else {
        as_f64(part) / as_f64(whole)
    }
}

fn size_summary(runs: &[&BenchmarkResult]) -> SizeSummary {
    let successful: Vec<&&BenchmarkResult> = runs.iter().filter(|r| r.success).collect();
    let times = || successful.iter().map(|r| r.execution_time);
    let total_time = times().fold(0_u64, u64::saturating_add);
    let total_ops = successful
        .iter()
        .map(|r| r.operations)
        .fold(0_u64, u64::saturating_add);
    SizeSummary {
        run_count: runs.len(),
        avg_time: mean(total_time, successful.len()),
        min_time: times().min().unwrap_or(0),
        max_time: times().max().unwrap_or(0),
        avg_ops: mean(total_ops, successful.len()),
        success_rate: ratio(successful.len(), runs.len()),
    }
}

fn summarize(test_ids: &[String], results: &[BenchmarkResult]) -> ComparisonResult {
    let mut algorithms: Vec<String> = Vec::new();
    let mut names: HashMap<&str, &str> = HashMap::new();
    for result in results {
        if !algorithms.contains(&result.algorithm_id) {
            algorithms.push(result.algorithm_id.clone());
        }
        names.insert(&result.algorithm_id, &result.algorithm_name);
    }
    let data_sizes: BTreeSet<usize> = results.iter().map(|r| r.data_size).collect();

    let mut best: Option<(&str, u64)> = None;
    let comparisons: Vec<AlgorithmComparison> = algorithms
        .iter()
        .map(|algorithm_id| {
            let mut by_size: BTreeMap<usize, Vec<&BenchmarkResult>> = BTreeMap::new();
            for result in results.iter().filter(|r| &r.algorithm_id == algorithm_id) {
                by_size.entry(result.data_size).or_default().push(result);
            }
            let summaries: BTreeMap<usize, SizeSummary> = by_size
                .iter()
                .map(|(&size, runs)| (size, size_summary(runs)))
                .collect();
            let measured: Vec<u64> = summaries
                .values()
                .filter(|s| s.success_rate > 0.0)
                .map(|s| s.avg_time)
                .collect();
            let overall_score = mean(
                measured.iter().copied().fold(0_u64, u64::saturating_add),
                measured.len(),
            );
            if !measured.is_empty() && best.is_none_or(|(_, score)| overall_score < score) {
                best = Some((algorithm_id.as_str(), overall_score));
            }
            AlgorithmComparison {
                algorithm_id: algorithm_id.clone(),
                algorithm_name: names
                    .get(algorithm_id.as_str())
                    .map_or_else(|| algorithm_id.clone(), |n| (*n).to_owned()),
                results: summaries,
                overall_score,
            }
        })
        .collect();

    let summary = match best {
        Some((id, score)) => {
            let name = names.get(id).copied().unwrap_or(id);
            ComparisonSummary {
                best_time: Some(id.to_owned()),
                recommendation: Some(id.to_owned()),
                reason: format!(
                    "{name} had the lowest average execution time ({score}µs) across the measured sizes"
                ),
            }
        }
        None => ComparisonSummary {
            best_time: None,
            recommendation: None,
            reason: "no successful runs to compare".to_owned(),
        },
    };

    ComparisonResult {
        test_ids: test_ids.to_vec(),
        algorithms,
        data_sizes: data_sizes.into_iter().collect(),
        comparisons,
        summary,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use algoviz_core::build_registry;

    fn service(config: BenchmarkConfig) -> BenchmarkService {
        BenchmarkService::new(Arc::new(build_registry()), config, 1000)
    }

    fn request(ids: &[&str], sizes: &[usize], data_type: &str) -> BenchmarkRequest {
        BenchmarkRequest {
            algorithm_ids: ids.iter().map(|s| (*s).to_owned()).collect(),
            data_sizes: sizes.to_vec(),
            data_type: data_type.to_owned(),
            test_count: Some(2),
            parameters: Parameters::new(),
        }
    }

    fn placeholder() -> BenchmarkTest {
        BenchmarkTest {
            id: String::new(),
            name: String::new(),
            algorithm_ids: Vec::new(),
            data_sizes: Vec::new(),
            data_type: DataType::Array,
            test_count: 0,
            parameters: Parameters::new(),
            status: BenchmarkStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            results: Vec::new(),
            error: None,
        }
    }

    async fn wait_for(service: &BenchmarkService, id: &str) -> BenchmarkTest {
        for _ in 0..500 {
            if let Ok(test) = service.results(id).await {
                if matches!(test.status, BenchmarkStatus::Completed | BenchmarkStatus::Failed) {
                    return test;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        service.results(id).await.unwrap_or_else(|_| placeholder())
    }

    #[tokio::test]
    async fn rejects_bad_requests() {
        let service = service(BenchmarkConfig::default());
        assert!(matches!(
            service.run(request(&[], &[10], "array")).await,
            Err(ServiceError::InvalidAlgorithm { .. })
        ));
        assert!(matches!(
            service.run(request(&["bogo_sort"], &[10], "array")).await,
            Err(ServiceError::InvalidAlgorithm { .. })
        ));
        assert!(matches!(
            service.run(request(&["bubble_sort"], &[5000], "array")).await,
            Err(ServiceError::DataSizeTooLarge { size: 5000, .. })
        ));
        assert!(matches!(
            service.run(request(&["bubble_sort"], &[10], "matrix")).await,
            Err(ServiceError::UnsupportedDataType { .. })
        ));
    }

    #[tokio::test]
    async fn runs_every_algorithm_size_and_repetition() {
        let service = service(BenchmarkConfig::default());
        let id = service
            .run(request(&["bubble_sort", "quick_sort"], &[10, 50], "array"))
            .await
            .unwrap_or_default();
        assert_eq!(id.len(), 16);
        let test = wait_for(&service, &id).await;
        assert_eq!(test.status, BenchmarkStatus::Completed);
        assert_eq!(test.results.len(), 8);
        assert!(test.results.iter().all(|r| r.success));
        assert!(test.started_at.is_some());
        assert!(test.completed_at.is_some());
        let bubble = test.results.iter().find(|r| r.algorithm_id == "bubble_sort" && r.data_size == 50);
        assert!(bubble.is_some_and(|r| r.comparisons > 0 && r.operations >= r.comparisons));
    }

    #[tokio::test]
    async fn searches_default_to_last_element() {
        let service = service(BenchmarkConfig::default());
        let id = service
            .run(request(&["binary_search"], &[32], "array"))
            .await
            .unwrap_or_default();
        let test = wait_for(&service, &id).await;
        assert!(test.results.iter().all(|r| r.success));
    }

    #[tokio::test]
    async fn graph_benchmarks_use_a_chain() {
        let service = service(BenchmarkConfig::default());
        let id = service
            .run(request(&["graph_bfs", "graph_dijkstra"], &[20], "graph"))
            .await
            .unwrap_or_default();
        let test = wait_for(&service, &id).await;
        assert_eq!(test.status, BenchmarkStatus::Completed);
        assert_eq!(test.results.len(), 4);
        assert!(test.results.iter().all(|r| r.success));
    }

    #[tokio::test]
    async fn sequence_algorithm_on_graph_records_failure() {
        let service = service(BenchmarkConfig::default());
        let id = service
            .run(request(&["bubble_sort"], &[5], "graph"))
            .await
            .unwrap_or_default();
        let test = wait_for(&service, &id).await;
        assert_eq!(test.status, BenchmarkStatus::Completed);
        assert!(test.results.iter().all(|r| !r.success && r.error.is_some()));
    }

    #[tokio::test]
    async fn zero_budget_fails_the_test() {
        let config = BenchmarkConfig {
            timeout_secs: 0,
            ..BenchmarkConfig::default()
        };
        let service = service(config);
        let id = service
            .run(request(&["bubble_sort"], &[10], "array"))
            .await
            .unwrap_or_default();
        let test = wait_for(&service, &id).await;
        assert_eq!(test.status, BenchmarkStatus::Failed);
        assert!(test.error.is_some_and(|e| e.contains("timed out")));
    }

    #[tokio::test]
    async fn non_positive_test_count_uses_default() {
        let service = service(BenchmarkConfig::default());
        let mut req = request(&["insertion_sort"], &[10], "array");
        req.test_count = Some(0);
        let id = service.run(req).await.unwrap_or_default();
        let test = wait_for(&service, &id).await;
        assert_eq!(test.test_count, 3);
        assert_eq!(test.results.len(), 3);
    }

    #[tokio::test]
    async fn compare_needs_two_known_tests() {
        let service = service(BenchmarkConfig::default());
        assert!(matches!(
            service.compare(&["a".to_owned()]).await,
            Err(ServiceError::NotEnoughTests { count: 1 })
        ));
        assert!(matches!(
            service.compare(&["a".to_owned(), "b".to_owned()]).await,
            Err(ServiceError::TestNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn compare_aggregates_per_algorithm_and_size() {
        let service = service(BenchmarkConfig::default());
        let first = service
            .run(request(&["bubble_sort"], &[10, 20], "array"))
            .await
            .unwrap_or_default();
        let second = service
            .run(request(&["merge_sort"], &[10, 20], "array"))
            .await
            .unwrap_or_default();
        wait_for(&service, &first).await;
        wait_for(&service, &second).await;

        let comparison = service.compare(&[first, second]).await;
        assert!(comparison.is_ok());
        let Ok(comparison) = comparison else { return };
        assert_eq!(comparison.algorithms, vec!["bubble_sort", "merge_sort"]);
        assert_eq!(comparison.data_sizes, vec![10, 20]);
        assert_eq!(comparison.comparisons.len(), 2);
        let bubble = &comparison.comparisons[0];
        assert_eq!(bubble.results.len(), 2);
        assert_eq!(bubble.results.get(&10).map(|s| s.run_count), Some(2));
        assert!(comparison.summary.best_time.is_some());
        assert_eq!(comparison.summary.best_time, comparison.summary.recommendation);
    }

    #[test]
    fn summary_ignores_failed_runs_for_timing() {
        let run = |time: u64, success: bool| BenchmarkResult {
            test_id: "t".to_owned(),
            algorithm_id: "a".to_owned(),
            algorithm_name: "A".to_owned(),
            data_size: 10,
            data_type: DataType::Array,
            run_index: 0,
            execution_time: time,
            operations: 4,
            comparisons: 2,
            swaps: 2,
            success,
            error: None,
            timestamp: Utc::now(),
        };
        let runs = [run(10, true), run(30, true), run(1, false)];
        let refs: Vec<&BenchmarkResult> = runs.iter().collect();
        let summary = size_summary(&refs);
        assert_eq!(summary.run_count, 3);
        assert_eq!(summary.avg_time, 20);
        assert_eq!(summary.min_time, 10);
        assert_eq!(summary.max_time, 30);
        assert!((summary.success_rate - 2.0 / 3.0).abs() < 1e-9);
    }
}
