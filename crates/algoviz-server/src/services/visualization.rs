//! Visualization sessions.
//!
//! [`VisualizationService::execute`] runs an algorithm on the blocking pool
//! with a step-limited tracker and stores the recorded steps under a new
//! session. Sessions are kept in memory until [`cleanup_expired`] removes
//! them.
//!
//! [`cleanup_expired`]: VisualizationService::cleanup_expired

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use algoviz_core::config::LimitsConfig;
use algoviz_core::{AlgorithmRegistry, Parameters, StepTracker};
use algoviz_types::{
    AlgorithmInput, SessionStatus, Step, VisualizationResult, VisualizationSession,
};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ServiceError;

/// Runs algorithms and keeps their sessions.
#[derive(Debug, Clone)]
pub struct VisualizationService {
    registry: Arc<AlgorithmRegistry>,
    sessions: Arc<RwLock<HashMap<String, VisualizationSession>>>,
    limits: LimitsConfig,
    ttl: Duration,
}

impl VisualizationService {
    /// Create a service over `registry`.
    pub fn new(registry: Arc<AlgorithmRegistry>, limits: LimitsConfig, ttl: Duration) -> Self {
        Self {
            registry,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            limits,
            ttl,
        }
    }

    /// Run `algorithm_id` on `data` and record a session.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::AlgorithmNotFound`] for an unknown id
    /// - [`ServiceError::DataSizeTooLarge`] above `limits.max_data_size`
    /// - [`ServiceError::Algorithm`] when validation or execution fails
    /// - [`ServiceError::ExecutionTimeout`] when the run exceeds
    ///   `limits.max_execution_time_secs`; the session is marked as errored
    pub async fn execute(
        &self,
        algorithm_id: &str,
        data: AlgorithmInput,
        parameters: Parameters,
    ) -> Result<VisualizationResult, ServiceError> {
        let algorithm = self
            .registry
            .get(algorithm_id)
            .ok_or_else(|| ServiceError::AlgorithmNotFound {
                id: algorithm_id.to_owned(),
            })?;
        let size = match &data {
            AlgorithmInput::Sequence(values) => values.len(),
            AlgorithmInput::Graph(graph) => graph.nodes.len(),
        };
        if size > self.limits.max_data_size {
            return Err(ServiceError::DataSizeTooLarge {
                size,
                max: self.limits.max_data_size,
            });
        }
        algorithm.validate_input(&data)?;

        let session_id = Uuid::new_v4().simple().to_string();
        let session = VisualizationSession {
            id: session_id.clone(),
            algorithm_id: algorithm_id.to_owned(),
            input_data: data.clone(),
            parameters: parameters.clone(),
            steps: Vec::new(),
            status: SessionStatus::Running,
            created_at: Utc::now(),
            completed_at: None,
            error: None,
        };
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), session);
        debug!(%session_id, algorithm_id, size, "visualization session created");

        let registry = Arc::clone(&self.registry);
        let id = algorithm_id.to_owned();
        let input = data.clone();
        let step_limit = self.limits.max_recorded_steps;
        let worker = tokio::task::spawn_blocking(move || {
            let algorithm = registry
                .get(&id)
                .ok_or_else(|| ServiceError::AlgorithmNotFound { id: id.clone() })?;
            let mut tracker = StepTracker::with_step_limit(step_limit);
            let started = Instant::now();
            let output = algorithm.execute(&input, &parameters, &mut tracker)?;
            Ok::<_, ServiceError>((output, tracker, started.elapsed()))
        });

        let budget = self.limits.max_execution_time();
        let outcome = match tokio::time::timeout(budget, worker).await {
            Err(_) => Err(ServiceError::ExecutionTimeout {
                secs: budget.as_secs(),
            }),
            Ok(Err(join)) => Err(ServiceError::Internal(format!("algorithm task failed: {join}"))),
            Ok(Ok(result)) => result,
        };

        let (output, tracker, elapsed) = match outcome {
            Ok(run) => run,
            Err(e) => {
                warn!(%session_id, algorithm_id, error = %e, "visualization failed");
                self.finish(&session_id, SessionStatus::Error, Vec::new(), Some(e.to_string()))
                    .await;
                return Err(e);
            }
        };

        let total_steps = tracker.step_count();
        let truncated = tracker.is_truncated();
        let (steps, statistics) = tracker.into_parts();
        self.finish(&session_id, SessionStatus::Completed, steps.clone(), None)
            .await;

        let execution_time = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        info!(
            %session_id,
            algorithm_id,
            steps = total_steps,
            truncated,
            execution_time_us = execution_time,
            "visualization completed"
        );

        Ok(VisualizationResult {
            session_id,
            algorithm_id: algorithm_id.to_owned(),
            input_data: data,
            output_data: output,
            steps,
            total_steps,
            truncated,
            execution_time,
            statistics,
        })
    }

    async fn finish(
        &self,
        session_id: &str,
        status: SessionStatus,
        steps: Vec<Step>,
        error: Option<String>,
    ) {
        if let Some(session) = self.sessions.write().await.get_mut(session_id) {
            session.status = status;
            session.steps = steps;
            session.error = error;
            session.completed_at = Some(Utc::now());
        }
    }

    /// A copy of the session.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::SessionNotFound`] for an unknown id.
    pub async fn session(&self, session_id: &str) -> Result<VisualizationSession, ServiceError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| ServiceError::SessionNotFound {
                id: session_id.to_owned(),
            })
    }

    /// One recorded step of a session. `step_id` is the step's ordinal.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::SessionNotFound`] for an unknown session
    /// - [`ServiceError::InvalidStepId`] when `step_id` is not an integer
    /// - [`ServiceError::StepNotFound`] when the step was not recorded
    pub async fn step(&self, session_id: &str, step_id: &str) -> Result<Step, ServiceError> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(session_id)
            .ok_or_else(|| ServiceError::SessionNotFound {
                id: session_id.to_owned(),
            })?;
        let index: usize = step_id
            .trim()
            .parse()
            .map_err(|_| ServiceError::InvalidStepId {
                raw: step_id.to_owned(),
            })?;
        session
            .steps
            .get(index)
            .cloned()
            .ok_or_else(|| ServiceError::StepNotFound {
                session_id: session_id.to_owned(),
                step_id: index,
            })
    }

    /// Clear a session's steps and return it to running.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::SessionNotFound`] for an unknown id.
    pub async fn reset(&self, session_id: &str) -> Result<(), ServiceError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| ServiceError::SessionNotFound {
                id: session_id.to_owned(),
            })?;
        session.steps.clear();
        session.status = SessionStatus::Running;
        session.error = None;
        session.completed_at = None;
        debug!(session_id, "visualization session reset");
        Ok(())
    }

    /// Remove sessions created more than the TTL before `now`. Returns the
    /// number removed.
    pub async fn cleanup_expired(&self, now: DateTime<Utc>) -> usize {
        let ttl = chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now.signed_duration_since(session.created_at) <= ttl);
        before.saturating_sub(sessions.len())
    }

    /// Number of stored sessions.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_core::build_registry;
    use algoviz_types::{AlgorithmOutput, Element};

    fn service(limits: LimitsConfig) -> VisualizationService {
        VisualizationService::new(
            Arc::new(build_registry()),
            limits,
            Duration::from_secs(3600),
        )
    }

    fn numbers(values: &[i64]) -> AlgorithmInput {
        AlgorithmInput::Sequence(values.iter().copied().map(Element::Int).collect())
    }

    #[tokio::test]
    async fn execute_records_completed_session() {
        let service = service(LimitsConfig::default());
        let result = service
            .execute("bubble_sort", numbers(&[3, 1, 2]), Parameters::new())
            .await;
        assert!(result.is_ok());
        let Ok(result) = result else { return };
        assert_eq!(
            result.output_data,
            AlgorithmOutput::Sorted(vec![Element::Int(1), Element::Int(2), Element::Int(3)])
        );
        assert_eq!(result.session_id.len(), 32);
        assert!(!result.truncated);
        assert_eq!(result.steps.len(), result.total_steps);

        let session = service.session(&result.session_id).await;
        assert!(session.is_ok_and(|s| s.status == SessionStatus::Completed
            && s.steps.len() == result.total_steps));
    }

    #[tokio::test]
    async fn unknown_algorithm_is_not_found() {
        let service = service(LimitsConfig::default());
        let result = service
            .execute("bogo_sort", numbers(&[1]), Parameters::new())
            .await;
        assert!(matches!(result, Err(ServiceError::AlgorithmNotFound { .. })));
        assert_eq!(service.session_count().await, 0);
    }

    #[tokio::test]
    async fn oversized_input_is_rejected() {
        let limits = LimitsConfig {
            max_data_size: 2,
            ..LimitsConfig::default()
        };
        let result = service(limits)
            .execute("bubble_sort", numbers(&[3, 2, 1]), Parameters::new())
            .await;
        assert!(matches!(result, Err(ServiceError::DataSizeTooLarge { size: 3, max: 2 })));
    }

    #[tokio::test]
    async fn step_limit_truncates() {
        let limits = LimitsConfig {
            max_recorded_steps: 5,
            ..LimitsConfig::default()
        };
        let result = service(limits)
            .execute("bubble_sort", numbers(&[9, 8, 7, 6, 5, 4]), Parameters::new())
            .await;
        assert!(result.is_ok());
        let Ok(result) = result else { return };
        assert!(result.truncated);
        assert_eq!(result.steps.len(), 5);
        assert!(result.total_steps > 5);
    }

    #[tokio::test]
    async fn step_lookup_parses_and_bounds_checks() {
        let service = service(LimitsConfig::default());
        let mut params = Parameters::new();
        params.insert("target".to_owned(), 2.into());
        let result = service.execute("linear_search", numbers(&[4, 2]), params).await;
        assert!(result.is_ok());
        let Ok(result) = result else { return };
        let id = result.session_id;

        let second = service.step(&id, "1").await;
        assert!(second.is_ok_and(|s| s.step_id == 1));
        assert!(matches!(
            service.step(&id, "abc").await,
            Err(ServiceError::InvalidStepId { .. })
        ));
        assert!(matches!(
            service.step(&id, "9999").await,
            Err(ServiceError::StepNotFound { .. })
        ));
        assert!(matches!(
            service.step("missing", "0").await,
            Err(ServiceError::SessionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn reset_clears_steps() {
        let service = service(LimitsConfig::default());
        let result = service
            .execute("insertion_sort", numbers(&[2, 1]), Parameters::new())
            .await;
        assert!(result.is_ok());
        let Ok(result) = result else { return };
        assert!(service.reset(&result.session_id).await.is_ok());
        let session = service.session(&result.session_id).await;
        assert!(session.is_ok_and(|s| s.steps.is_empty()
            && s.status == SessionStatus::Running
            && s.completed_at.is_none()));
        assert!(service.reset("missing").await.is_err());
    }

    #[tokio::test]
    async fn cleanup_removes_only_expired_sessions() {
        let service = service(LimitsConfig::default());
        let run = service
            .execute("heap_sort", numbers(&[2, 1]), Parameters::new())
            .await;
        assert!(run.is_ok());
        assert_eq!(service.cleanup_expired(Utc::now()).await, 0);
        let later = Utc::now() + chrono::Duration::hours(2);
        assert_eq!(service.cleanup_expired(later).await, 1);
        assert_eq!(service.session_count().await, 0);
    }

    #[tokio::test]
    async fn failed_run_marks_session_errored() {
        let service = service(LimitsConfig::default());
        let result = service
            .execute("binary_search", numbers(&[1, 2]), Parameters::new())
            .await;
        assert!(matches!(result, Err(ServiceError::Algorithm(_))));
        let sessions = service.sessions.read().await;
        assert!(sessions.values().all(|s| s.status == SessionStatus::Error && s.error.is_some()));
        assert_eq!(sessions.len(), 1);
    }
}
