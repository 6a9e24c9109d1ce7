//! Periodic removal of expired visualization sessions.

use std::time::Duration;

use algoviz_server::services::VisualizationService;
use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Spawn a task that calls [`VisualizationService::cleanup_expired`] every
/// `interval`. The first sweep happens one interval after startup.
pub fn spawn_session_sweeper(service: VisualizationService, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = service.cleanup_expired(Utc::now()).await;
            if removed > 0 {
                info!(removed, "expired visualization sessions removed");
            } else {
                debug!("session sweep found nothing to remove");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use algoviz_core::build_registry;
    use algoviz_core::config::LimitsConfig;
    use algoviz_types::{AlgorithmInput, Element};

    #[tokio::test]
    async fn sweeper_removes_expired_sessions() {
        let service = VisualizationService::new(
            Arc::new(build_registry()),
            LimitsConfig::default(),
            Duration::ZERO,
        );
        let input = AlgorithmInput::Sequence(vec![Element::Int(2), Element::Int(1)]);
        let result = service
            .execute("insertion_sort", input, algoviz_core::Parameters::new())
            .await;
        assert!(result.is_ok());
        assert_eq!(service.session_count().await, 1);

        let handle = spawn_session_sweeper(service.clone(), Duration::from_millis(10));
        for _ in 0..100 {
            if service.session_count().await == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();
        assert_eq!(service.session_count().await, 0);
    }
}
