//! Decision-to-action boundary: stop the node and its sidecars, then reset
//! the tracker so the restarted node starts with clean counters.

use tracing::{debug, error, info};

use crate::container::{ContainerInfo, ContainerRuntime};
use crate::errors::MonitorError;
use crate::health::SyncStateTracker;

#[derive(Debug, Clone, Default)]
pub struct RestartSummary {
    pub stopped: Vec<String>,
}

pub struct RestartCoordinator<R> {
    runtime: R,
    name_patterns: Vec<String>,
}

impl<R: ContainerRuntime> RestartCoordinator<R> {
    pub fn new(runtime: R, name_patterns: Vec<String>) -> Self {
        Self {
            runtime,
            name_patterns,
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Whether a container belongs to the node deployment (case-sensitive)
    pub fn is_managed(&self, container: &ContainerInfo) -> bool {
        self.name_patterns
            .iter()
            .any(|pattern| container.name.contains(pattern.as_str()))
    }

    /// Stop every managed container and reset the tracker's counters.
    ///
    /// Counters are reset even when the runtime fails. A failed stop is not
    /// retried; the remaining containers are still stopped and the first
    /// failure is returned.
    pub async fn restart(
        &self,
        tracker: &mut SyncStateTracker,
    ) -> Result<RestartSummary, MonitorError> {
        info!("Restarting node");

        let result = self.stop_managed_containers().await;
        tracker.reset();

        result
    }

    async fn stop_managed_containers(&self) -> Result<RestartSummary, MonitorError> {
        let containers = self.runtime.list_running().await?;

        let mut summary = RestartSummary::default();
        let mut first_error = None;

        for container in containers.iter().filter(|c| self.is_managed(c)) {
            match self.runtime.stop(container).await {
                Ok(()) => summary.stopped.push(container.name.clone()),
                Err(e) => {
                    error!("Failed to stop {}: {}", container.name, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        if summary.stopped.is_empty() && first_error.is_none() {
            debug!("No running container matched {:?}", self.name_patterns);
        }

        match first_error {
            Some(e) => Err(e.into()),
            None => {
                info!("Stopped containers: {:?}", summary.stopped);
                Ok(summary)
            }
        }
    }
}
