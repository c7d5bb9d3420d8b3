//! In-memory container runtime that records every stop

use mina_monitor::errors::ContainerError;
use mina_monitor::{ContainerInfo, ContainerRuntime};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct RecordingRuntime {
    containers: Vec<ContainerInfo>,
    failing_stops: HashSet<String>,
    fail_list: bool,
    stopped: Mutex<Vec<String>>,
    list_calls: AtomicUsize,
}

impl RecordingRuntime {
    pub fn new(containers: Vec<ContainerInfo>) -> Self {
        Self {
            containers,
            ..Default::default()
        }
    }

    /// Stopping the named container fails
    pub fn with_failing_stop(mut self, name: &str) -> Self {
        self.failing_stops.insert(name.to_string());
        self
    }

    /// Listing containers fails
    pub fn with_failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn stopped(&self) -> Vec<String> {
        self.stopped.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl ContainerRuntime for RecordingRuntime {
    async fn list_running(&self) -> Result<Vec<ContainerInfo>, ContainerError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(ContainerError::ListFailed {
                reason: "Cannot connect to the Docker daemon".to_string(),
            });
        }
        Ok(self.containers.clone())
    }

    async fn stop(&self, container: &ContainerInfo) -> Result<(), ContainerError> {
        if self.failing_stops.contains(&container.name) {
            return Err(ContainerError::StopFailed {
                container: container.name.clone(),
                reason: "No such container".to_string(),
            });
        }
        self.stopped.lock().unwrap().push(container.name.clone());
        Ok(())
    }
}
