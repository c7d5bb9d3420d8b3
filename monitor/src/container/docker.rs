use std::process::Output;
use std::time::Duration;
use tokio::process::Command as AsyncCommand;
use tokio::time::timeout;
use tracing::{debug, info};

use super::{ContainerInfo, ContainerRuntime};
use crate::errors::ContainerError;

const PS_FORMAT: &str = "{{.ID}}\t{{.Names}}";

/// Container runtime driven through the `docker` CLI
pub struct DockerCli {
    binary: String,
    command_timeout: Duration,
}

impl DockerCli {
    pub fn new(binary: impl Into<String>, command_timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            command_timeout,
        }
    }

    pub async fn list_running_containers(&self) -> Result<Vec<ContainerInfo>, ContainerError> {
        debug!("Listing running containers");

        let output = self
            .run_docker(&["ps", "--format", PS_FORMAT])
            .await
            .map_err(|reason| ContainerError::ListFailed { reason })?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(ContainerError::ListFailed {
                reason: error.trim().to_string(),
            });
        }

        let containers = parse_container_list(&String::from_utf8_lossy(&output.stdout));
        debug!("Found {} running containers", containers.len());
        Ok(containers)
    }

    pub async fn stop_container(&self, container: &ContainerInfo) -> Result<(), ContainerError> {
        info!("Stopping container: {} ({})", container.name, container.id);

        let output = self
            .run_docker(&["stop", container.id.as_str()])
            .await
            .map_err(|reason| ContainerError::StopFailed {
                container: container.name.clone(),
                reason,
            })?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(ContainerError::StopFailed {
                container: container.name.clone(),
                reason: error.trim().to_string(),
            });
        }

        info!("Container {} stopped successfully", container.name);
        Ok(())
    }

    /// Run the CLI under the command deadline; a child that overruns it is killed
    async fn run_docker(&self, args: &[&str]) -> Result<Output, String> {
        let mut command = AsyncCommand::new(&self.binary);
        command.args(args).kill_on_drop(true);

        match timeout(self.command_timeout, command.output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(format!("failed to run {}: {}", self.binary, e)),
            Err(_) => Err(format!(
                "{} {} timed out after {}s",
                self.binary,
                args.first().copied().unwrap_or_default(),
                self.command_timeout.as_secs()
            )),
        }
    }
}

impl ContainerRuntime for DockerCli {
    async fn list_running(&self) -> Result<Vec<ContainerInfo>, ContainerError> {
        self.list_running_containers().await
    }

    async fn stop(&self, container: &ContainerInfo) -> Result<(), ContainerError> {
        self.stop_container(container).await
    }
}

/// Parse `docker ps --format '{{.ID}}\t{{.Names}}'` output
fn parse_container_list(stdout: &str) -> Vec<ContainerInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let (id, name) = line.trim().split_once('\t')?;
            let (id, name) = (id.trim(), name.trim());
            if id.is_empty() || name.is_empty() {
                return None;
            }
            Some(ContainerInfo {
                id: id.to_string(),
                name: name.to_string(),
            })
        })
        .collect()
}
