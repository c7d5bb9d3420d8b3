//! Container runtime control
//!
//! The monitor only ever needs two operations from the runtime: list the
//! running containers and stop one of them.

pub mod docker;

pub use docker::DockerCli;

use std::future::Future;

use crate::errors::ContainerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub id: String,
    pub name: String,
}

pub trait ContainerRuntime: Send + Sync {
    fn list_running(
        &self,
    ) -> impl Future<Output = Result<Vec<ContainerInfo>, ContainerError>> + Send;

    fn stop(
        &self,
        container: &ContainerInfo,
    ) -> impl Future<Output = Result<(), ContainerError>> + Send;
}
