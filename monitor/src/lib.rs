pub mod config;
pub mod constants;
pub mod container;
pub mod errors;
pub mod health;
pub mod monitor;
pub mod restart;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigManager, SyncThresholds};
pub use container::{ContainerInfo, ContainerRuntime, DockerCli};
pub use health::{
    CycleOutcome, GraphQlStatusClient, RestartReason, StatusSnapshot, StatusSource,
    SyncStateTracker, SyncStatus,
};
pub use monitor::{MonitorLoop, MonitorReport, SharedReport};
pub use restart::{RestartCoordinator, RestartSummary};
