//! Common test data and snapshot builders

use mina_monitor::errors::StatusQueryError;
use mina_monitor::{ContainerInfo, StatusSnapshot, SyncStatus};

pub const STATUS_URL: &str = "http://node:3085/graphql";

/// Common container names of a node deployment
pub mod containers {
    pub const NODE: &str = "mina-node";
    pub const SIDECAR: &str = "mina-sidecar";
    pub const ARCHIVE_NODE: &str = "archive-node";
    pub const MONITOR: &str = "mina-monitor";
    pub const POSTGRES: &str = "postgres";
}

/// Snapshot whose heights are fully converged
pub fn snapshot(status: SyncStatus) -> StatusSnapshot {
    snapshot_with_heights(status, 1000, 1000)
}

pub fn snapshot_with_heights(
    status: SyncStatus,
    highest_block: i64,
    highest_unvalidated_block: i64,
) -> StatusSnapshot {
    StatusSnapshot {
        sync_status: status,
        uptime_seconds: 3600,
        blockchain_length: highest_block,
        highest_block_received: highest_block,
        highest_unvalidated_block_received: highest_unvalidated_block,
        next_block_production: Vec::new(),
    }
}

pub fn container(id: &str, name: &str) -> ContainerInfo {
    ContainerInfo {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// The usual deployment: node, sidecar, archive, monitor and database
pub fn deployment_containers() -> Vec<ContainerInfo> {
    vec![
        container("a1", containers::NODE),
        container("b2", containers::SIDECAR),
        container("c3", containers::ARCHIVE_NODE),
        container("d4", containers::MONITOR),
        container("e5", containers::POSTGRES),
    ]
}

pub fn unreachable() -> StatusQueryError {
    StatusQueryError::Unreachable {
        url: STATUS_URL.to_string(),
        reason: "connection refused".to_string(),
    }
}

pub fn bad_status(status: u16) -> StatusQueryError {
    StatusQueryError::BadStatus {
        url: STATUS_URL.to_string(),
        status,
    }
}

pub fn unusable_status() -> StatusQueryError {
    StatusQueryError::UnusableStatus {
        url: STATUS_URL.to_string(),
        reason: "unknown variant `LISTENING`".to_string(),
    }
}
