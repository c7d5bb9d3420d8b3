//! Status snapshot types, GraphQL response structures and cycle outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Synchronization phase the node reports about itself
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncStatus {
    Synced,
    Connecting,
    Offline,
    Catchup,
    Bootstrap,
}

impl SyncStatus {
    pub const ALL: [SyncStatus; 5] = [
        SyncStatus::Synced,
        SyncStatus::Connecting,
        SyncStatus::Offline,
        SyncStatus::Catchup,
        SyncStatus::Bootstrap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Synced => "SYNCED",
            SyncStatus::Connecting => "CONNECTING",
            SyncStatus::Offline => "OFFLINE",
            SyncStatus::Catchup => "CATCHUP",
            SyncStatus::Bootstrap => "BOOTSTRAP",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One successful status query, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub sync_status: SyncStatus,
    pub uptime_seconds: i64,
    pub blockchain_length: i64,
    pub highest_block_received: i64,
    pub highest_unvalidated_block_received: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_block_production: Vec<String>,
}

impl StatusSnapshot {
    /// How far the highest unvalidated block runs ahead of the highest block
    pub fn unvalidated_block_lead(&self) -> i64 {
        self.highest_unvalidated_block_received
            .saturating_sub(self.highest_block_received)
    }
}

impl From<DaemonStatus> for StatusSnapshot {
    // The node reports null heights until it has a view of the chain
    fn from(status: DaemonStatus) -> Self {
        Self {
            sync_status: status.sync_status,
            uptime_seconds: status.uptime_secs.unwrap_or(0),
            blockchain_length: status.blockchain_length.unwrap_or(0),
            highest_block_received: status.highest_block_length_received.unwrap_or(0),
            highest_unvalidated_block_received: status
                .highest_unvalidated_block_length_received
                .unwrap_or(0),
            next_block_production: status
                .next_block_production
                .map(|p| p.times.into_iter().map(|t| t.start_time).collect())
                .unwrap_or_default(),
        }
    }
}

/// GraphQL response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<DaemonStatusData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaemonStatusData {
    #[serde(rename = "daemonStatus")]
    pub daemon_status: DaemonStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonStatus {
    pub sync_status: SyncStatus,
    pub uptime_secs: Option<i64>,
    pub blockchain_length: Option<i64>,
    pub highest_block_length_received: Option<i64>,
    pub highest_unvalidated_block_length_received: Option<i64>,
    pub next_block_production: Option<NextBlockProduction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NextBlockProduction {
    #[serde(default)]
    pub times: Vec<BlockProductionTime>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockProductionTime {
    pub start_time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Why the node has to be restarted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestartReason {
    StuckConnecting { cycles: u64, max_cycles: u64 },
    StuckCatchup { cycles: u64, max_cycles: u64 },
    StuckBootstrap { cycles: u64, max_cycles: u64 },
    BlockLead { lead: i64, max_lead: i64 },
    RetriesExhausted { attempts: u32 },
}

impl fmt::Display for RestartReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestartReason::StuckConnecting { cycles, max_cycles } => write!(
                f,
                "node has been too long in the CONNECTING state ({} cycles, max {})",
                cycles, max_cycles
            ),
            RestartReason::StuckCatchup { cycles, max_cycles } => write!(
                f,
                "node has been too long in the CATCHUP state ({} cycles, max {})",
                cycles, max_cycles
            ),
            RestartReason::StuckBootstrap { cycles, max_cycles } => write!(
                f,
                "node has been too long in the BOOTSTRAP state ({} cycles, max {})",
                cycles, max_cycles
            ),
            RestartReason::BlockLead { lead, max_lead } => write!(
                f,
                "highest unvalidated block is {} ahead of the highest block (max {})",
                lead, max_lead
            ),
            RestartReason::RetriesExhausted { attempts } => {
                write!(f, "status query failed {} times in a row", attempts)
            }
        }
    }
}

/// Result of one poll cycle; the loop dispatches on this tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Continue,
    Bootstrapping,
    Restart(RestartReason),
    Unreachable(String),
    /// The node answered without a status it can be judged by
    StatusUnavailable(String),
}

impl CycleOutcome {
    pub fn is_restart(&self) -> bool {
        matches!(self, CycleOutcome::Restart(_))
    }
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::Continue => f.write_str("continue"),
            CycleOutcome::Bootstrapping => f.write_str("bootstrapping"),
            CycleOutcome::Restart(reason) => write!(f, "restart: {}", reason),
            CycleOutcome::Unreachable(reason) => write!(f, "unreachable: {}", reason),
            CycleOutcome::StatusUnavailable(reason) => {
                write!(f, "status unavailable: {}", reason)
            }
        }
    }
}
