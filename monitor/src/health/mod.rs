//! Health monitoring module
//!
//! Status queries against the node and the sync-state classifier.

pub mod status_client;
pub mod tracker;
pub mod types;

pub use status_client::{GraphQlStatusClient, StatusSource};
pub use tracker::{StateOccupancyCounters, SyncStateTracker};
pub use types::{CycleOutcome, RestartReason, StatusSnapshot, SyncStatus};
