//! Sync-state tracking and stuck-state detection
//!
//! Every successful snapshot bumps the occupancy counter of the status it
//! reports, then the counters and the snapshot are checked against the
//! thresholds in a fixed order. Counters only go back to zero when the node
//! is restarted.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

use super::types::{CycleOutcome, RestartReason, StatusSnapshot, SyncStatus};
use crate::config::SyncThresholds;

/// Poll cycles spent in each sync status since the last reset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateOccupancyCounters {
    counts: [u64; SyncStatus::ALL.len()],
}

impl StateOccupancyCounters {
    pub fn get(&self, status: SyncStatus) -> u64 {
        self.counts[status.index()]
    }

    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SyncStatus, u64)> + '_ {
        SyncStatus::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    pub fn to_map(&self) -> BTreeMap<SyncStatus, u64> {
        self.iter().collect()
    }

    fn increment(&mut self, status: SyncStatus) {
        let slot = &mut self.counts[status.index()];
        *slot = slot.saturating_add(1);
    }

    fn reset(&mut self) {
        self.counts = [0; SyncStatus::ALL.len()];
    }
}

impl Serialize for StateOccupancyCounters {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

pub struct SyncStateTracker {
    thresholds: SyncThresholds,
    counters: StateOccupancyCounters,
}

impl SyncStateTracker {
    pub fn new(thresholds: SyncThresholds) -> Self {
        Self {
            thresholds,
            counters: StateOccupancyCounters::default(),
        }
    }

    pub fn thresholds(&self) -> &SyncThresholds {
        &self.thresholds
    }

    pub fn counters(&self) -> &StateOccupancyCounters {
        &self.counters
    }

    /// Classify one snapshot. Never returns `Unreachable` or `StatusUnavailable`.
    pub fn classify(&mut self, snapshot: &StatusSnapshot) -> CycleOutcome {
        self.counters.increment(snapshot.sync_status);
        debug!("Status counters: {:?}", self.counters.to_map());

        let t = self.thresholds;

        let connecting = self.counters.get(SyncStatus::Connecting);
        if connecting > t.connecting_max_cycles {
            return self.restart(RestartReason::StuckConnecting {
                cycles: connecting,
                max_cycles: t.connecting_max_cycles,
            });
        }

        let catchup = self.counters.get(SyncStatus::Catchup);
        if catchup > t.catchup_max_cycles {
            return self.restart(RestartReason::StuckCatchup {
                cycles: catchup,
                max_cycles: t.catchup_max_cycles,
            });
        }

        let bootstrap = self.counters.get(SyncStatus::Bootstrap);
        if bootstrap > t.bootstrap_max_cycles {
            return self.restart(RestartReason::StuckBootstrap {
                cycles: bootstrap,
                max_cycles: t.bootstrap_max_cycles,
            });
        }

        // Heights have not converged yet while bootstrapping
        if snapshot.sync_status == SyncStatus::Bootstrap {
            debug!("Node is bootstrapping...");
            return CycleOutcome::Bootstrapping;
        }

        let lead = snapshot.unvalidated_block_lead();
        if lead > t.max_unvalidated_block_lead {
            return self.restart(RestartReason::BlockLead {
                lead,
                max_lead: t.max_unvalidated_block_lead,
            });
        }

        info!(
            "Node is {} (length {}, uptime {}s)",
            snapshot.sync_status, snapshot.blockchain_length, snapshot.uptime_seconds
        );
        CycleOutcome::Continue
    }

    /// The retry budget ran out without a status; no counter is touched.
    pub fn retries_exhausted(&self, attempts: u32) -> CycleOutcome {
        self.restart(RestartReason::RetriesExhausted { attempts })
    }

    pub fn reset(&mut self) {
        self.counters.reset();
        debug!("Status counters reset");
    }

    fn restart(&self, reason: RestartReason) -> CycleOutcome {
        error!("Restart condition: {}", reason);
        CycleOutcome::Restart(reason)
    }
}
