//! Top-level control loop: poll → classify → act → wait
//!
//! A single task owns the tracker and the out-of-sync count. After every
//! cycle the loop publishes a [`MonitorReport`]; it is the only writer of
//! that report, so the status endpoint never sees a half-applied cycle.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::container::ContainerRuntime;
use crate::health::{CycleOutcome, StatusSnapshot, StatusSource, SyncStateTracker, SyncStatus};
use crate::restart::RestartCoordinator;

pub type SharedReport = Arc<RwLock<MonitorReport>>;

#[derive(Debug, Clone, Serialize)]
pub struct MonitorReport {
    pub status_url: String,
    pub started_at: DateTime<Utc>,
    pub cycles: u64,
    pub last_check: Option<DateTime<Utc>>,
    pub last_outcome: Option<String>,
    pub last_snapshot: Option<StatusSnapshot>,
    pub counters: BTreeMap<SyncStatus, u64>,
    pub out_of_sync_count: u64,
    pub last_restart: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl MonitorReport {
    pub fn new(status_url: &str) -> Self {
        Self {
            status_url: status_url.to_string(),
            started_at: Utc::now(),
            cycles: 0,
            last_check: None,
            last_outcome: None,
            last_snapshot: None,
            counters: SyncStatus::ALL.into_iter().map(|s| (s, 0)).collect(),
            out_of_sync_count: 0,
            last_restart: None,
            last_error: None,
        }
    }
}

pub struct MonitorLoop<S, R> {
    config: Arc<Config>,
    source: S,
    tracker: SyncStateTracker,
    coordinator: RestartCoordinator<R>,
    out_of_sync_count: u64,
    report: SharedReport,
}

impl<S: StatusSource, R: ContainerRuntime> MonitorLoop<S, R> {
    pub fn new(config: Arc<Config>, source: S, runtime: R) -> Self {
        let tracker = SyncStateTracker::new(config.thresholds);
        let coordinator = RestartCoordinator::new(runtime, config.container_name_patterns.clone());
        let report = Arc::new(RwLock::new(MonitorReport::new(&config.status_url)));

        Self {
            config,
            source,
            tracker,
            coordinator,
            out_of_sync_count: 0,
            report,
        }
    }

    pub fn report(&self) -> SharedReport {
        self.report.clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn tracker(&self) -> &SyncStateTracker {
        &self.tracker
    }

    pub fn coordinator(&self) -> &RestartCoordinator<R> {
        &self.coordinator
    }

    pub fn out_of_sync_count(&self) -> u64 {
        self.out_of_sync_count
    }

    /// One poll/classify/act step without any waiting.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let (outcome, snapshot) = self.poll_node().await;
        let mut cycle_error = None;

        match &outcome {
            CycleOutcome::Restart(reason) => {
                self.out_of_sync_count += 1;
                error!(
                    "Node is out of sync: {}. (OUTOFSYNC_COUNT={})",
                    reason, self.out_of_sync_count
                );
                if let Err(e) = self.coordinator.restart(&mut self.tracker).await {
                    error!("Node restart failed: {}", e);
                    cycle_error = Some(e.to_string());
                }
            }
            CycleOutcome::Unreachable(reason) => {
                error!("Node is not reachable: {}", reason);
            }
            CycleOutcome::StatusUnavailable(reason) => {
                warn!("Node answered without a usable status: {}", reason);
            }
            CycleOutcome::Continue | CycleOutcome::Bootstrapping => {}
        }

        self.publish(&outcome, snapshot, cycle_error).await;
        outcome
    }

    /// Query the node within the retry budget and classify the result.
    async fn poll_node(&mut self) -> (CycleOutcome, Option<StatusSnapshot>) {
        let budget = self.config.max_retry_count;
        let mut attempts = 0;

        while attempts < budget {
            match self.source.fetch_status().await {
                Ok(snapshot) => {
                    let outcome = self.tracker.classify(&snapshot);
                    return (outcome, Some(snapshot));
                }
                Err(e) if e.is_unreachable() => {
                    return (CycleOutcome::Unreachable(e.to_string()), None);
                }
                Err(e) if e.is_unusable_status() => {
                    return (CycleOutcome::StatusUnavailable(e.to_string()), None);
                }
                Err(e) => {
                    attempts += 1;
                    debug!(
                        "Node status check failed ({}/{}): {}. Retrying...",
                        attempts, budget, e
                    );
                }
            }
        }

        (self.tracker.retries_exhausted(attempts), None)
    }

    /// Total wait after a cycle: the poll interval plus the outcome's extra delay.
    pub fn backoff_for(&self, outcome: &CycleOutcome) -> Duration {
        let extra = match outcome {
            CycleOutcome::Restart(_) => self.config.restart_backoff(),
            CycleOutcome::Unreachable(_) | CycleOutcome::StatusUnavailable(_) => {
                self.config.unreachable_backoff()
            }
            CycleOutcome::Continue | CycleOutcome::Bootstrapping => Duration::ZERO,
        };
        extra + self.config.poll_interval()
    }

    /// Run until `shutdown` flips to true or its sender is dropped.
    /// Returns the number of restart decisions made.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        info!("mina-monitor started");

        loop {
            if *shutdown.borrow() {
                break;
            }

            let outcome = self.run_cycle().await;
            let delay = self.backoff_for(&outcome);
            debug!("Cycle outcome: {}; next poll in {:?}", outcome, delay);

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!(
            "mina-monitor stopped (OUTOFSYNC_COUNT={})",
            self.out_of_sync_count
        );
        self.out_of_sync_count
    }

    async fn publish(
        &self,
        outcome: &CycleOutcome,
        snapshot: Option<StatusSnapshot>,
        cycle_error: Option<String>,
    ) {
        let now = Utc::now();
        let mut report = self.report.write().await;

        report.cycles += 1;
        report.last_check = Some(now);
        report.last_outcome = Some(outcome.to_string());
        if snapshot.is_some() {
            report.last_snapshot = snapshot;
        }
        report.counters = self.tracker.counters().to_map();
        report.out_of_sync_count = self.out_of_sync_count;
        if outcome.is_restart() {
            report.last_restart = Some(now);
        }
        if cycle_error.is_some() {
            report.last_error = cycle_error;
        }
    }
}
