pub mod manager;
use serde::{Deserialize, Serialize};
use std::time::Duration;
pub use manager::ConfigManager;

use crate::constants::{cadence, containers, http, thresholds};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_status_url")]
    pub status_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_retry_count")]
    pub max_retry_count: u32,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_restart_backoff")]
    pub restart_backoff_seconds: u64,
    #[serde(default = "default_unreachable_backoff")]
    pub unreachable_backoff_seconds: u64,
    #[serde(default = "default_container_name_patterns")]
    pub container_name_patterns: Vec<String>,
    #[serde(default = "default_docker_binary")]
    pub docker_binary: String,
    #[serde(default = "default_docker_timeout")]
    pub docker_timeout_seconds: u64,
    // Status endpoint stays off unless an address is configured
    pub status_server_address: Option<String>,
    #[serde(default)]
    pub thresholds: SyncThresholds,
}

/// Stuck-state thresholds, counted in poll cycles rather than wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncThresholds {
    #[serde(default = "default_connecting_max_cycles")]
    pub connecting_max_cycles: u64,
    #[serde(default = "default_catchup_max_cycles")]
    pub catchup_max_cycles: u64,
    #[serde(default = "default_bootstrap_max_cycles")]
    pub bootstrap_max_cycles: u64,
    #[serde(default = "default_max_unvalidated_block_lead")]
    pub max_unvalidated_block_lead: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status_url: default_status_url(),
            request_timeout_seconds: default_request_timeout(),
            max_retry_count: default_max_retry_count(),
            poll_interval_seconds: default_poll_interval(),
            restart_backoff_seconds: default_restart_backoff(),
            unreachable_backoff_seconds: default_unreachable_backoff(),
            container_name_patterns: default_container_name_patterns(),
            docker_binary: default_docker_binary(),
            docker_timeout_seconds: default_docker_timeout(),
            status_server_address: None,
            thresholds: SyncThresholds::default(),
        }
    }
}

impl Default for SyncThresholds {
    fn default() -> Self {
        Self {
            connecting_max_cycles: default_connecting_max_cycles(),
            catchup_max_cycles: default_catchup_max_cycles(),
            bootstrap_max_cycles: default_bootstrap_max_cycles(),
            max_unvalidated_block_lead: default_max_unvalidated_block_lead(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status_url.trim().is_empty() {
            return Err(invalid("status_url", "must not be empty"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(invalid("request_timeout_seconds", "must be greater than 0"));
        }
        if self.max_retry_count == 0 {
            return Err(invalid("max_retry_count", "must allow at least one attempt"));
        }
        if self.poll_interval_seconds == 0 {
            return Err(invalid("poll_interval_seconds", "must be greater than 0"));
        }
        if self.container_name_patterns.is_empty() {
            return Err(invalid(
                "container_name_patterns",
                "at least one pattern is required",
            ));
        }
        if self.container_name_patterns.iter().any(|p| p.is_empty()) {
            return Err(invalid(
                "container_name_patterns",
                "an empty pattern would match every container",
            ));
        }
        if self.docker_timeout_seconds == 0 {
            return Err(invalid("docker_timeout_seconds", "must be greater than 0"));
        }
        if self.thresholds.max_unvalidated_block_lead < 0 {
            return Err(invalid("thresholds.max_unvalidated_block_lead", "must not be negative"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_seconds)
    }

    pub fn restart_backoff(&self) -> Duration {
        Duration::from_secs(self.restart_backoff_seconds)
    }

    pub fn unreachable_backoff(&self) -> Duration {
        Duration::from_secs(self.unreachable_backoff_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn docker_timeout(&self) -> Duration {
        Duration::from_secs(self.docker_timeout_seconds)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn default_status_url() -> String {
    http::STATUS_URL.to_string()
}

fn default_request_timeout() -> u64 {
    http::REQUEST_TIMEOUT_SECONDS
}

fn default_max_retry_count() -> u32 {
    http::MAX_RETRY_COUNT
}

fn default_poll_interval() -> u64 {
    cadence::POLL_INTERVAL_SECONDS
}

fn default_restart_backoff() -> u64 {
    cadence::RESTART_BACKOFF_SECONDS
}

fn default_unreachable_backoff() -> u64 {
    cadence::UNREACHABLE_BACKOFF_SECONDS
}

fn default_container_name_patterns() -> Vec<String> {
    containers::NAME_PATTERNS
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_docker_binary() -> String {
    containers::DOCKER_BINARY.to_string()
}

fn default_docker_timeout() -> u64 {
    containers::COMMAND_TIMEOUT_SECONDS
}

fn default_connecting_max_cycles() -> u64 {
    thresholds::CONNECTING_MAX_CYCLES
}

fn default_catchup_max_cycles() -> u64 {
    thresholds::CATCHUP_MAX_CYCLES
}

fn default_bootstrap_max_cycles() -> u64 {
    thresholds::BOOTSTRAP_MAX_CYCLES
}

fn default_max_unvalidated_block_lead() -> i64 {
    thresholds::MAX_UNVALIDATED_BLOCK_LEAD
}
