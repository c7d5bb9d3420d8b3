//! Central repository for deployment-time constants
//!
//! Values are grouped by concern. Every one of them can be overridden
//! from `config/main.toml`; these are the defaults the deployed monitor
//! has always run with.

use std::time::Duration;

/// Status query transport defaults
pub mod http {
    use super::Duration;

    /// GraphQL endpoint of the node inside the deployment network
    pub const STATUS_URL: &str = "http://node:3085/graphql";

    /// Per-attempt timeout for a status query
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 60;

    /// Sequential attempts per poll cycle before the node counts as out of sync
    pub const MAX_RETRY_COUNT: u32 = 5;

    /// Timeout for establishing the TCP connection to the node
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Loop cadence and backoff (in seconds)
pub mod cadence {
    /// Floor delay between two polls, applied after every cycle
    pub const POLL_INTERVAL_SECONDS: u64 = 5;

    /// Extra delay after a restart so the node has time to come up
    pub const RESTART_BACKOFF_SECONDS: u64 = 30;

    /// Extra delay while the node cannot be reached or has no usable status
    pub const UNREACHABLE_BACKOFF_SECONDS: u64 = 10;
}

/// Stuck-state thresholds, counted in poll cycles
pub mod thresholds {
    /// ~5 minutes at a 5 second cadence
    pub const CONNECTING_MAX_CYCLES: u64 = 60;

    /// ~45 minutes at a 5 second cadence
    pub const CATCHUP_MAX_CYCLES: u64 = 540;

    /// ~20 minutes at a 5 second cadence
    pub const BOOTSTRAP_MAX_CYCLES: u64 = 240;

    /// Allowed lead of the highest unvalidated block over the highest block
    pub const MAX_UNVALIDATED_BLOCK_LEAD: i64 = 2;
}

/// Container control defaults
pub mod containers {
    /// Container names containing any of these substrings are stopped on restart
    pub const NAME_PATTERNS: [&str; 2] = ["node", "sidecar"];

    /// Container runtime CLI
    pub const DOCKER_BINARY: &str = "docker";

    /// Deadline for one `docker ps` or `docker stop` call
    pub const COMMAND_TIMEOUT_SECONDS: u64 = 60;
}

/// Configuration file location
pub mod config {
    /// Directory holding `main.toml`
    pub const CONFIG_DIR: &str = "config";

    /// Main configuration file name
    pub const MAIN_CONFIG_FILE: &str = "main.toml";
}
