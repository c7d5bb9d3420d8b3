use super::Config;
use crate::constants::{cadence, config as config_files};
use crate::errors::{ConfigError, MonitorError};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self, MonitorError> {
        let config = Self::load_configuration(&config_dir).await?;
        config.validate()?;
        log_threshold_windows(&config);
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config, ConfigError> {
        let main_config_path = format!("{}/{}", config_dir, config_files::MAIN_CONFIG_FILE);

        if !Path::new(&main_config_path).exists() {
            info!(
                "No config file at {}, using built-in defaults",
                main_config_path
            );
            return Ok(Config::default());
        }

        debug!("Loading config: {}", main_config_path);

        let content = fs::read_to_string(&main_config_path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: main_config_path.clone(),
            reason: e.to_string(),
        })?;

        info!("Loaded configuration from {}", main_config_path);
        Ok(config)
    }
}

/// Thresholds are cycle counts; log what they amount to at the configured cadence.
fn log_threshold_windows(config: &Config) {
    let interval = config.poll_interval_seconds;
    let t = &config.thresholds;

    info!(
        "Polling {} every {}s (retry budget {}, timeout {}s)",
        config.status_url, interval, config.max_retry_count, config.request_timeout_seconds
    );
    info!(
        "Restart windows: CONNECTING > {} cycles (~{}m), CATCHUP > {} cycles (~{}m), BOOTSTRAP > {} cycles (~{}m), unvalidated lead > {}",
        t.connecting_max_cycles,
        t.connecting_max_cycles.saturating_mul(interval) / 60,
        t.catchup_max_cycles,
        t.catchup_max_cycles.saturating_mul(interval) / 60,
        t.bootstrap_max_cycles,
        t.bootstrap_max_cycles.saturating_mul(interval) / 60,
        t.max_unvalidated_block_lead
    );

    if interval != cadence::POLL_INTERVAL_SECONDS && *t == super::SyncThresholds::default() {
        warn!(
            "poll_interval_seconds is {} but thresholds are the defaults tuned for a {}s cadence; stuck-state windows are scaled accordingly",
            interval,
            cadence::POLL_INTERVAL_SECONDS
        );
    }
}
