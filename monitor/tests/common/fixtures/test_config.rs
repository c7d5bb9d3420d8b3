//! Test configuration builder writing `main.toml` into a temp directory

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestConfigBuilder {
    temp_dir: TempDir,
    lines: Vec<String>,
    thresholds: Vec<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            lines: Vec::new(),
            thresholds: Vec::new(),
        }
    }

    /// Add a top-level `key = value` line (value is raw TOML)
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.lines.push(format!("{} = {}", key, value));
        self
    }

    /// Add a `[thresholds]` entry
    pub fn with_threshold(mut self, key: &str, value: u64) -> Self {
        self.thresholds.push(format!("{} = {}", key, value));
        self
    }

    pub fn to_toml(&self) -> String {
        let mut toml = self.lines.join("\n");
        if !self.thresholds.is_empty() {
            toml.push_str("\n\n[thresholds]\n");
            toml.push_str(&self.thresholds.join("\n"));
        }
        toml.push('\n');
        toml
    }

    /// Write `config/main.toml` and return the config directory
    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::write(config_dir.join("main.toml"), self.to_toml()).expect("Failed to write main.toml");

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestConfig {
    pub fn config_dir_string(&self) -> String {
        self.config_dir.to_string_lossy().to_string()
    }
}
