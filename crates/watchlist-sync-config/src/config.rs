use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Tunables for the feed transport. The retry floor is the wait before the
/// single retry of a failed page request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeedConfig {
    #[serde(default = "default_page_cap")]
    pub page_cap: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_retry_floor_ms")]
    pub retry_floor_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SchedulerConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    #[serde(default = "default_true")]
    pub run_on_startup: bool,
}

fn default_page_cap() -> usize {
    50
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_retry_floor_ms() -> u64 {
    300
}

fn default_interval_secs() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_cap: default_page_cap(),
            request_timeout_secs: default_request_timeout_secs(),
            retry_floor_ms: default_retry_floor_ms(),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            run_on_startup: default_true(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
