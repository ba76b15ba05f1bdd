use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{ProtectedHosts, DEFAULT_PROTECTED_HOSTS};
use crate::staleness::{StalenessGate, DEFAULT_RECHECK_INTERVAL_DAYS};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Probe parameters (optional `[probe]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Timeout for the initial HEAD request.
    pub head_timeout_secs: u64,
    /// Timeout for each GET request (throttle retry and fallback).
    pub get_timeout_secs: u64,
    /// Pause before re-trying with GET after a 429 on HEAD.
    pub throttle_backoff_ms: u64,
    /// Browser-like User-Agent sent with every request.
    pub user_agent: String,
    /// Additional request headers as "Name: value" lines.
    pub extra_headers: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            head_timeout_secs: 10,
            get_timeout_secs: 15,
            throttle_backoff_ms: 2000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            extra_headers: vec![
                "Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .to_string(),
                "Accept-Language: en-US,en;q=0.9".to_string(),
                "Upgrade-Insecure-Requests: 1".to_string(),
            ],
        }
    }
}

impl ProbeConfig {
    pub fn head_timeout(&self) -> Duration {
        Duration::from_secs(self.head_timeout_secs)
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.get_timeout_secs)
    }

    pub fn throttle_backoff(&self) -> Duration {
        Duration::from_millis(self.throttle_backoff_ms)
    }
}

/// Global configuration loaded from `~/.config/blogwatch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogwatchConfig {
    /// Registry JSON file; relative paths resolve against the working directory.
    pub registry_path: PathBuf,
    /// Entries checked more recently than this are skipped unless forced.
    pub recheck_interval_days: u32,
    /// Delay between consecutive probes in one run.
    pub pacing_delay_ms: u64,
    /// Hosts whose bot-defense responses keep an entry active.
    pub protected_hosts: Vec<String>,
    pub probe: ProbeConfig,
}

impl Default for BlogwatchConfig {
    fn default() -> Self {
        Self {
            registry_path: PathBuf::from("data/blogs.json"),
            recheck_interval_days: DEFAULT_RECHECK_INTERVAL_DAYS,
            pacing_delay_ms: 500,
            protected_hosts: DEFAULT_PROTECTED_HOSTS
                .iter()
                .map(|h| h.to_string())
                .collect(),
            probe: ProbeConfig::default(),
        }
    }
}

impl BlogwatchConfig {
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn staleness_gate(&self) -> StalenessGate {
        StalenessGate::new(self.recheck_interval_days)
    }

    pub fn protected_hosts(&self) -> ProtectedHosts {
        ProtectedHosts::new(&self.protected_hosts)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("blogwatch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BlogwatchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BlogwatchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file (e.g. `--config`).
pub fn load_from(path: &Path) -> Result<BlogwatchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: BlogwatchConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
