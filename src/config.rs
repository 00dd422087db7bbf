// src/config.rs
//! Service configuration: fixture directory, refresh period, bind address.
//! Loaded from TOML with env overrides so deployments can retarget the data
//! directory without editing files.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";
pub const ENV_CONFIG_PATH: &str = "DASHBOARD_CONFIG_PATH";
pub const ENV_DATA_DIR: &str = "DASHBOARD_DATA_DIR";
pub const ENV_REFRESH_SECS: &str = "DASHBOARD_REFRESH_SECS";

/// 30s, the period the dashboard page refreshed on.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub refresh_secs: u64,
    pub bind: String,
    pub auto_refresh: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            refresh_secs: DEFAULT_REFRESH_SECS,
            bind: "0.0.0.0:8000".to_string(),
            auto_refresh: true,
        }
    }
}

impl DashboardConfig {
    /// Load from an explicit TOML path, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(cfg.with_env_overrides())
    }

    /// Load using env + fallbacks:
    /// 1) $DASHBOARD_CONFIG_PATH
    /// 2) config/dashboard.toml
    /// 3) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            bail!("DASHBOARD_CONFIG_PATH points to non-existent path");
        }
        let default = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default.exists() {
            return Self::load_from(&default);
        }
        Ok(Self::default().with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = env::var(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }
        if let Some(secs) = env::var(ENV_REFRESH_SECS)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
        {
            if secs > 0 {
                self.refresh_secs = secs;
            }
        }
        self
    }

    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}
