// Configuration loading.
// Reads config.toml from the platform config directory, then applies env overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::github::{DEFAULT_TIMEOUT, GITHUB_API_BASE};

/// Account shown when nothing else is configured.
pub const DEFAULT_ACCOUNT: &str = "octocat";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GitHubConfig,
    pub cache: CacheConfig,
    pub animation: AnimationConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    pub account: String,
    pub api_base: String,
    pub per_page: u32,
    pub timeout_secs: u64,
    /// Only ever taken from `GITHUB_TOKEN`, never written to disk.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            account: DEFAULT_ACCOUNT.to_string(),
            api_base: GITHUB_API_BASE.to_string(),
            per_page: 10,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    /// Overrides the platform cache directory.
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 5 * 60,
            dir: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Fraction of viewport height the element top must cross to arm.
    pub start: f64,
    pub end: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start: 0.85,
            end: 0.20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub submit_delay_ms: u64,
    pub reset_delay_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            reset_delay_ms: 3000,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parse a config file without env overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply `SHOWCASE_ACCOUNT` and `GITHUB_TOKEN` through the given lookup.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(account) = lookup("SHOWCASE_ACCOUNT").filter(|a| !a.trim().is_empty()) {
            self.github.account = account.trim().to_string();
        }
        if let Some(token) = lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()) {
            self.github.token = Some(token);
        }
    }
}

/// Path to config.toml (~/.config/showcase/config.toml on Linux).
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "showcase").map(|dirs| dirs.config_dir().join("config.toml"))
}
