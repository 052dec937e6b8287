use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    mock::DEFAULT_DAYS,
    provider::{DEFAULT_ENDPOINT, DEFAULT_LOCAL_DELAY, ProviderMode},
};

pub const DEFAULT_BASE_URL: &str = "https://localhost:7154";
pub const BASE_URL_ENV: &str = "FORECAST_API_BASE_URL";

/// Where the remote forecast API lives.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Shape of synthesized data.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MockSettings {
    pub days: Option<usize>,
    pub local_delay_ms: Option<u64>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// "remote" or "local". Absent means remote.
    pub mode: Option<ProviderMode>,

    /// Example TOML:
    /// [api]
    /// base_url = "https://localhost:7154"
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub mock: MockSettings,
}

impl Config {
    pub fn mode(&self) -> ProviderMode {
        self.mode.unwrap_or_default()
    }

    pub fn set_mode(&mut self, mode: ProviderMode) {
        self.mode = Some(mode);
    }

    /// Base URL from the environment, then the file, then the built-in default.
    pub fn base_url(&self) -> String {
        self.base_url_with_override(std::env::var(BASE_URL_ENV).ok())
    }

    pub fn base_url_with_override(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn set_base_url(&mut self, base_url: String) {
        self.api.base_url = Some(base_url);
    }

    pub fn endpoint(&self) -> &str {
        self.api.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }

    pub fn days(&self) -> usize {
        self.mock.days.unwrap_or(DEFAULT_DAYS)
    }

    pub fn local_delay(&self) -> Duration {
        self.mock.local_delay_ms.map(Duration::from_millis).unwrap_or(DEFAULT_LOCAL_DELAY)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast-demo", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
