/*
[INPUT]:  YAML configuration file and CLI/env overrides
[OUTPUT]: Parsed application configuration (owner, API endpoint, UI timings)
[POS]:    Configuration layer - bootstrap
[UPDATE]: When adding new configuration options
*/

use std::num::NonZeroU64;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use taskdeck_adapter::ClientConfig;
use taskdeck_adapter::http::client::DEFAULT_BASE_URL;

/// Top-level configuration for taskdeck
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Owner whose tasks are listed and created; absent or 0 means unconfigured
    #[serde(default)]
    pub owner_id: Option<u64>,
    /// Remote todo collection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Presentation timings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote todo collection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL the `todos` collection lives under
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Presentation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// How long an error notification stays visible
    #[serde(default = "default_error_dismiss_ms")]
    pub error_dismiss_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            error_dismiss_ms: default_error_dismiss_ms(),
        }
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub owner_id: Option<u64>,
    pub api_url: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_error_dismiss_ms() -> u64 {
    3000
}

impl AppConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).context("parse config yaml")?;
        Ok(config)
    }

    /// Overrides win over whatever the file said
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(owner_id) = overrides.owner_id {
            self.owner_id = Some(owner_id);
        }
        if let Some(api_url) = overrides.api_url.as_ref() {
            self.api.base_url = api_url.clone();
        }
    }

    /// Configured owner, or `None` when the warning screen should be shown
    pub fn owner(&self) -> Option<NonZeroU64> {
        self.owner_id.and_then(NonZeroU64::new)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    pub fn error_dismiss(&self) -> Duration {
        Duration::from_millis(self.ui.error_dismiss_ms)
    }

    /// Reject values that would make the client or timers unusable
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url)
            .with_context(|| format!("invalid api.base_url: {}", self.api.base_url))?;
        if self.api.timeout_secs == 0 {
            return Err(anyhow!("api.timeout_secs must be greater than zero"));
        }
        if self.api.connect_timeout_secs == 0 {
            return Err(anyhow!("api.connect_timeout_secs must be greater than zero"));
        }
        if self.ui.error_dismiss_ms == 0 {
            return Err(anyhow!("ui.error_dismiss_ms must be greater than zero"));
        }
        Ok(())
    }
}
