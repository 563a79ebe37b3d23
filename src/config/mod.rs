//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::fetch::{LeaderboardClientConfig, DEFAULT_BASE_URL, DEFAULT_SEASON};
use crate::parse_duration;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Leaderboard API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root URL of the leaderboard API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Season path segment
    #[serde(default = "default_season")]
    pub season: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_season() -> String {
    DEFAULT_SEASON.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("finals-stats/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            season: default_season(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ApiConfig {
    /// Client configuration for these settings.
    pub fn client_config(&self) -> Result<LeaderboardClientConfig, ConfigError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::ValidationError(format!("Invalid API base URL {}: {}", self.base_url, e))
        })?;

        Ok(LeaderboardClientConfig {
            base_url,
            season: self.season.clone(),
            timeout: Duration::from_secs(self.timeout_seconds),
            user_agent: self.user_agent.clone(),
        })
    }
}

/// Dashboard presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Players listed per platform
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// How often `serve` reloads the leaderboards (e.g. "10m")
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,
}

fn default_list_limit() -> usize {
    100
}

fn default_refresh_interval() -> String {
    "10m".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Option<Duration> {
        parse_duration(&self.refresh_interval)
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api: ApiConfig::default(),
            dashboard: DashboardConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.client_config()?;

        if self.api.season.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "API season must not be empty".to_string(),
            ));
        }

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "API timeout must be greater than 0".to_string(),
            ));
        }

        if self.dashboard.list_limit == 0 {
            return Err(ConfigError::ValidationError(
                "Dashboard list limit must be greater than 0".to_string(),
            ));
        }

        match self.dashboard.refresh_interval() {
            None => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid refresh interval: {}",
                    self.dashboard.refresh_interval
                )));
            }
            Some(interval) if interval.is_zero() => {
                return Err(ConfigError::ValidationError(
                    "Refresh interval must be greater than 0".to_string(),
                ));
            }
            Some(_) => {}
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
