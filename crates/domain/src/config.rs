//! Configuration structures
//!
//! Populated by the infra config loader from environment variables or a
//! JSON/TOML file.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_REFRESH_CRON, DEFAULT_REFRESH_JOB_TIMEOUT_SECS,
    DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{FaceLinkError, Result};

/// Application key pair issued by the provider console.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub app_key: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(app_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self { app_key: app_key.into(), secret_key: secret_key.into() }
    }

    /// Reject blank keys before they reach the token endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.app_key.trim().is_empty() {
            return Err(FaceLinkError::Config("app_key must not be empty".into()));
        }
        if self.secret_key.trim().is_empty() {
            return Err(FaceLinkError::Config("secret_key must not be empty".into()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_key", &self.app_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// HTTP settings for the provider API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

/// Token refresh schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshSettings {
    /// Six-field cron expression (seconds first), evaluated in UTC.
    pub cron_expression: String,
    pub refresh_on_start: bool,
    pub enabled: bool,
    pub job_timeout_seconds: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            cron_expression: DEFAULT_REFRESH_CRON.to_string(),
            refresh_on_start: true,
            enabled: true,
            job_timeout_seconds: DEFAULT_REFRESH_JOB_TIMEOUT_SECS,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub credentials: Credentials,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials, api: ApiSettings::default(), refresh: RefreshSettings::default() }
    }
}
