//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If both keys are set in the environment, loads from environment variables
//! 2. Otherwise falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FACELINK_APP_KEY`: Application key (required)
//! - `FACELINK_SECRET_KEY`: Application secret (required)
//! - `FACELINK_BASE_URL`: Provider host
//! - `FACELINK_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `FACELINK_REFRESH_CRON`: Token refresh cron expression (six fields, UTC)
//! - `FACELINK_REFRESH_ON_START`: Refresh once at startup (true/false)
//! - `FACELINK_REFRESH_ENABLED`: Whether scheduled refresh runs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./facelink.json` or `./facelink.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use facelink_domain::{
    ApiSettings, Config, Credentials, FaceLinkError, RefreshSettings, Result,
};

const REQUIRED_VARS: [&str; 2] = ["FACELINK_APP_KEY", "FACELINK_SECRET_KEY"];

/// Load configuration with automatic fallback strategy
///
/// Uses environment variables when both required keys are present. Only when
/// a key is missing does it fall back to a config file; any other environment
/// error, such as an unparsable timeout, is returned as-is.
///
/// # Errors
/// Returns `FaceLinkError::Config` if:
/// - An environment variable has an invalid value
/// - No config file is found when the keys are absent
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    if REQUIRED_VARS.iter().all(|key| env_opt(key).is_some()) {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    tracing::debug!("Required environment variables not set, trying file");
    load_from_file(None)
}

/// Load configuration from environment variables
///
/// The key pair is required; everything else falls back to defaults.
///
/// # Errors
/// Returns `FaceLinkError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let credentials = Credentials::new(env_var("FACELINK_APP_KEY")?, env_var("FACELINK_SECRET_KEY")?);

    let mut api = ApiSettings::default();
    if let Some(base_url) = env_opt("FACELINK_BASE_URL") {
        api.base_url = base_url;
    }
    if let Some(timeout) = env_opt("FACELINK_TIMEOUT_SECS") {
        api.timeout_seconds = timeout
            .parse::<u64>()
            .map_err(|e| FaceLinkError::Config(format!("Invalid timeout: {e}")))?;
    }

    let defaults = RefreshSettings::default();
    let refresh = RefreshSettings {
        cron_expression: env_opt("FACELINK_REFRESH_CRON").unwrap_or(defaults.cron_expression),
        refresh_on_start: env_bool("FACELINK_REFRESH_ON_START", defaults.refresh_on_start),
        enabled: env_bool("FACELINK_REFRESH_ENABLED", defaults.enabled),
        job_timeout_seconds: defaults.job_timeout_seconds,
    };

    Ok(Config { credentials, api, refresh })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `FaceLinkError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FaceLinkError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FaceLinkError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FaceLinkError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FaceLinkError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FaceLinkError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(FaceLinkError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    const NAMES: [&str; 4] = ["config.json", "config.toml", "facelink.json", "facelink.toml"];

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(NAMES.iter().map(|name| cwd.join(name)));
        candidates.extend(NAMES.iter().map(|name| cwd.join("..").join(name)));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(NAMES.iter().map(|name| exe_dir.join(name)));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `FaceLinkError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        FaceLinkError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
