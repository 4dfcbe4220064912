// SPDX-License-Identifier: Apache-2.0

//! Configuration management for github-status.
//!
//! Provides layered settings from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `GITHUB_STATUS_`)
//! 2. Settings file: `~/.config/github-status/config.toml`
//! 3. Built-in defaults
//!
//! The list of repositories to report on lives in a separate YAML file,
//! see [`crate::queries`].
//!
//! # Examples
//!
//! ```bash
//! # Required OAuth client identifier
//! GITHUB_STATUS_CLIENT_ID=Iv1.0123456789abcdef github-status
//!
//! # Point at another repositories file
//! GITHUB_STATUS_CONFIGURATION=~/work/status.yaml github-status
//!
//! # Nested keys use a double underscore
//! GITHUB_STATUS_REPORT__STALE_AFTER_DAYS=14 github-status
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::StatusError;

/// Environment variable holding the OAuth client identifier.
pub const CLIENT_ID_ENV: &str = "GITHUB_STATUS_CLIENT_ID";

/// Environment variable overriding the repositories file path.
pub const CONFIGURATION_ENV: &str = "GITHUB_STATUS_CONFIGURATION";

/// Environment variable overriding the cached token path.
pub const TOKEN_PATH_ENV: &str = "GITHUB_STATUS_TOKEN_PATH";

/// Prefix shared by every settings environment variable.
const ENV_PREFIX: &str = "GITHUB_STATUS";

/// Application settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// OAuth client identifier used for the device flow.
    pub client_id: Option<String>,
    /// Path of the YAML repositories file.
    pub configuration: Option<PathBuf>,
    /// Path of the cached token file.
    pub token_path: Option<PathBuf>,
    /// GitHub API settings.
    pub github: GitHubConfig,
    /// Device flow settings.
    pub auth: AuthConfig,
    /// Report settings.
    pub report: ReportConfig,
}

impl AppConfig {
    /// Returns the OAuth client identifier.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::Config` when `GITHUB_STATUS_CLIENT_ID` is unset or empty.
    pub fn require_client_id(&self) -> crate::Result<SecretString> {
        match self.client_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(SecretString::from(id.to_string())),
            _ => Err(StatusError::config(format!(
                "{CLIENT_ID_ENV} environment variable is not set"
            ))),
        }
    }

    /// Resolves the repositories file path.
    ///
    /// An explicit path (from the command line) wins over the
    /// `GITHUB_STATUS_CONFIGURATION` setting, which wins over
    /// `~/.github-status-configuration.yaml`.
    pub fn repositories_path(&self, explicit: Option<&Path>) -> crate::Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.configuration {
            return Ok(path.clone());
        }
        Ok(home_dir()?.join(".github-status-configuration.yaml"))
    }

    /// Resolves the cached token path.
    pub fn token_path(&self) -> crate::Result<PathBuf> {
        match &self.token_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("token.json")),
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL.
    pub api_url: String,
    /// OAuth (device flow) base URL.
    pub oauth_url: String,
    /// API request timeout in seconds.
    pub api_timeout_seconds: u64,
    /// Number of runs requested per repository.
    pub per_page: u8,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            oauth_url: "https://github.com".to_string(),
            api_timeout_seconds: 10,
            per_page: 30,
        }
    }
}

/// Device flow settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// OAuth scopes requested from GitHub.
    pub scopes: Vec<String>,
    /// Open the verification URL in a browser.
    pub open_browser: bool,
    /// Give up after this many token polls (unbounded when unset).
    pub max_poll_attempts: Option<u32>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            scopes: vec!["workflow".to_string(), "repo".to_string()],
            open_browser: true,
            max_poll_attempts: None,
        }
    }
}

/// Report settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Runs older than this many days are highlighted.
    pub stale_after_days: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            stale_after_days: 30,
        }
    }
}

fn home_dir() -> crate::Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| StatusError::config("Could not determine home directory - is HOME set?"))
}

/// Returns the github-status configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/github-status`.
pub fn config_dir() -> crate::Result<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return Ok(PathBuf::from(xdg_config).join("github-status"));
    }
    Ok(home_dir()?.join(".config").join("github-status"))
}

/// Returns the github-status data directory.
///
/// Respects the `XDG_DATA_HOME` environment variable if set,
/// otherwise defaults to `~/.local/share/github-status`.
pub fn data_dir() -> crate::Result<PathBuf> {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME")
        && !xdg_data.is_empty()
    {
        return Ok(PathBuf::from(xdg_data).join("github-status"));
    }
    Ok(home_dir()?.join(".local").join("share").join("github-status"))
}

/// Returns the path to the settings file.
pub fn config_file_path() -> crate::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Load application settings.
///
/// Loads from the settings file (if it exists) and environment variables.
/// Environment variables use the prefix `GITHUB_STATUS_` and a double
/// underscore for nested keys (e.g., `GITHUB_STATUS_GITHUB__PER_PAGE`).
///
/// The client id and paths are read verbatim, never parsed as numbers.
///
/// # Errors
///
/// Returns `StatusError::Config` if the settings file exists but is invalid.
pub fn load_config() -> crate::Result<AppConfig> {
    let config_path = config_file_path()?;

    let config = Config::builder()
        // Load from settings file (optional - may not exist)
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("auth.scopes")
                .try_parsing(true),
        )
        .set_override_option("client_id", env_string(CLIENT_ID_ENV))?
        .set_override_option("configuration", env_string(CONFIGURATION_ENV))?
        .set_override_option("token_path", env_string(TOKEN_PATH_ENV))?
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}
