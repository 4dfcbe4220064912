// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # github-status core
//!
//! Core library for the `github-status` CLI: reports the latest GitHub
//! Actions runs for a set of repositories.
//!
//! This crate provides reusable components for:
//! - GitHub OAuth device flow and a cached access token
//! - Fetching workflow runs through the GitHub Actions API
//! - Per-repository filtering by branch, workflow and limit
//! - A sorted report model ready for rendering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use github_status_core::{ActionsClient, Report, collect_runs, load_config, resolve_queries};
//! use secrecy::SecretString;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = load_config()?;
//! let queries = resolve_queries(&[], &config.repositories_path(None)?)?;
//!
//! let token = SecretString::from("gho_...".to_string());
//! let client = ActionsClient::new(&token, &config.github)?;
//!
//! let runs = collect_runs(&client, &queries, |_| {}).await?;
//! let report = Report::build(runs, chrono::Utc::now(), chrono::Duration::days(30));
//! println!("{} rows", report.rows.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Settings loading and paths
//! - [`error`] - Error types
//! - [`github`] - GitHub API (device flow, Actions runs)
//! - [`queries`] - Repository queries and the repositories file
//! - [`filter`] - Branch, workflow and limit filtering
//! - [`report`] - Sorted report rows
//! - [`token`] - Cached access token

// ============================================================================
// Error Handling
// ============================================================================

pub use error::StatusError;

/// Convenience Result type for github-status operations.
///
/// This is equivalent to `std::result::Result<T, StatusError>`.
pub type Result<T> = std::result::Result<T, StatusError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{
    AppConfig, AuthConfig, CLIENT_ID_ENV, CONFIGURATION_ENV, GitHubConfig, ReportConfig,
    TOKEN_PATH_ENV, config_dir, config_file_path, data_dir, load_config,
};

// ============================================================================
// GitHub
// ============================================================================

pub use github::actions::{ActionsClient, RunSource, Workflow};
pub use github::device::{DeviceCodes, DeviceFlow, DeviceFlowTransport, GitHubDeviceTransport};
pub use github::parse_owner_repo;

// ============================================================================
// Runs and Queries
// ============================================================================

pub use queries::{DEFAULT_BRANCHES, RepositoriesFile, RepositoryQuery, load_queries, resolve_queries};
pub use runs::{Conclusion, StatusColor, WorkflowRun};

// ============================================================================
// Pipeline
// ============================================================================

pub use facade::collect_runs;
pub use filter::{FilteredRuns, filter_runs};
pub use report::{Report, ReportRow, sort_runs};
pub use token::TokenStore;

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod facade;
pub mod filter;
pub mod github;
pub mod queries;
pub mod report;
pub mod runs;
pub mod token;
