// SPDX-License-Identifier: Apache-2.0

//! Error types for github-status.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Application code should use `anyhow::Result` for top-level error handling
//! and downcast to [`StatusError`] when it needs to tell failures apart.

use thiserror::Error;

/// Errors that can occur while building a status report.
///
/// Every variant is fatal: the report is never printed partially.
#[derive(Error, Debug)]
pub enum StatusError {
    /// Settings, environment or repositories file problem.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// The OAuth device flow was rejected or could not complete.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message, usually GitHub's `error_description`.
        message: String,
    },

    /// GitHub API error from octocrab.
    #[error("GitHub API error for {repository}: {message}")]
    GitHub {
        /// Repository the request was made for.
        repository: String,
        /// Error message.
        message: String,
        /// HTTP status code, when GitHub answered at all.
        status: Option<u16>,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A requested workflow never matched a run on the selected branches.
    #[error("No runs for workflow '{workflow}' for repository '{repository}'")]
    MissingWorkflow {
        /// Requested workflow name.
        workflow: String,
        /// Repository in `owner/repo` format.
        repository: String,
        /// Whether the repository defines a workflow with that name, if known.
        defined: Option<bool>,
    },

    /// Repository argument is not in `owner/repo` format.
    #[error("Invalid repository '{0}' - expected owner/repo")]
    InvalidRepository(String),
}

impl StatusError {
    /// Shorthand for a [`StatusError::Config`] with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wraps an octocrab error raised while querying `repository`.
    #[must_use]
    pub fn github(repository: &str, err: &octocrab::Error) -> Self {
        let status = match err {
            octocrab::Error::GitHub { source, .. } => Some(source.status_code.as_u16()),
            _ => None,
        };
        Self::GitHub {
            repository: repository.to_string(),
            message: err.to_string(),
            status,
        }
    }
}

impl From<config::ConfigError> for StatusError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_workflow_names_workflow_and_repository() {
        let err = StatusError::MissingWorkflow {
            workflow: "build".to_string(),
            repository: "org/repo".to_string(),
            defined: None,
        };
        assert_eq!(
            err.to_string(),
            "No runs for workflow 'build' for repository 'org/repo'"
        );
    }

    #[test]
    fn test_config_shorthand() {
        let err = StatusError::config("missing GITHUB_STATUS_CLIENT_ID");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing GITHUB_STATUS_CLIENT_ID"
        );
    }
}
