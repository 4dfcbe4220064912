// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `StatusError` and adds a hint for each
//! kind of failure. The core library only carries structured error data.

use std::fmt::Write;

use anyhow::Error;
use github_status_core::config::{CLIENT_ID_ENV, CONFIGURATION_ENV, config_file_path};
use github_status_core::error::StatusError;

/// Formats an error for CLI display with helpful hints.
///
/// Errors that are not a `StatusError` are printed with their full context
/// chain.
pub fn format_error(error: &Error) -> String {
    let Some(status_err) = error.downcast_ref::<StatusError>() else {
        return format!("{error:#}");
    };

    match status_err {
        StatusError::Config { .. } => {
            let mut msg = format!("{error:#}");
            msg.push_str("\n\nTip: Settings come from ");
            if let Ok(path) = config_file_path() {
                let _ = write!(msg, "{} and ", path.display());
            }
            let _ = write!(
                msg,
                "GITHUB_STATUS_* environment variables. {CLIENT_ID_ENV} is required; \
                 {CONFIGURATION_ENV} or --config selects the repositories file."
            );
            msg
        }
        StatusError::Authentication { .. } => {
            format!("{status_err}\n\nTip: Run again with --reauthenticate to start a new device flow.")
        }
        StatusError::GitHub { status, .. } => {
            let mut msg = status_err.to_string();
            if let Some(code) = status {
                let _ = write!(msg, " (HTTP {code})");
            }
            match status {
                Some(401 | 403) => msg.push_str(
                    "\n\nTip: The cached token may have expired or been revoked. Run again with --reauthenticate.",
                ),
                Some(404) => msg.push_str(
                    "\n\nTip: Check the repository name and that your token can access it.",
                ),
                _ => {}
            }
            msg
        }
        StatusError::Network(_) => {
            format!("{status_err}\n\nTip: Check your internet connection and try again.")
        }
        StatusError::MissingWorkflow {
            workflow,
            repository,
            defined,
        } => {
            let mut msg = status_err.to_string();
            match defined {
                Some(true) => {
                    let _ = write!(
                        msg,
                        "\n\nTip: '{workflow}' exists in {repository} but has no recent runs on the selected branches."
                    );
                }
                Some(false) => {
                    let _ = write!(
                        msg,
                        "\n\nTip: {repository} has no workflow named '{workflow}'. Workflow names are matched exactly."
                    );
                }
                None => {}
            }
            msg
        }
        StatusError::InvalidRepository(_) => {
            format!("{status_err}\n\nTip: Name repositories as owner/repo, e.g. inseven/fileaway.")
        }
    }
}
