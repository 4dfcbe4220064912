// SPDX-License-Identifier: Apache-2.0

//! GitHub integration module.
//!
//! Provides device flow authentication and the Actions API client.

use crate::error::StatusError;

pub mod actions;
pub mod device;

/// Accept header value for the REST API.
pub const API_ACCEPT: &str = "application/vnd.github+json";

/// REST API version sent with every request.
pub const API_VERSION: &str = "2022-11-28";

/// Parses an owner/repo string to extract owner and repo.
///
/// Validates format: exactly one `/`, non-empty parts.
///
/// # Errors
///
/// Returns `StatusError::InvalidRepository` if the format is invalid.
pub fn parse_owner_repo(s: &str) -> crate::Result<(&str, &str)> {
    match s.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(StatusError::InvalidRepository(s.to_string())),
    }
}
