// SPDX-License-Identifier: Apache-2.0

//! Cached access token.
//!
//! Stores the token obtained by the device flow in
//! `~/.local/share/github-status/token.json` as a versioned record:
//!
//! ```json
//! { "version": 1, "access_token": "gho_..." }
//! ```
//!
//! Anything unreadable is treated as "no token", which triggers a new
//! device flow.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Current token record version.
const TOKEN_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct TokenRecord {
    version: u32,
    access_token: String,
}

/// File-backed store for a single access token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cached token.
    ///
    /// Returns `None` if the file is missing, unreadable, corrupt, of an
    /// unknown version, or holds an empty token.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> Option<SecretString> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(error = %e, "No cached token");
                return None;
            }
        };

        let record: TokenRecord = match serde_json::from_str(&contents) {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "Ignoring corrupt token file");
                return None;
            }
        };

        if record.version != TOKEN_FORMAT_VERSION {
            debug!(version = record.version, "Ignoring token file with unknown version");
            return None;
        }
        if record.access_token.is_empty() {
            return None;
        }

        debug!("Loaded cached token");
        Some(SecretString::from(record.access_token))
    }

    /// Saves `token`, replacing any cached one.
    ///
    /// Creates parent directories if they don't exist. On Unix the file is
    /// only readable by the current user.
    #[instrument(skip(self, token), fields(path = %self.path.display()))]
    pub fn save(&self, token: &SecretString) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let record = TokenRecord {
            version: TOKEN_FORMAT_VERSION,
            access_token: token.expose_secret().to_string(),
        };
        let contents = serde_json::to_string(&record).context("Failed to serialize token")?;

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write token file: {}", self.path.display()))?;
        restrict_permissions(&self.path)?;

        info!("Token cached");
        Ok(())
    }

    /// Removes the cached token. A missing file is not an error.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Cached token removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove token file: {}", self.path.display())),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
