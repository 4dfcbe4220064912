// SPDX-License-Identifier: Apache-2.0

//! GitHub OAuth authentication.
//!
//! Reuses the cached token when there is one, otherwise runs the device
//! flow and caches the new token.

use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::Result;
use console::style;
use github_status_core::{AppConfig, DeviceFlow, GitHubDeviceTransport, TokenStore};
use secrecy::SecretString;
use tracing::{debug, info};

/// How to obtain a token.
#[derive(Debug, Clone, Copy)]
pub struct LoginOptions {
    /// Discard the cached token first.
    pub reauthenticate: bool,
    /// Open the verification URL in a browser.
    pub open_browser: bool,
}

/// Returns an access token, authenticating with the device flow if needed.
pub async fn ensure_token(
    store: &TokenStore,
    client_id: SecretString,
    config: &AppConfig,
    options: LoginOptions,
) -> Result<SecretString> {
    if options.reauthenticate {
        store.delete()?;
    } else if let Some(token) = store.load() {
        debug!(path = %store.path().display(), "Using cached token");
        return Ok(token);
    }

    let transport = GitHubDeviceTransport::new(
        &config.github.oauth_url,
        Duration::from_secs(config.github.api_timeout_seconds),
    )?;
    let flow = DeviceFlow::new(transport, client_id, config.auth.scopes.clone())
        .with_max_attempts(config.auth.max_poll_attempts);

    eprintln!(
        "{} Starting GitHub authentication...",
        style("*").for_stderr().cyan().bold()
    );
    let codes = flow.request_codes().await?;

    eprintln!();
    eprintln!(
        "  Open {} and enter the code {}",
        style(&codes.verification_uri).for_stderr().cyan(),
        style(&codes.user_code).for_stderr().bold()
    );
    eprintln!();
    if options.open_browser {
        open_browser(&codes.verification_uri);
    }

    let token = flow
        .poll_until_authorized(&codes, tokio::time::sleep)
        .await?;
    store.save(&token)?;

    info!("Authenticated with GitHub");
    eprintln!(
        "{} Successfully authenticated with GitHub!",
        style("*").for_stderr().green().bold()
    );

    Ok(token)
}

/// Opens `url` with the platform's URL handler. Failures are only logged:
/// the user can still copy the printed URL.
fn open_browser(url: &str) {
    let mut command = if cfg!(target_os = "macos") {
        let mut command = Command::new("open");
        command.arg(url);
        command
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    } else {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    };

    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => debug!("Opened verification URL in browser"),
        Ok(status) => debug!(status = ?status, "Browser opener failed"),
        Err(e) => debug!(error = %e, "Failed to launch browser opener"),
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[tokio::test]
    async fn test_cached_token_skips_device_flow() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));
        store
            .save(&SecretString::from("gho_cached".to_string()))
            .unwrap();

        // An unreachable OAuth host fails the test if the flow starts
        let mut config = AppConfig::default();
        config.github.oauth_url = "http://127.0.0.1:9".to_string();

        let token = ensure_token(
            &store,
            SecretString::from("client".to_string()),
            &config,
            LoginOptions {
                reauthenticate: false,
                open_browser: false,
            },
        )
        .await
        .unwrap();

        assert_eq!(token.expose_secret(), "gho_cached");
    }

    #[tokio::test]
    async fn test_reauthenticate_discards_cached_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("token.json"));
        store
            .save(&SecretString::from("gho_cached".to_string()))
            .unwrap();

        let mut config = AppConfig::default();
        config.github.oauth_url = "http://127.0.0.1:9".to_string();
        config.github.api_timeout_seconds = 1;

        let result = ensure_token(
            &store,
            SecretString::from("client".to_string()),
            &config,
            LoginOptions {
                reauthenticate: true,
                open_browser: false,
            },
        )
        .await;

        assert!(result.is_err());
        assert!(store.load().is_none());
    }
}
