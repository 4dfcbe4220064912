// SPDX-License-Identifier: Apache-2.0

//! GitHub OAuth device flow authentication.
//!
//! Implements the OAuth device flow for CLI authentication:
//! 1. Request device code from GitHub
//! 2. Display verification URL and user code to user (caller's job)
//! 3. Poll for access token after user authorizes
//!
//! Any poll answer without an `access_token` counts as "not yet authorized".
//! The loop waits the server-given interval between polls and only stops
//! early when `max_attempts` is set.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::error::StatusError;

/// Grant type for polling the token endpoint.
const DEVICE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Interval used when GitHub does not send one.
const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Answer of the device authorization endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DeviceCodeResponse {
    /// Code identifying this device flow.
    pub device_code: Option<String>,
    /// Code the user types on the verification page.
    pub user_code: Option<String>,
    /// Page where the user enters the code.
    pub verification_uri: Option<String>,
    /// Seconds to wait between polls.
    pub interval: Option<u64>,
    /// Error code, when the request was rejected.
    pub error: Option<String>,
    /// Human-readable error message.
    pub error_description: Option<String>,
}

/// Answer of the token endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TokenPollResponse {
    /// Access token, once the user has authorized the device.
    pub access_token: Option<String>,
    /// Error code (`authorization_pending`, `slow_down`, ...).
    pub error: Option<String>,
    /// New minimum interval, sent with `slow_down`.
    pub interval: Option<u64>,
}

/// Codes returned when a device flow starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCodes {
    /// Code identifying this device flow.
    pub device_code: String,
    /// Code the user types on the verification page.
    pub user_code: String,
    /// Page where the user enters the code.
    pub verification_uri: String,
    /// Time to wait between polls.
    pub interval: Duration,
}

impl DeviceCodes {
    /// Validates a device authorization answer.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::Authentication` with GitHub's message if the
    /// answer carries an error, or if a required field is missing.
    pub fn from_response(response: DeviceCodeResponse) -> crate::Result<Self> {
        if let Some(error) = response.error {
            return Err(StatusError::Authentication {
                message: response.error_description.unwrap_or(error),
            });
        }

        match (
            response.device_code,
            response.user_code,
            response.verification_uri,
        ) {
            (Some(device_code), Some(user_code), Some(verification_uri)) => Ok(Self {
                device_code,
                user_code,
                verification_uri,
                interval: Duration::from_secs(response.interval.unwrap_or(DEFAULT_INTERVAL_SECS)),
            }),
            _ => Err(StatusError::Authentication {
                message: "Malformed device code response from GitHub".to_string(),
            }),
        }
    }
}

/// HTTP side of the device flow.
#[async_trait]
pub trait DeviceFlowTransport: Send + Sync {
    /// Starts a device flow for `client_id` with the given scopes.
    async fn request_codes(&self, client_id: &str, scopes: &[String]) -> Result<DeviceCodeResponse>;

    /// Asks whether the user has authorized `device_code` yet.
    async fn poll_token(&self, client_id: &str, device_code: &str) -> Result<TokenPollResponse>;
}

/// Device flow transport against GitHub's OAuth endpoints.
#[derive(Debug, Clone)]
pub struct GitHubDeviceTransport {
    http: reqwest::Client,
    base_url: String,
}

impl GitHubDeviceTransport {
    /// Creates a transport for the OAuth host at `base_url` (e.g. `https://github.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("github-status/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build OAuth client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl DeviceFlowTransport for GitHubDeviceTransport {
    async fn request_codes(&self, client_id: &str, scopes: &[String]) -> Result<DeviceCodeResponse> {
        let scope = scopes.join(" ");
        let response = self
            .http
            .post(format!("{}/login/device/code", self.base_url))
            .header(ACCEPT, "application/json")
            .form(&[("client_id", client_id), ("scope", scope.as_str())])
            .send()
            .await
            .map_err(StatusError::Network)?;

        let body = response
            .json::<DeviceCodeResponse>()
            .await
            .map_err(StatusError::Network)?;
        Ok(body)
    }

    async fn poll_token(&self, client_id: &str, device_code: &str) -> Result<TokenPollResponse> {
        let response = self
            .http
            .post(format!("{}/login/oauth/access_token", self.base_url))
            .header(ACCEPT, "application/json")
            .form(&[
                ("client_id", client_id),
                ("device_code", device_code),
                ("grant_type", DEVICE_GRANT_TYPE),
            ])
            .send()
            .await
            .map_err(StatusError::Network)?;

        // Unparseable answers are treated as "not yet authorized".
        match response.json::<TokenPollResponse>().await {
            Ok(body) => Ok(body),
            Err(e) => {
                debug!(error = %e, "Ignoring malformed token poll response");
                Ok(TokenPollResponse::default())
            }
        }
    }
}

/// OAuth device flow for one client identifier.
pub struct DeviceFlow<T> {
    transport: T,
    client_id: SecretString,
    scopes: Vec<String>,
    max_attempts: Option<u32>,
}

impl<T: DeviceFlowTransport> DeviceFlow<T> {
    /// Creates a device flow requesting `scopes` for `client_id`.
    pub fn new(transport: T, client_id: SecretString, scopes: Vec<String>) -> Self {
        Self {
            transport,
            client_id,
            scopes,
            max_attempts: None,
        }
    }

    /// Gives up after `max_attempts` polls instead of waiting forever.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Requests device and user codes.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::Authentication` if GitHub rejects the request,
    /// or a network error if it cannot be sent.
    #[instrument(skip(self))]
    pub async fn request_codes(&self) -> Result<DeviceCodes> {
        debug!("Starting OAuth device flow");
        let response = self
            .transport
            .request_codes(self.client_id.expose_secret(), &self.scopes)
            .await?;
        Ok(DeviceCodes::from_response(response)?)
    }

    /// Polls until the user authorizes the device, sleeping with `sleep`
    /// between polls.
    ///
    /// # Errors
    ///
    /// Returns a network error if a poll cannot be sent, or
    /// `StatusError::Authentication` once `max_attempts` polls went unanswered.
    #[instrument(skip(self, codes, sleep))]
    pub async fn poll_until_authorized<S, F>(
        &self,
        codes: &DeviceCodes,
        mut sleep: S,
    ) -> Result<SecretString>
    where
        S: FnMut(Duration) -> F,
        F: Future<Output = ()>,
    {
        let mut interval = codes.interval;
        let mut attempts: u32 = 0;

        loop {
            if let Some(max) = self.max_attempts
                && attempts >= max
            {
                return Err(StatusError::Authentication {
                    message: format!("Device was not authorized after {attempts} attempts"),
                }
                .into());
            }

            sleep(interval).await;
            attempts += 1;

            let response = self
                .transport
                .poll_token(self.client_id.expose_secret(), &codes.device_code)
                .await?;

            if let Some(token) = response.access_token.filter(|t| !t.is_empty()) {
                info!(attempts, "Device authorized");
                return Ok(SecretString::from(token));
            }

            if response.error.as_deref() == Some("slow_down")
                && let Some(secs) = response.interval
            {
                interval = Duration::from_secs(secs);
            }
            debug!(attempts, error = ?response.error, "Device not authorized yet");
        }
    }
}
