// SPDX-License-Identifier: Apache-2.0

//! GitHub Actions API client.
//!
//! Two read-only endpoints are used:
//! - `GET /repos/{owner}/{repo}/actions/runs` for recent workflow runs
//! - `GET /repos/{owner}/{repo}/actions/workflows` to diagnose a workflow
//!   name that never matched a run
//!
//! Each call is a single request: non-2xx answers and network failures are
//! returned as errors, never retried.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use octocrab::Octocrab;
use reqwest::header::{ACCEPT, HeaderName};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{API_ACCEPT, API_VERSION, parse_owner_repo};
use crate::config::GitHubConfig;
use crate::error::StatusError;
use crate::runs::{ApiRunList, WorkflowRun};

/// A workflow defined in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Workflow {
    /// Workflow name, as shown on runs.
    pub name: String,
    /// Path of the workflow file (e.g. `.github/workflows/build.yml`).
    pub path: String,
    /// Workflow state (`active`, `disabled_manually`, ...).
    pub state: String,
}

#[derive(Debug, Deserialize)]
struct WorkflowList {
    workflows: Vec<Workflow>,
}

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
}

/// Source of workflow runs for a repository.
///
/// Implemented by [`ActionsClient`] against the GitHub API and by in-memory
/// fixtures in tests.
#[async_trait]
pub trait RunSource: Send + Sync {
    /// Most recent runs of `repository`, newest first.
    async fn workflow_runs(&self, repository: &str) -> Result<Vec<WorkflowRun>>;

    /// Workflows defined in `repository`.
    async fn workflows(&self, repository: &str) -> Result<Vec<Workflow>>;
}

/// Authenticated client for the Actions REST API.
pub struct ActionsClient {
    crab: Octocrab,
    per_page: u8,
}

impl ActionsClient {
    /// Creates a client using `token` as bearer credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be built.
    #[instrument(skip(token, config), fields(api_url = %config.api_url))]
    pub fn new(token: &SecretString, config: &GitHubConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.api_timeout_seconds);

        let crab = Octocrab::builder()
            .base_uri(config.api_url.as_str())
            .map_err(|e| StatusError::config(format!("Invalid GitHub API URL: {e}")))?
            .personal_token(token.expose_secret().to_string())
            .add_header(ACCEPT, API_ACCEPT.to_string())
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                API_VERSION.to_string(),
            )
            .set_connect_timeout(Some(timeout))
            .set_read_timeout(Some(timeout))
            .build()
            .context("Failed to build GitHub client")?;

        debug!("Created authenticated GitHub client");
        Ok(Self {
            crab,
            per_page: config.per_page,
        })
    }
}

/// Route of the "list workflow runs" endpoint.
fn runs_route(repository: &str) -> crate::Result<String> {
    let (owner, repo) = parse_owner_repo(repository)?;
    Ok(format!("/repos/{owner}/{repo}/actions/runs"))
}

/// Route of the "list workflows" endpoint.
fn workflows_route(repository: &str) -> crate::Result<String> {
    let (owner, repo) = parse_owner_repo(repository)?;
    Ok(format!("/repos/{owner}/{repo}/actions/workflows"))
}

#[async_trait]
impl RunSource for ActionsClient {
    #[instrument(skip(self))]
    async fn workflow_runs(&self, repository: &str) -> Result<Vec<WorkflowRun>> {
        let route = runs_route(repository)?;
        let params = PageParams {
            per_page: self.per_page,
        };

        let list: ApiRunList = self
            .crab
            .get(&route, Some(&params))
            .await
            .map_err(|e| StatusError::github(repository, &e))?;

        let runs: Vec<WorkflowRun> = list
            .workflow_runs
            .into_iter()
            .map(|record| WorkflowRun::from_api(record, repository))
            .collect();

        debug!(count = runs.len(), "Fetched workflow runs");
        Ok(runs)
    }

    #[instrument(skip(self))]
    async fn workflows(&self, repository: &str) -> Result<Vec<Workflow>> {
        let route = workflows_route(repository)?;
        let params = PageParams { per_page: 100 };

        let list: WorkflowList = self
            .crab
            .get(&route, Some(&params))
            .await
            .map_err(|e| StatusError::github(repository, &e))?;

        debug!(count = list.workflows.len(), "Fetched workflows");
        Ok(list.workflows)
    }
}
