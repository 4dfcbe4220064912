// SPDX-License-Identifier: Apache-2.0

//! Status report command.

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use github_status_core::{ActionsClient, AppConfig, Report, RepositoryQuery, collect_runs};
use secrecy::SecretString;

use super::maybe_spinner;
use super::types::StatusResult;
use crate::cli::OutputContext;

/// Fetches the runs of every query and builds the report.
pub async fn run(
    token: &SecretString,
    queries: &[RepositoryQuery],
    config: &AppConfig,
    ctx: &OutputContext,
) -> Result<StatusResult> {
    let stale_after = TimeDelta::try_days(config.report.stale_after_days)
        .context("report.stale_after_days is out of range")?;
    let client = ActionsClient::new(token, &config.github)?;

    let spinner = maybe_spinner(ctx, "Fetching workflow runs...");
    let runs = collect_runs(&client, queries, |query| {
        if let Some(s) = &spinner {
            s.set_message(format!("Fetching {}...", query.name));
        }
    })
    .await;
    if let Some(s) = spinner {
        s.finish_and_clear();
    }

    let now = Utc::now();
    Ok(StatusResult {
        generated_at: now,
        report: Report::build(runs?, now, stale_after),
    })
}
