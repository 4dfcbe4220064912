// SPDX-License-Identifier: Apache-2.0

//! Command handlers for the github-status CLI.

pub mod auth;
pub mod status;
pub mod types;

use std::time::Duration;

use anyhow::Result;
use github_status_core::{AppConfig, TokenStore, resolve_queries};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::cli::{Cli, OutputContext};
use crate::output;

/// Creates a styled spinner (only if interactive).
fn maybe_spinner(ctx: &OutputContext, message: &str) -> Option<ProgressBar> {
    if ctx.is_interactive() {
        let s = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")
        {
            s.set_style(spinner_style);
        }
        s.set_message(message.to_string());
        s.enable_steady_tick(Duration::from_millis(100));
        Some(s)
    } else {
        None
    }
}

/// Runs the report: resolve queries, authenticate, fetch, render.
///
/// Input is validated before authentication so a bad repositories file
/// fails without starting a device flow.
pub async fn run(cli: &Cli, ctx: &OutputContext, config: &AppConfig) -> Result<()> {
    let client_id = config.require_client_id()?;

    let path = config.repositories_path(cli.config.as_deref())?;
    let queries = resolve_queries(&cli.repositories, &path)?;
    debug!(count = queries.len(), "Resolved repository queries");

    let store = TokenStore::new(config.token_path()?);
    let token = auth::ensure_token(
        &store,
        client_id,
        config,
        auth::LoginOptions {
            reauthenticate: cli.reauthenticate,
            open_browser: config.auth.open_browser && !cli.no_browser,
        },
    )
    .await?;

    let result = status::run(&token, &queries, config, ctx).await?;
    output::render(&result, ctx)
}
