// SPDX-License-Identifier: Apache-2.0

//! github-status - the latest GitHub Actions runs of your repositories.
//!
//! Authenticates once with the GitHub device flow, then prints a colorized
//! table of recent workflow runs for the repositories named on the command
//! line or in the repositories file.

mod cli;
mod commands;
mod errors;
mod logging;
mod output;
mod table;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use github_status_core::config;
use tracing::debug;

use crate::cli::{Cli, OutputContext};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let output_ctx = OutputContext::from_cli(cli.output, cli.quiet);

    match run(&cli, &output_ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let formatted = errors::format_error(&e);
            eprintln!("Error: {formatted}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli, ctx: &OutputContext) -> Result<()> {
    let config = config::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    commands::run(cli, ctx, &config).await
}
