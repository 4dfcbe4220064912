// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the github-status CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable,
//! which takes precedence over the `-v` flag.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings only
//! github-status
//!
//! # Debug output for troubleshooting
//! github-status -v
//! RUST_LOG=github_status=debug github-status
//!
//! # Include HTTP client internals
//! RUST_LOG=github_status=trace,octocrab=debug github-status
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "github_status=warn,octocrab=error,reqwest=error";
const VERBOSE_FILTER: &str = "github_status=debug,octocrab=error,reqwest=error";

/// Initialize the logging subsystem.
///
/// Logs go to stderr so structured output on stdout stays parseable.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
