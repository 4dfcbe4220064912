// SPDX-License-Identifier: Apache-2.0

//! Result types returned by command handlers.
//!
//! Command handlers return data instead of printing directly; the
//! `output` module handles presentation.

use chrono::{DateTime, Utc};
use github_status_core::Report;
use serde::Serialize;

/// Result of a status report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct StatusResult {
    /// Time the ages were computed against.
    pub generated_at: DateTime<Utc>,
    /// Sorted report, serialized as its `rows`.
    #[serde(flatten)]
    pub report: Report,
}
