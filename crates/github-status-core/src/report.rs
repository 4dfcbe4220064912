// SPDX-License-Identifier: Apache-2.0

//! Report model.
//!
//! Sorts the collected runs and derives what each table row shows. Styling
//! is left to the presentation layer.

use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::runs::{Conclusion, StatusColor, WorkflowRun};

/// One row of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Repository in `owner/repo` format.
    pub repository: String,
    /// Workflow name.
    pub workflow: String,
    /// Branch the run was triggered for.
    pub branch: String,
    /// Outcome of the run.
    pub conclusion: Conclusion,
    /// Color of the repository label.
    pub color: StatusColor,
    /// Whole days since the run was last updated.
    pub age_days: i64,
    /// Whether the run is older than the stale threshold.
    pub stale: bool,
    /// Web URL of the run.
    pub url: String,
}

impl ReportRow {
    /// Age summary shown in the table, e.g. `3d`.
    #[must_use]
    pub fn age_summary(&self) -> String {
        format!("{}d", self.age_days)
    }
}

/// Sorted report rows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Rows ordered by repository, workflow, then age (newest first).
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Builds the report for `runs` as of `now`.
    ///
    /// Runs updated more than `stale_after` ago are flagged stale.
    #[must_use]
    pub fn build(mut runs: Vec<WorkflowRun>, now: DateTime<Utc>, stale_after: Duration) -> Self {
        sort_runs(&mut runs, now);

        let rows = runs
            .into_iter()
            .map(|run| {
                let age = run.age(now);
                ReportRow {
                    color: run.conclusion.color(),
                    age_days: age.num_days(),
                    stale: age > stale_after,
                    repository: run.repository,
                    workflow: run.name,
                    branch: run.head_branch,
                    conclusion: run.conclusion,
                    url: run.html_url,
                }
            })
            .collect();

        Self { rows }
    }

    /// Whether the report has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Orders by (repository, workflow name, age) ascending. The sort is stable.
pub fn sort_runs(runs: &mut [WorkflowRun], now: DateTime<Utc>) {
    runs.sort_by(|a, b| compare_runs(a, b, now));
}

fn compare_runs(a: &WorkflowRun, b: &WorkflowRun, now: DateTime<Utc>) -> Ordering {
    a.repository
        .cmp(&b.repository)
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.age(now).cmp(&b.age(now)))
}
