// SPDX-License-Identifier: Apache-2.0

//! Per-repository run filtering.

use std::collections::HashMap;

use tracing::debug;

use crate::queries::RepositoryQuery;
use crate::runs::WorkflowRun;

/// Runs kept for one repository.
#[derive(Debug, Clone, Default)]
pub struct FilteredRuns {
    /// Kept runs, in API order.
    pub runs: Vec<WorkflowRun>,
    /// Requested workflows that matched no run on the selected branches,
    /// in the order they were requested.
    pub missing_workflows: Vec<String>,
}

/// Applies `query` to `runs`, which must be in API order (newest first).
///
/// A run is kept when its branch is one of `query.branches`, its workflow is
/// one of `query.workflows` (if given), and fewer than `query.limit` runs of
/// the same workflow were kept before it.
#[must_use]
pub fn filter_runs(runs: Vec<WorkflowRun>, query: &RepositoryQuery) -> FilteredRuns {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut kept = Vec::new();

    for run in runs {
        if !query.branches.iter().any(|b| *b == run.head_branch) {
            continue;
        }
        if let Some(workflows) = &query.workflows
            && !workflows.iter().any(|w| *w == run.name)
        {
            continue;
        }

        let count = counts.entry(run.name.clone()).or_insert(0);
        *count += 1;
        if let Some(limit) = query.limit
            && *count > limit
        {
            continue;
        }

        kept.push(run);
    }

    let missing_workflows = query
        .workflows
        .iter()
        .flatten()
        .filter(|w| !counts.contains_key(*w))
        .cloned()
        .collect();

    debug!(
        repository = %query.name,
        kept = kept.len(),
        "Filtered workflow runs"
    );

    FilteredRuns {
        runs: kept,
        missing_workflows,
    }
}
