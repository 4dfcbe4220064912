// SPDX-License-Identifier: Apache-2.0

//! Report pipeline.
//!
//! Fetches and filters runs for each query in order. The first failure
//! aborts the whole pipeline: a report is either complete or not printed.

use anyhow::Result;
use tracing::{debug, instrument, warn};

use crate::error::StatusError;
use crate::filter::filter_runs;
use crate::github::actions::RunSource;
use crate::queries::RepositoryQuery;
use crate::runs::WorkflowRun;

/// Collects the filtered runs of every query, one repository at a time.
///
/// `on_repository` is called before each repository is fetched, so callers
/// can report progress.
///
/// # Errors
///
/// Returns the first fetch error, or `StatusError::MissingWorkflow` if a
/// requested workflow matched no run.
#[instrument(skip_all, fields(repositories = queries.len()))]
pub async fn collect_runs<S, P>(
    source: &S,
    queries: &[RepositoryQuery],
    mut on_repository: P,
) -> Result<Vec<WorkflowRun>>
where
    S: RunSource + ?Sized,
    P: FnMut(&RepositoryQuery),
{
    let mut collected = Vec::new();

    for query in queries {
        on_repository(query);

        let runs = source.workflow_runs(&query.name).await?;
        let filtered = filter_runs(runs, query);

        if let Some(workflow) = filtered.missing_workflows.into_iter().next() {
            let defined = workflow_defined(source, &query.name, &workflow).await;
            return Err(StatusError::MissingWorkflow {
                workflow,
                repository: query.name.clone(),
                defined,
            }
            .into());
        }

        collected.extend(filtered.runs);
    }

    debug!(runs = collected.len(), "Collected workflow runs");
    Ok(collected)
}

/// Checks whether `repository` defines a workflow named `workflow`.
///
/// Returns `None` when the workflows cannot be listed.
async fn workflow_defined<S>(source: &S, repository: &str, workflow: &str) -> Option<bool>
where
    S: RunSource + ?Sized,
{
    match source.workflows(repository).await {
        Ok(workflows) => Some(workflows.iter().any(|w| w.name == workflow)),
        Err(e) => {
            warn!(error = %e, repository, "Could not list workflows");
            None
        }
    }
}
