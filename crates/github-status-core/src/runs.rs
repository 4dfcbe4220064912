// SPDX-License-Identifier: Apache-2.0

//! Workflow run model.
//!
//! A [`WorkflowRun`] is a typed snapshot of one record returned by
//! `GET /repos/{owner}/{repo}/actions/runs`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Terminal outcome of a workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conclusion {
    /// The run succeeded.
    Success,
    /// The run failed.
    Failure,
    /// Anything else: cancelled, skipped, timed out, or still running (`None`).
    Other(Option<String>),
}

impl Conclusion {
    /// Maps GitHub's `conclusion` field onto a conclusion.
    #[must_use]
    pub fn from_api(value: Option<&str>) -> Self {
        match value {
            Some("success") => Self::Success,
            Some("failure") => Self::Failure,
            other => Self::Other(other.map(str::to_string)),
        }
    }

    /// Color used to display a run with this conclusion.
    #[must_use]
    pub fn color(&self) -> StatusColor {
        match self {
            Self::Success => StatusColor::Green,
            Self::Failure => StatusColor::Red,
            Self::Other(_) => StatusColor::Yellow,
        }
    }

    /// GitHub's spelling of the conclusion, `None` while a run is in progress.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Success => Some("success"),
            Self::Failure => Some("failure"),
            Self::Other(value) => value.as_deref(),
        }
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("pending"))
    }
}

impl Serialize for Conclusion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(value) => serializer.serialize_some(value),
            None => serializer.serialize_none(),
        }
    }
}

/// Display color derived from a run's conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    /// Successful run.
    Green,
    /// Failed run.
    Red,
    /// Any other outcome.
    Yellow,
}

/// One workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowRun {
    /// Repository in `owner/repo` format.
    pub repository: String,
    /// Workflow name.
    pub name: String,
    /// Branch the run was triggered for.
    pub head_branch: String,
    /// Outcome of the run.
    pub conclusion: Conclusion,
    /// Run status (`queued`, `in_progress`, `completed`), if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Sequential run number within the workflow, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_number: Option<u64>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Web URL of the run.
    pub html_url: String,
}

impl WorkflowRun {
    /// Time elapsed between the last update and `now`.
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.updated_at)
    }

    /// Builds a run from an API record, using `queried` when the record
    /// carries no repository name.
    pub(crate) fn from_api(record: ApiRun, queried: &str) -> Self {
        let repository = record
            .head_repository
            .or(record.repository)
            .map_or_else(|| queried.to_string(), |repo| repo.full_name);

        Self {
            repository,
            name: record.name.unwrap_or_default(),
            head_branch: record.head_branch.unwrap_or_default(),
            conclusion: Conclusion::from_api(record.conclusion.as_deref()),
            status: record.status,
            run_number: record.run_number,
            updated_at: record.updated_at,
            html_url: record.html_url,
        }
    }
}

/// Envelope of the "list workflow runs" endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiRunList {
    pub workflow_runs: Vec<ApiRun>,
}

/// One record of the "list workflow runs" endpoint, only the fields we read.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiRun {
    pub name: Option<String>,
    pub head_branch: Option<String>,
    pub conclusion: Option<String>,
    pub status: Option<String>,
    pub run_number: Option<u64>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    pub head_repository: Option<ApiRepository>,
    pub repository: Option<ApiRepository>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRepository {
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNS_JSON: &str = r#"{
        "total_count": 2,
        "workflow_runs": [
            {
                "id": 30433642,
                "name": "Build",
                "head_branch": "main",
                "status": "completed",
                "conclusion": "success",
                "run_number": 562,
                "updated_at": "2024-03-01T10:00:00Z",
                "html_url": "https://github.com/octo/hello/actions/runs/30433642",
                "repository": { "full_name": "octo/hello" },
                "head_repository": { "full_name": "octo/hello" }
            },
            {
                "id": 30433643,
                "name": "Release",
                "head_branch": "feature",
                "status": "in_progress",
                "conclusion": null,
                "updated_at": "2024-03-02T10:00:00Z",
                "html_url": "https://github.com/octo/hello/actions/runs/30433643",
                "head_repository": null
            }
        ]
    }"#;

    #[test]
    fn test_conclusion_mapping() {
        assert_eq!(Conclusion::from_api(Some("success")), Conclusion::Success);
        assert_eq!(Conclusion::from_api(Some("failure")), Conclusion::Failure);
        assert_eq!(
            Conclusion::from_api(Some("cancelled")),
            Conclusion::Other(Some("cancelled".to_string()))
        );
        assert_eq!(Conclusion::from_api(None), Conclusion::Other(None));
    }

    #[test]
    fn test_conclusion_colors() {
        assert_eq!(Conclusion::Success.color(), StatusColor::Green);
        assert_eq!(Conclusion::Failure.color(), StatusColor::Red);
        assert_eq!(
            Conclusion::from_api(Some("cancelled")).color(),
            StatusColor::Yellow
        );
        assert_eq!(Conclusion::from_api(None).color(), StatusColor::Yellow);
    }

    #[test]
    fn test_conclusion_display() {
        assert_eq!(Conclusion::Success.to_string(), "success");
        assert_eq!(Conclusion::from_api(Some("skipped")).to_string(), "skipped");
        assert_eq!(Conclusion::from_api(None).to_string(), "pending");
    }

    #[test]
    fn test_parse_run_list() {
        let list: ApiRunList = serde_json::from_str(RUNS_JSON).expect("valid fixture");
        let runs: Vec<WorkflowRun> = list
            .workflow_runs
            .into_iter()
            .map(|r| WorkflowRun::from_api(r, "octo/hello"))
            .collect();

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].repository, "octo/hello");
        assert_eq!(runs[0].name, "Build");
        assert_eq!(runs[0].head_branch, "main");
        assert_eq!(runs[0].conclusion, Conclusion::Success);
        assert_eq!(runs[0].run_number, Some(562));

        assert_eq!(runs[1].conclusion, Conclusion::Other(None));
        assert_eq!(runs[1].status.as_deref(), Some("in_progress"));
        assert!(runs[1].run_number.is_none());
    }

    #[test]
    fn test_repository_falls_back_to_queried_name() {
        let list: ApiRunList = serde_json::from_str(RUNS_JSON).expect("valid fixture");
        let record = list.workflow_runs.into_iter().nth(1).expect("two runs");
        let run = WorkflowRun::from_api(record, "octo/queried");
        assert_eq!(run.repository, "octo/queried");
    }

    #[test]
    fn test_age() {
        let list: ApiRunList = serde_json::from_str(RUNS_JSON).expect("valid fixture");
        let record = list.workflow_runs.into_iter().next().expect("one run");
        let run = WorkflowRun::from_api(record, "octo/hello");

        let now = run.updated_at + Duration::days(3);
        assert_eq!(run.age(now).num_days(), 3);
    }

    #[test]
    fn test_serialize_pending_conclusion_as_null() {
        let value = serde_json::to_value(Conclusion::from_api(None)).unwrap();
        assert!(value.is_null());
        let value = serde_json::to_value(Conclusion::Failure).unwrap();
        assert_eq!(value, "failure");
    }
}
