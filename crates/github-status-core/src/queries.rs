// SPDX-License-Identifier: Apache-2.0

//! Repository queries.
//!
//! A [`RepositoryQuery`] says which runs of one repository belong in the
//! report. Queries come either from repositories named on the command line,
//! or from a YAML file shaped like:
//!
//! ```yaml
//! defaults:
//!   branches: [main]
//!   limit: 1
//! repositories:
//!   - name: inseven/fileaway
//!   - name: inseven/bookmarks
//!     workflows: [build]
//!     limit: 2
//! ```
//!
//! Each repository entry is merged over `defaults`, key by key.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StatusError;
use crate::github::parse_owner_repo;

/// Branches considered when a query does not name any.
pub const DEFAULT_BRANCHES: &[&str] = &["main", "master"];

/// Which runs of one repository to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryQuery {
    /// Repository in `owner/repo` format.
    pub name: String,
    /// Branches whose runs are kept.
    pub branches: Vec<String>,
    /// Workflow names to keep; every name must match at least one run.
    pub workflows: Option<Vec<String>>,
    /// Maximum number of runs kept per workflow name.
    pub limit: Option<usize>,
}

impl RepositoryQuery {
    /// Query for a repository named on the command line: default branches,
    /// the latest run of each workflow, no workflow filter.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::InvalidRepository` if `name` is not `owner/repo`.
    pub fn from_cli(name: &str) -> crate::Result<Self> {
        parse_owner_repo(name)?;
        Ok(Self {
            name: name.to_string(),
            branches: default_branches(),
            workflows: None,
            limit: Some(1),
        })
    }
}

fn default_branches() -> Vec<String> {
    DEFAULT_BRANCHES.iter().map(ToString::to_string).collect()
}

/// The `defaults` block of the repositories file.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryDefaults {
    /// Branches whose runs are kept.
    pub branches: Option<Vec<String>>,
    /// Workflow names to keep.
    pub workflows: Option<Vec<String>>,
    /// Maximum number of runs kept per workflow name.
    pub limit: Option<usize>,
}

/// One entry of the `repositories` list.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryEntry {
    /// Repository in `owner/repo` format.
    pub name: String,
    /// Branches overriding `defaults.branches`.
    pub branches: Option<Vec<String>>,
    /// Workflows overriding `defaults.workflows`.
    pub workflows: Option<Vec<String>>,
    /// Limit overriding `defaults.limit`.
    pub limit: Option<usize>,
}

/// Contents of the repositories file.
#[derive(Debug, Deserialize)]
pub struct RepositoriesFile {
    /// Settings applied to every repository unless overridden.
    #[serde(default)]
    pub defaults: QueryDefaults,
    /// Repositories to report on.
    pub repositories: Vec<RepositoryEntry>,
}

impl RepositoriesFile {
    /// Parses the YAML contents of a repositories file.
    pub fn parse(contents: &str) -> crate::Result<Self> {
        serde_saphyr::from_str(contents).map_err(|e| StatusError::config(e.to_string()))
    }

    /// Merges every repository entry over the defaults.
    ///
    /// # Errors
    ///
    /// Returns `StatusError::InvalidRepository` if an entry name is not `owner/repo`.
    pub fn into_queries(self) -> crate::Result<Vec<RepositoryQuery>> {
        let defaults = self.defaults;
        self.repositories
            .into_iter()
            .map(|entry| {
                parse_owner_repo(&entry.name)?;
                Ok(RepositoryQuery {
                    name: entry.name,
                    branches: entry
                        .branches
                        .or_else(|| defaults.branches.clone())
                        .unwrap_or_else(default_branches),
                    workflows: entry.workflows.or_else(|| defaults.workflows.clone()),
                    limit: entry.limit.or(defaults.limit),
                })
            })
            .collect()
    }
}

/// Loads queries from a repositories file.
///
/// # Errors
///
/// Returns `StatusError::Config` (wrapped in `anyhow`) if the file cannot
/// be read or parsed.
pub fn load_queries(path: &Path) -> Result<Vec<RepositoryQuery>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        StatusError::config(format!(
            "Failed to read repositories file {}: {e}",
            path.display()
        ))
    })?;

    let file = RepositoriesFile::parse(&contents)
        .with_context(|| format!("Failed to parse repositories file: {}", path.display()))?;
    let queries = file.into_queries()?;

    debug!(path = %path.display(), count = queries.len(), "Loaded repository queries");
    Ok(queries)
}

/// Builds the query list: repositories from the command line when any are
/// given, otherwise the repositories file at `path`.
pub fn resolve_queries(cli_repositories: &[String], path: &Path) -> Result<Vec<RepositoryQuery>> {
    if cli_repositories.is_empty() {
        return load_queries(path);
    }

    let queries = cli_repositories
        .iter()
        .map(|name| RepositoryQuery::from_cli(name))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cli_defaults() {
        let query = RepositoryQuery::from_cli("inseven/fileaway").unwrap();
        assert_eq!(query.name, "inseven/fileaway");
        assert_eq!(query.branches, vec!["main", "master"]);
        assert_eq!(query.workflows, None);
        assert_eq!(query.limit, Some(1));
    }

    #[test]
    fn test_from_cli_rejects_bad_name() {
        let err = RepositoryQuery::from_cli("fileaway").unwrap_err();
        assert!(matches!(err, StatusError::InvalidRepository(_)));
    }

    #[test]
    fn test_entries_merge_over_defaults() {
        let file = RepositoriesFile::parse(
            r"
defaults:
  branches: [main]
  limit: 1
repositories:
  - name: inseven/fileaway
  - name: inseven/bookmarks
    workflows: [build, release]
    limit: 3
  - name: inseven/symbolic
    branches: [develop]
",
        )
        .unwrap();

        let queries = file.into_queries().unwrap();
        assert_eq!(queries.len(), 3);

        assert_eq!(queries[0].branches, vec!["main"]);
        assert_eq!(queries[0].limit, Some(1));
        assert_eq!(queries[0].workflows, None);

        assert_eq!(queries[1].branches, vec!["main"]);
        assert_eq!(queries[1].limit, Some(3));
        assert_eq!(
            queries[1].workflows,
            Some(vec!["build".to_string(), "release".to_string()])
        );

        assert_eq!(queries[2].branches, vec!["develop"]);
        assert_eq!(queries[2].limit, Some(1));
    }

    #[test]
    fn test_missing_defaults_uses_builtin_branches() {
        let file = RepositoriesFile::parse(
            r"
repositories:
  - name: org/repo
",
        )
        .unwrap();

        let queries = file.into_queries().unwrap();
        assert_eq!(queries[0].branches, vec!["main", "master"]);
        assert_eq!(queries[0].limit, None);
        assert_eq!(queries[0].workflows, None);
    }

    #[test]
    fn test_missing_repositories_is_config_error() {
        let err = RepositoriesFile::parse("defaults:\n  limit: 1\n").unwrap_err();
        assert!(matches!(err, StatusError::Config { .. }));
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let err = RepositoriesFile::parse(
            r"
repositories:
  - name: org/repo
    branch: main
",
        )
        .unwrap_err();
        assert!(matches!(err, StatusError::Config { .. }));
    }

    #[test]
    fn test_invalid_entry_name() {
        let file = RepositoriesFile::parse("repositories:\n  - name: not-a-repo\n").unwrap();
        let err = file.into_queries().unwrap_err();
        assert!(matches!(err, StatusError::InvalidRepository(_)));
    }

    #[test]
    fn test_load_queries_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_queries(&dir.path().join("missing.yaml")).unwrap_err();
        let status = err.downcast_ref::<StatusError>().expect("typed error");
        assert!(matches!(status, StatusError::Config { .. }));
    }

    #[test]
    fn test_load_queries_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.yaml");
        fs::write(&path, "repositories:\n  - name: org/repo\n    limit: 2\n").unwrap();

        let queries = load_queries(&path).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].limit, Some(2));
    }

    #[test]
    fn test_resolve_queries_prefers_cli() {
        let repos = vec!["org/one".to_string(), "org/two".to_string()];
        let queries = resolve_queries(&repos, Path::new("/does/not/exist.yaml")).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].name, "org/two");
    }
}
