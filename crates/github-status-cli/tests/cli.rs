use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Command isolated from the user's settings, cache and environment.
fn isolated_cmd(home: &tempfile::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("github-status");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env_remove("GITHUB_STATUS_CLIENT_ID")
        .env_remove("GITHUB_STATUS_CONFIGURATION")
        .env_remove("GITHUB_STATUS_TOKEN_PATH")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("github-status");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("github-status"));
}

#[test]
fn test_help_lists_options() {
    let mut cmd = cargo_bin_cmd!("github-status");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("REPOSITORY"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--reauthenticate"))
        .stdout(predicate::str::contains("--no-browser"));
}

#[test]
fn test_missing_client_id_fails() {
    let home = tempfile::tempdir().unwrap();
    isolated_cmd(&home)
        .arg("inseven/fileaway")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("GITHUB_STATUS_CLIENT_ID"));
}

#[test]
fn test_empty_client_id_fails() {
    let home = tempfile::tempdir().unwrap();
    isolated_cmd(&home)
        .env("GITHUB_STATUS_CLIENT_ID", "")
        .arg("inseven/fileaway")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("GITHUB_STATUS_CLIENT_ID"));
}

#[test]
fn test_missing_repositories_file_fails() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("missing.yaml");

    isolated_cmd(&home)
        .env("GITHUB_STATUS_CLIENT_ID", "test-client")
        .arg("--config")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing.yaml"));
}

#[test]
fn test_default_repositories_file_is_in_home() {
    let home = tempfile::tempdir().unwrap();

    isolated_cmd(&home)
        .env("GITHUB_STATUS_CLIENT_ID", "test-client")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".github-status-configuration.yaml"));
}

#[test]
fn test_repositories_file_from_environment() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("status.yaml");
    std::fs::write(&path, "repositories:\n  - name: fileaway\n").unwrap();

    isolated_cmd(&home)
        .env("GITHUB_STATUS_CLIENT_ID", "test-client")
        .env("GITHUB_STATUS_CONFIGURATION", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid repository 'fileaway'"));
}

#[test]
fn test_unknown_key_in_repositories_file_fails() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("status.yaml");
    std::fs::write(
        &path,
        "repositories:\n  - name: inseven/fileaway\n    branch: main\n",
    )
    .unwrap();

    isolated_cmd(&home)
        .env("GITHUB_STATUS_CLIENT_ID", "test-client")
        .arg("--config")
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("status.yaml"));
}

#[test]
fn test_invalid_repository_argument_fails() {
    let home = tempfile::tempdir().unwrap();
    isolated_cmd(&home)
        .env("GITHUB_STATUS_CLIENT_ID", "test-client")
        .arg("not-a-repo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not-a-repo"))
        .stderr(predicate::str::contains("owner/repo"));
}

#[test]
fn test_unknown_output_format_is_rejected() {
    let mut cmd = cargo_bin_cmd!("github-status");
    cmd.args(["--output", "xml", "inseven/fileaway"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}
