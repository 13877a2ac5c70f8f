use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("brisk")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("probe"))
        .stdout(predicate::str::contains("--debounce-ms"))
        .stdout(predicate::str::contains("--load-ms"));
}

#[test]
fn test_probe_help_shows_json_flag() {
    cargo_bin_cmd!("brisk")
        .args(["probe", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--json"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("brisk")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_interactive_mode_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("brisk")
        .env("BRISK_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
