use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A `bx` command isolated from any user or project configuration
fn bx(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bx").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("BX_CONFIG");
    cmd
}

#[test]
fn routes_lists_builtin_table() {
    let dir = TempDir::new().unwrap();
    bx(&dir)
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Built-in routes"))
        .stdout(predicate::str::contains("/users/:id"))
        .stdout(predicate::str::contains("user-detail"));
}

#[test]
fn resolve_reports_first_match_and_params() {
    let dir = TempDir::new().unwrap();
    bx(&dir)
        .args(["resolve", "/users/42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("user-detail"))
        .stdout(predicate::str::contains("42"));
}

#[test]
fn resolve_without_match_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    bx(&dir)
        .args(["resolve", "/nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no match"));
}

#[test]
fn resolve_json_output() {
    let dir = TempDir::new().unwrap();
    let output = bx(&dir)
        .args(["resolve", "/about", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["matched"]["page"], "about");
    assert_eq!(value["matched"]["index"], 3);
}

#[test]
fn config_file_replaces_route_table() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("bx.json"),
        r#"{"routes": [{"path": "/", "page": "about"}]}"#,
    )
    .unwrap();

    // A non-exact root route catches everything
    bx(&dir)
        .args(["resolve", "/users/42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("about"));
}

#[test]
fn unknown_page_in_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("custom.json");
    fs::write(&config, r#"{"routes": [{"path": "/", "page": "dashboard"}]}"#).unwrap();

    bx(&dir)
        .arg("--config")
        .arg(&config)
        .arg("routes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("dashboard"))
        .stderr(predicate::str::contains(
            "known pages: about, home, user-detail, users-list",
        ));
}
