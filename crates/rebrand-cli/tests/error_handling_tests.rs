//! Tests for error handling, exit codes and suggestions.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"files = ["README.md", "app"]
source_roots = ["src"]

[template]
id   = "a.b"
name = "Krust"
"#;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("rebrand.toml"), MANIFEST).unwrap();
    fs::write(root.join("README.md"), "Krust a.b\n").unwrap();
    // Listed as a file but is a directory.
    fs::create_dir_all(root.join("app")).unwrap();
    fs::create_dir_all(root.join("src/a/b")).unwrap();
    fs::write(root.join("src/a/b/Main.kt"), "package a.b\n").unwrap();
    temp
}

fn rebrand() -> Command {
    let mut cmd = Command::cargo_bin("rebrand").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn untouched(root: &Path) -> bool {
    fs::read_to_string(root.join("README.md")).unwrap() == "Krust a.b\n"
        && root.join("src/a/b/Main.kt").is_file()
}

#[test]
fn test_error_invalid_app_id() {
    let temp = project();

    rebrand()
        .current_dir(temp.path())
        .args(["init", "--app-id", "com..rocket", "--app-name", "Rocket", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid identifier"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(untouched(temp.path()));
}

#[test]
fn test_error_invalid_app_name() {
    let temp = project();

    rebrand()
        .current_dir(temp.path())
        .args(["init", "--app-id", "com.acme.rocket", "--app-name", "My App", "--yes"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid display name"));

    assert!(untouched(temp.path()));
}

#[test]
fn test_error_missing_required_flag() {
    rebrand()
        .args(["init", "--app-name", "Rocket"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--app-id"));
}

#[test]
fn test_error_missing_manifest_suggests_builtin() {
    let temp = TempDir::new().unwrap();

    rebrand()
        .current_dir(temp.path())
        .args(["init", "--app-id", "com.acme.rocket", "--app-name", "Rocket", "--yes"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Manifest not found"))
        .stderr(predicate::str::contains("--builtin"));
}

#[test]
fn test_error_missing_project_dir() {
    let temp = TempDir::new().unwrap();

    rebrand()
        .args(["init", "--app-id", "com.acme.rocket", "--app-name", "Rocket", "--yes"])
        .arg("--project")
        .arg(temp.path().join("nope"))
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid project root"));
}

#[test]
fn test_error_malformed_manifest() {
    let temp = project();
    fs::write(temp.path().join("rebrand.toml"), "source_root = [\"src\"]\n").unwrap();

    rebrand()
        .current_dir(temp.path())
        .args(["init", "--app-id", "com.acme.rocket", "--app-name", "Rocket", "--yes"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Failed to parse manifest"));

    assert!(untouched(temp.path()));
}

#[test]
fn test_error_source_root_outside_project() {
    let temp = project();
    fs::write(
        temp.path().join("rebrand.toml"),
        "source_roots = [\"../elsewhere\"]\n[template]\nid = \"a.b\"\nname = \"Krust\"\n",
    )
    .unwrap();

    rebrand()
        .current_dir(temp.path())
        .args(["init", "--app-id", "x.y", "--app-name", "Rocket", "--yes"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("invalid source root"));

    assert!(untouched(temp.path()));
}

#[test]
fn test_file_failure_is_a_warning_by_default() {
    let temp = project();

    rebrand()
        .current_dir(temp.path())
        .args(["init", "--app-id", "x.y", "--app-name", "Rocket", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("app"));

    assert_eq!(
        fs::read_to_string(temp.path().join("README.md")).unwrap(),
        "Rocket x.y\n"
    );
    assert!(temp.path().join("src/x/y/Main.kt").is_file());
}

#[test]
fn test_file_failure_is_fatal_when_strict() {
    let temp = project();

    rebrand()
        .current_dir(temp.path())
        .args(["init", "--app-id", "x.y", "--app-name", "Rocket", "--yes", "--strict"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Initialization incomplete"));
}

#[test]
fn test_strict_from_environment() {
    let temp = project();

    rebrand()
        .current_dir(temp.path())
        .env("REBRAND__DEFAULTS__STRICT", "true")
        .args(["init", "--app-id", "x.y", "--app-name", "Rocket", "--yes"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_error_confirmation_needs_terminal() {
    let temp = project();

    rebrand()
        .current_dir(temp.path())
        .args(["init", "--app-id", "x.y", "--app-name", "Rocket"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--yes").or(predicate::str::contains("confirmation")));

    assert!(untouched(temp.path()));
}

#[test]
fn test_error_unknown_config_key() {
    rebrand()
        .args(["config", "get", "does.not.exist"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_error_missing_config_file() {
    let temp = TempDir::new().unwrap();

    rebrand()
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .args(["config", "list"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_error_json_format() {
    let temp = TempDir::new().unwrap();

    let assert = rebrand()
        .current_dir(temp.path())
        .args(["--output-format", "json", "check"])
        .assert()
        .failure()
        .code(3);

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    // Log events share stderr; the error document is the last line.
    let last = stderr.lines().rfind(|l| !l.trim().is_empty()).unwrap();
    let json: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(json["exit_code"], 3);
}
