// ABOUTME: Integration tests for the promptfolio CLI commands.
// ABOUTME: Validates --help output and the offline init, render, and status commands.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn promptfolio_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("promptfolio"))
}

const CONFIG: &str = r#"
profile:
  name: Ada Lovelace
  title: Mathematician
  email: ada@example.com
  skills: Analysis, Notation
"#;

#[test]
fn help_shows_commands() {
    promptfolio_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("callback"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn init_creates_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("promptfolio.yml");

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--name", "Grace Hopper"])
        .assert()
        .success();

    assert!(config_path.exists(), "promptfolio.yml should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("name: Grace Hopper"));
    assert!(content.contains("grace_period: 60s"));
}

#[test]
fn init_output_reloads_names_with_yaml_syntax() {
    let temp_dir = tempfile::tempdir().unwrap();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--name", "Ada #1 Lovelace"])
        .assert()
        .success();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["status", "--login", "ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada-#1-lovelace-portfolio"));
}

#[test]
fn init_refuses_to_overwrite_existing_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("promptfolio.yml");

    fs::write(&config_path, "existing: config").unwrap();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn render_writes_the_page() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("promptfolio.yml"), CONFIG).unwrap();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["render", "--out", "site.html", "--login", "ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("site.html"));

    let html = fs::read_to_string(temp_dir.path().join("site.html")).unwrap();
    assert!(html.contains("Ada Lovelace"));
    assert!(html.contains("Notation"));
    assert!(html.contains("https://github.com/ada"));
}

#[test]
fn status_prints_derived_urls() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("promptfolio.yml"), CONFIG).unwrap();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["status", "--login", "ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada-lovelace-portfolio"))
        .stdout(predicate::str::contains(
            "https://ada.github.io/ada-lovelace-portfolio",
        ));
}

#[test]
fn status_json_is_machine_readable() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("promptfolio.yml"), CONFIG).unwrap();

    let output = promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["--json", "status", "--login", "ada"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["target"], "ada-lovelace-portfolio");
    assert_eq!(
        json["repository_url"],
        "https://github.com/ada/ada-lovelace-portfolio"
    );
}

#[test]
fn missing_config_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["status", "--login", "ada"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration file not found"));
}

#[test]
fn deploy_without_token_fails_before_network() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("promptfolio.yml"), CONFIG).unwrap();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .env_remove("PROMPTFOLIO_TEST_TOKEN")
        .args(["deploy", "--token-env", "PROMPTFOLIO_TEST_TOKEN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PROMPTFOLIO_TEST_TOKEN"));
}

#[test]
fn callback_without_login_reports_no_pending_authorization() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config = format!(
        "{CONFIG}github:\n  client_id: Iv1.test\n  client_secret: shh\nstate_dir: {}\n",
        temp_dir.path().join("state").display()
    );
    fs::write(temp_dir.path().join("promptfolio.yml"), config).unwrap();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .args(["callback", "--code", "abc", "--state", "xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no pending authorization"));
}

#[test]
fn login_stores_state_and_prints_authorize_url() {
    let temp_dir = tempfile::tempdir().unwrap();
    let state_dir = temp_dir.path().join("state");
    let config = format!(
        "{CONFIG}github:\n  client_id: Iv1.test\n  client_secret: shh\nstate_dir: {}\n",
        state_dir.display()
    );
    fs::write(temp_dir.path().join("promptfolio.yml"), config).unwrap();

    promptfolio_cmd()
        .current_dir(temp_dir.path())
        .arg("login")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://github.com/login/oauth/authorize?client_id=Iv1.test",
        ))
        .stdout(predicate::str::contains("allow_signup=true"));

    let stored = fs::read_to_string(state_dir.join("pending-auth.json")).unwrap();
    assert!(stored.contains("oauth_state"));
    assert!(stored.contains("pending_profile"));
}
