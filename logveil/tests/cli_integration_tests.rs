// logveil/tests/cli_integration_tests.rs
//! Command-line integration tests for the `logveil` binary.
//!
//! Each test runs the compiled binary through `assert_cmd`, feeding input on stdin or
//! through temporary files, and asserts on stdout, stderr and the exit status.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// Runs `logveil` with `args`, feeding `input` on stdin.
fn run_logveil(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("logveil"));
    cmd.env_remove("LOGVEIL_CONFIG");
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("logveil-cli-tests-no-config"));
    cmd.env("RUST_LOG", "warn");
    cmd.args(args);
    cmd.write_stdin(input.as_bytes());
    cmd.assert()
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Result<Value> {
    Ok(serde_json::from_slice(&assert.get_output().stdout)?)
}

fn temp_file(suffix: &str, content: &str) -> Result<NamedTempFile> {
    let mut file = Builder::new().suffix(suffix).tempfile()?;
    file.write_all(content.as_bytes())?;
    Ok(file)
}

#[test]
fn test_redacts_a_json_document() -> Result<()> {
    let assert = run_logveil(r#"{"email":"user@example.com","orderId":"ORD-123"}"#, &[]).success();
    assert_eq!(stdout_json(&assert)?, json!({"email": "[REDACTED]", "orderId": "ORD-123"}));
    Ok(())
}

#[test]
fn test_line_mode_handles_json_and_free_text() -> Result<()> {
    let input = "{\"password\":\"hunter2\",\"level\":\"info\"}\nlogin from jane@example.com\nall good\n";
    run_logveil(input, &["--lines"])
        .success()
        .stdout(predicate::str::contains(r#"{"level":"info","password":"[REDACTED]"}"#))
        .stdout(predicate::str::contains("[REDACTED]\nall good"))
        .stdout(predicate::str::contains("jane@example.com").not());
    Ok(())
}

#[test]
fn test_strategy_flag_overrides_default() -> Result<()> {
    let assert = run_logveil(r#"{"email":"x@example.com","orderId":"ORD-1"}"#, &["--strategy", "remove"]).success();
    assert_eq!(stdout_json(&assert)?, json!({"orderId": "ORD-1"}));
    Ok(())
}

#[test]
fn test_region_flag_limits_detection() -> Result<()> {
    let input = r#"{"note":"NRIC S1234567D","ref":"rrn 900101-1234568"}"#;
    let assert = run_logveil(input, &["--region", "kr"]).success();
    assert_eq!(stdout_json(&assert)?, json!({"note": "NRIC S1234567D", "ref": "[REDACTED]"}));
    Ok(())
}

#[test]
fn test_unknown_region_fails() -> Result<()> {
    run_logveil("{}", &["--region", "zz"])
        .failure()
        .stderr(predicate::str::contains("Invalid --region value"));
    Ok(())
}

#[test]
fn test_config_file_is_applied() -> Result<()> {
    let config = temp_file(
        ".yaml",
        r##"
regions: [sg]
strategy: partial
never_redact: [email]
partial_masking:
  mask_char: "#"
  keep_left: 1
  keep_right: 1
"##,
    )?;
    let config_path = config.path().to_str().unwrap();
    let input = r#"{"email":"user@example.com","nric":"S1234567D"}"#;
    let assert = run_logveil(input, &["--config", config_path]).success();
    assert_eq!(
        stdout_json(&assert)?,
        json!({"email": "user@example.com", "nric": "S#######D"})
    );
    Ok(())
}

#[test]
fn test_invalid_config_file_fails() -> Result<()> {
    let config = temp_file(".yaml", "strategy: shred\n")?;
    run_logveil("{}", &["--config", config.path().to_str().unwrap()])
        .failure()
        .stderr(predicate::str::contains("unknown redaction strategy 'shred'"));
    Ok(())
}

#[test]
fn test_input_and_output_files() -> Result<()> {
    let input = temp_file(".json", r#"{"phone":"+60 12 345 6789","status":"ok"}"#)?;
    let output_dir = tempfile::tempdir()?;
    let output_path = output_dir.path().join("out.json");

    run_logveil(
        "",
        &[
            "--input",
            input.path().to_str().unwrap(),
            "--output",
            output_path.to_str().unwrap(),
        ],
    )
    .success()
    .stdout(predicate::str::is_empty());

    let written: Value = serde_json::from_str(&fs::read_to_string(&output_path)?)?;
    assert_eq!(written, json!({"phone": "[REDACTED]", "status": "ok"}));
    Ok(())
}

#[test]
fn test_stats_are_reported_on_stderr() -> Result<()> {
    let input = "{\"email\":\"a@example.com\",\"token\":\"abc\",\"msg\":\"hi\"}\n{\"email\":\"b@example.com\"}\n";
    run_logveil(input, &["--lines", "--stats", "--quiet"])
        .success()
        .stderr(predicate::str::contains("Redaction summary: 3 of 4 values redacted"))
        .stderr(predicate::str::contains("  email: 2"))
        .stderr(predicate::str::contains("  secret: 1"));
    Ok(())
}

#[test]
fn test_malformed_document_fails() -> Result<()> {
    run_logveil("{ not json", &[])
        .failure()
        .stderr(predicate::str::contains("Input is not a valid JSON document"));
    Ok(())
}
