//! Integration tests for the conveyor CLI: JSON output and exit codes.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const STYLE_B: &str = r#"{
    "label": "Lathe 4",
    "style": "B",
    "class": "Standard",
    "infeed_length_in": 48.0,
    "discharge_height_in": 100.0,
    "incline_angle_deg": 60.0,
    "discharge_length_in": 24.0,
    "bar_width_in": 12.0,
    "magnet_pitch_in": 12.0,
    "belt_speed_fpm": 30.0,
    "required_throughput_lbs_hr": 1000.0,
    "bar_configuration": { "primary": { "ceramic_count": 5 } }
}"#;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn cli() -> Command {
    Command::cargo_bin("conveyor_cli").expect("binary exists")
}

#[test]
fn calc_prints_output_json() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(&dir, "input.json", STYLE_B);

    let assert = cli().arg("calc").arg(&input).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let output: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");

    assert_eq!(output["label"], "Lathe 4");
    assert_eq!(output["magnet_count"], 30);
    assert_eq!(output["chain_length_in"], 375.0);
    assert!(output["errors"].as_array().expect("errors array").is_empty());
}

#[test]
fn calc_exits_2_on_validation_errors() {
    let dir = TempDir::new().expect("temp dir");
    let aluminum = STYLE_B.replace(
        r#""label": "Lathe 4","#,
        r#""label": "Lathe 4", "conveyed": { "material": "Aluminum" },"#,
    );
    let input = write_file(&dir, "input.json", &aluminum);

    cli()
        .arg("calc")
        .arg(&input)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("MATERIAL_NOT_MAGNETIC"));
}

#[test]
fn calc_exits_1_on_missing_file() {
    cli()
        .args(["calc", "/no/such/input.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read input"));
}

#[test]
fn calc_exits_1_on_bad_json() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(&dir, "input.json", "{ \"style\": ");
    cli()
        .arg("calc")
        .arg(&input)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid conveyor input"));
}

#[test]
fn settings_file_changes_limits() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_file(&dir, "input.json", STYLE_B);
    let settings = write_file(
        &dir,
        "settings.json",
        r#"{ "limits": { "max_belt_speed_fpm": 20.0 } }"#,
    );

    cli()
        .arg("calc")
        .arg(&input)
        .arg("--settings")
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("BELT_SPEED_HIGH"));
}

#[test]
fn fit_command() {
    cli()
        .args(["fit", "--oal", "12", "--length", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":5"));
}

#[test]
fn capacity_command() {
    let assert = cli()
        .args(["capacity", "--rare-earth", "4", "--width", "12"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let capacity: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let factor = capacity["saturation_factor"].as_f64().expect("factor");
    assert!(factor < 1.0 && factor > 0.8);
}

#[test]
fn pattern_command() {
    cli()
        .args(["pattern", "--mode", "interval", "--bars", "12", "--every", "4", "--secondary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"secondary_count\":3"));
}

#[test]
fn pattern_without_secondary_reports_issue() {
    cli()
        .args(["pattern", "--mode", "alternating", "--bars", "6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SecondaryMissing"))
        .stdout(predicate::str::contains("\"secondary_count\":0"));
}

#[test]
fn job_command_calculates_every_conveyor() {
    let dir = TempDir::new().expect("temp dir");
    let job = format!(
        r#"{{
            "meta": {{
                "version": "0.1.0",
                "job_id": "Q-100",
                "customer": "Acme Tool",
                "created": "2026-01-05T12:00:00Z",
                "modified": "2026-01-05T12:00:00Z"
            }},
            "conveyors": {{
                "5f0c8a36-2a47-4c1c-9b64-0d8c0e6f5c11": {STYLE_B}
            }}
        }}"#
    );
    let path = write_file(&dir, "job.json", &job);

    cli()
        .arg("job")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("5f0c8a36-2a47-4c1c-9b64-0d8c0e6f5c11"));
}

#[test]
fn job_command_rejects_newer_schema() {
    let dir = TempDir::new().expect("temp dir");
    let job = r#"{
        "meta": {
            "version": "0.9.0",
            "job_id": "Q-100",
            "customer": "Acme Tool",
            "created": "2026-01-05T12:00:00Z",
            "modified": "2026-01-05T12:00:00Z"
        },
        "conveyors": {}
    }"#;
    let path = write_file(&dir, "job.json", job);

    cli().arg("job").arg(&path).assert().code(1);
}
