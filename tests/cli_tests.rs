#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{write_schema, USER_SERVICE};
use std::fs;
use std::process::Command;

fn routegen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_routegen"));
    cmd.env("ROUTEGEN_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_generate_writes_bundle_and_report() {
    let (dir, schema) = write_schema("api.yaml", USER_SERVICE);
    let out = dir.path().join("gen");

    let output = routegen()
        .arg("generate")
        .arg("--schema")
        .arg(&schema)
        .arg("--output")
        .arg(&out)
        .arg("--format")
        .arg("yaml")
        .arg("--report")
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let bundle = fs::read_to_string(out.join("routegen.yaml")).unwrap();
    assert!(bundle.contains("demo.v1.UserService/GetUser"));
    let report = fs::read_to_string(out.join("routes.txt")).unwrap();
    assert!(report.contains("GET /files/*file_path"));
}

#[test]
fn test_cli_check_reports_issues() {
    let broken = USER_SERVICE.replace("/files/{file_path=**}", "/files/{file_path=**}/{x=**}");
    let (_dir, schema) = write_schema("api.yaml", &broken);

    let output = routegen()
        .arg("check")
        .arg("--schema")
        .arg(&schema)
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[InvalidPathTemplate] service:UserService/method:DownloadFile"));
}

#[test]
fn test_cli_generate_refuses_partial_output() {
    let broken = USER_SERVICE.replace("/files/{file_path=**}", "/files/{file_path=**}/{x=**}");
    let (dir, schema) = write_schema("api.yaml", &broken);
    let out = dir.path().join("gen");

    let status = routegen()
        .args(["generate", "--schema"])
        .arg(&schema)
        .arg("--output")
        .arg(&out)
        .status()
        .expect("run cli");
    assert!(!status.success());
    assert!(!out.join("routegen.json").exists());

    let status = routegen()
        .args(["generate", "--allow-partial", "--schema"])
        .arg(&schema)
        .arg("--output")
        .arg(&out)
        .status()
        .expect("run cli");
    assert!(status.success());
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("routegen.json")).unwrap()).unwrap();
    assert_eq!(json["operations"].as_array().unwrap().len(), 4);
}

#[test]
fn test_cli_uses_config_next_to_schema() {
    let (dir, schema) = write_schema("api.yaml", USER_SERVICE);
    fs::write(dir.path().join("routegen.toml"), "options_key = \"none\"\n").unwrap();

    let output = routegen()
        .args(["inspect", "--dump", "json", "--schema"])
        .arg(&schema)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<_> = json["registrations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["operation_id"].as_str().unwrap().to_string())
        .collect();
    assert!(ids.contains(&"demo.v1.UserService/SyncUsers".to_string()));
}

#[test]
fn test_cli_missing_schema_file() {
    let output = routegen()
        .args(["check", "--schema", "/nonexistent/api.yaml"])
        .output()
        .expect("run cli");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read schema"));
}
