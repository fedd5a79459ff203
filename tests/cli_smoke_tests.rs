use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn pick_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("bind")
        .local_addr()
        .expect("addr")
        .port()
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let db_path = dir.join("trait-scan.db");
    let config_path = dir.join("trait-scan.toml");
    // Nothing listens on the port, so every backend call falls back to fixtures.
    let body = format!(
        r#"
[storage]
path = "{}"
max_connections = 1

[api]
base_url = "http://127.0.0.1:{}/api"
timeout_secs = 1
"#,
        db_path.to_string_lossy().replace('\\', "/"),
        pick_free_port()
    );
    fs::write(&config_path, body).expect("write config");
    config_path
}

fn run(config: &Path, args: &[&str]) -> Output {
    let output = Command::new(env!("CARGO_BIN_EXE_trait-scan"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RUST_LOG", "trait_scan=warn")
        .output()
        .expect("run trait-scan");
    assert!(
        output.status.success(),
        "trait-scan {:?} failed: stderr='{}'",
        args,
        String::from_utf8_lossy(&output.stderr).trim()
    );
    output
}

fn run_json(config: &Path, args: &[&str]) -> Value {
    let output = run(config, args);
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn cli_smoke_plan_and_seed_flow() {
    let temp_dir = tempdir().expect("tempdir");
    let config = write_config(temp_dir.path());

    let shown = run_json(&config, &["plan", "show"]);
    assert_eq!(shown["tier"], "free");
    assert_eq!(shown["usage"]["used"], 0);

    let set = run_json(&config, &["plan", "set", "pro"]);
    assert_eq!(set["tier"], "pro");

    let shown = run_json(&config, &["plan", "show"]);
    assert_eq!(shown["tier"], "pro");
    assert!(shown["usage"].is_null());

    let seed = run_json(&config, &["seed", "@johndoe"]);
    assert_eq!(seed["source"], "fallback");
    let seed_id = seed["data"]["seed_id"].as_str().expect("seed id").to_string();
    assert!(seed_id.starts_with("s_"));

    let events = run_json(&config, &["events", "list"]);
    let events = events.as_array().expect("event array");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["name"], "seed_created");
    assert_eq!(events[0]["payload"]["seedId"], seed_id.as_str());

    let summary = run_json(&config, &["events", "summary"]);
    assert_eq!(summary["seeds_created"], 1);
}

#[test]
fn cli_smoke_rejects_unknown_plan() {
    let temp_dir = tempdir().expect("tempdir");
    let config = write_config(temp_dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_trait-scan"))
        .arg("--config")
        .arg(&config)
        .args(["plan", "set", "enterprise"])
        .output()
        .expect("run trait-scan");
    assert!(!output.status.success());

    let shown = run_json(&config, &["plan", "show"]);
    assert_eq!(shown["tier"], "free");
}

#[test]
fn cli_smoke_export_and_clear() {
    let temp_dir = tempdir().expect("tempdir");
    let config = write_config(temp_dir.path());
    let out = temp_dir.path().join("events.json");

    let out_arg = out.to_string_lossy().to_string();

    run(&config, &["seed", "username123"]);
    run(&config, &["events", "export", "--out", out_arg.as_str()]);
    let exported: Value =
        serde_json::from_str(&fs::read_to_string(&out).expect("read export")).expect("parse");
    assert_eq!(exported.as_array().map(Vec::len), Some(1));

    run(&config, &["events", "clear"]);
    let events = run_json(&config, &["events", "list"]);
    assert_eq!(events.as_array().map(Vec::len), Some(0));
}
