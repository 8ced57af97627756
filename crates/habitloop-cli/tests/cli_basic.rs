//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command against `data_dir` and return (code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_habitloop-cli"))
        .args(args)
        .env("HABITLOOP_DATA_DIR", data_dir)
        .env_remove("HABITLOOP_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_today_on_fresh_directory() {
    let dir = tempfile::tempdir().unwrap();
    let today = run_json(dir.path(), &["today"]);
    assert_eq!(today["level"], 0);
    assert_eq!(today["grade"], "pending");
    assert_eq!(today["tasks"].as_array().unwrap().len(), 4);
    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("habitloop.db").exists());
}

#[test]
fn test_task_done_raises_level() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["task", "done", "0"]);
    let today = run_json(dir.path(), &["task", "done", "2"]);
    assert_eq!(today["level"], 2);
    assert_eq!(today["grade"], "passed");

    let today = run_json(dir.path(), &["task", "undo", "2"]);
    assert_eq!(today["level"], 1);

    let today = run_json(dir.path(), &["task", "toggle", "2"]);
    assert_eq!(today["level"], 2);
}

#[test]
fn test_task_time_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let today = run_json(dir.path(), &["task", "time", "1", "25"]);
    assert_eq!(today["tasks"][1]["time"], 25);
    assert_eq!(today["totalMinutes"], 25);

    let today = run_json(dir.path(), &["task", "time", "1", "-5"]);
    assert_eq!(today["tasks"][1]["time"], 0);

    let today = run_json(dir.path(), &["task", "time", "1", "abc"]);
    assert_eq!(today["tasks"][1]["time"], 0);
}

#[test]
fn test_unknown_task_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["task", "done", "9"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Unknown task id 9"), "stderr: {stderr}");
}

#[test]
fn test_comment_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let today = run_json(dir.path(), &["comment", "short walk"]);
    assert_eq!(today["comment"], "short walk");

    run_json(dir.path(), &["task", "done", "0"]);
    run_json(dir.path(), &["task", "done", "1"]);
    let stats = run_json(dir.path(), &["stats"]);
    assert_eq!(stats["streak"], 1);
    assert_eq!(stats["todayLevel"], 2);
    assert_eq!(stats["passCountCycle"], 1);
    assert_eq!(stats["passTarget"], 45);
    assert_eq!(stats["rate30"], 3);
    assert!(stats["cycleProgressPct"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_history_has_28_days() {
    let dir = tempfile::tempdir().unwrap();
    let strip = run_json(dir.path(), &["history"]);
    let cells = strip.as_array().unwrap();
    assert_eq!(cells.len(), 28);
    assert_eq!(cells[27]["recorded"], true);
}

#[test]
fn test_backup_export_then_import() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("backup.json");
    let backup_arg = backup.to_str().unwrap();

    run_json(dir.path(), &["task", "done", "3"]);
    let (code, stdout, _) = run_cli(dir.path(), &["backup", "export", "--out", backup_arg]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Backup written"));

    let other = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(other.path(), &["backup", "import", backup_arg]);
    assert_eq!(code, 0, "import failed: {stderr}");
    assert!(stdout.contains("Imported 1 days"));

    let today = run_json(other.path(), &["today"]);
    assert_eq!(today["tasks"][3]["done"], true);
}

#[test]
fn test_backup_import_rejects_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"startDate":"2026-01-01"}"#).unwrap();

    run_json(dir.path(), &["task", "done", "0"]);
    let (code, _, stderr) = run_cli(dir.path(), &["backup", "import", bad.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("history"), "stderr: {stderr}");

    let today = run_json(dir.path(), &["today"]);
    assert_eq!(today["level"], 1);
}

#[test]
fn test_timer_start_status_stop() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["timer", "start", "2"]);
    assert_eq!(code, 0);

    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status[0]["id"], 2);

    let (code, _, _) = run_cli(dir.path(), &["timer", "start", "2"]);
    assert_ne!(code, 0);

    let stopped = run_json(dir.path(), &["timer", "stop", "2"]);
    assert_eq!(stopped["type"], "timer_stopped");

    let status = run_json(dir.path(), &["timer", "status"]);
    assert!(status.as_array().unwrap().is_empty());
}

#[test]
fn test_config_get_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "passing_target"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2");

    let list = run_json(dir.path(), &["config", "list"]);
    assert_eq!(list["cycle_days"], 60);

    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_reward_locked_on_fresh_directory() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["reward"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Reward locked: 0/45"), "stderr: {stderr}");
}

#[test]
fn test_reward_lists_level_ups_once_unlocked() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "reward_cycle_goal = 1\n").unwrap();

    run_json(dir.path(), &["task", "done", "0"]);
    let (code, _, _) = run_cli(dir.path(), &["reward"]);
    assert_ne!(code, 0);

    run_json(dir.path(), &["task", "done", "1"]);
    let plan = run_json(dir.path(), &["reward"]);
    assert_eq!(plan["passCountCycle"], 1);
    assert_eq!(plan["passTarget"], 1);
    let level_ups = plan["levelUps"].as_array().unwrap();
    assert_eq!(level_ups.len(), 4);
    assert_eq!(level_ups[0]["taskId"], 0);
    assert!(level_ups[0]["suggestion"].is_string());
}

#[test]
fn test_json_outputs_use_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    let today = run_json(dir.path(), &["today"]);
    assert!(today.get("totalMinutes").is_some());

    let strip = run_json(dir.path(), &["history"]);
    assert!(strip[0].get("dayOfMonth").is_some());
    assert!(strip[0].get("day_of_month").is_none());
}
