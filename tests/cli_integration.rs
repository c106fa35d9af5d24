//! Integration tests for the `td` CLI.
//!
//! Each test creates a temp directory holding the task file, runs `td` as a
//! subprocess, and verifies stdout and/or file contents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use pretty_assertions::assert_eq;

/// Get the path to the built `td` binary.
fn td_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("td");
    path
}

/// Base command: config isolated to the temp dir, data file inside it.
fn td_command(dir: &Path) -> Command {
    let mut cmd = Command::new(td_bin());
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .arg("--data")
        .arg(dir.join("data.json"));
    cmd
}

/// Run `td` with the given args, returning (stdout, stderr, success).
fn run_td(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = td_command(dir)
        .args(args)
        .output()
        .expect("failed to run td");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `td` expecting success, return stdout.
fn run_td_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_td(dir, args);
    if !success {
        panic!(
            "td {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Write a task file with one overdue-by-date task, one done, one future.
fn create_test_data(dir: &Path) {
    fs::write(
        dir.join("data.json"),
        r#"[
  {
    "id": 0,
    "task": "File taxes",
    "category": "Admin",
    "priority": 1,
    "status": 0,
    "description": "Before the deadline",
    "created_at": "2024-01-01 09:00:00",
    "due_date": "2024-04-15 17:00:00"
  },
  {
    "id": 1,
    "task": "Buy groceries",
    "category": "Home",
    "priority": 3,
    "status": 1,
    "description": "Milk and eggs",
    "created_at": "2024-01-02 09:00:00",
    "due_date": "2024-01-03 09:00:00"
  },
  {
    "id": 4,
    "task": "Renew passport",
    "category": "Admin",
    "priority": 2,
    "status": 0,
    "description": "",
    "created_at": "2024-01-03 09:00:00",
    "due_date": "2999-01-01 00:00:00"
  }
]"#,
    )
    .unwrap();
}

fn ids_from_json(out: &str) -> Vec<u64> {
    let parsed: serde_json::Value = serde_json::from_str(out).unwrap();
    parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_u64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_list_marks_overdue_and_saves() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["list"]);
    assert!(out.contains("Total tasks: 3  |  Done: 1  |  Not done: 2"));
    assert!(out.contains("Terlambat"));
    assert!(out.contains("Renew passport"));

    let saved = fs::read_to_string(tmp.path().join("data.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(parsed[0]["status"], 2);
    assert_eq!(parsed[1]["status"], 1);
    assert_eq!(parsed[2]["status"], 0);
}

#[test]
fn test_list_missing_file_shows_empty_table() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_td_ok(tmp.path(), &["list"]);
    assert!(out.contains("Empty Data"));
    assert!(out.contains("Total tasks: 0"));
}

#[test]
fn test_list_search_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["list", "--search", "ADMIN", "--json"]);
    assert_eq!(ids_from_json(&out), vec![0, 4]);
}

#[test]
fn test_list_search_status_label() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["list", "--search", "terlambat", "--json"]);
    assert_eq!(ids_from_json(&out), vec![0]);
}

#[test]
fn test_list_sort_priority_desc() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["list", "--sort", "priority", "--desc", "--json"]);
    assert_eq!(ids_from_json(&out), vec![1, 4, 0]);
}

#[test]
fn test_list_priority_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["list", "--priority", "2", "--json"]);
    assert_eq!(ids_from_json(&out), vec![4]);
}

#[test]
fn test_list_unknown_sort_field() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let (_, stderr, success) = run_td(tmp.path(), &["list", "--sort", "owner"]);
    assert!(!success);
    assert!(stderr.contains("unknown field 'owner'"));
}

#[test]
fn test_stats_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["stats", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["total"], 3);
    assert_eq!(parsed["done"], 1);
    assert_eq!(parsed["not_done"], 2);
}

#[test]
fn test_corrupt_file_loads_empty_and_is_backed_up() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(tmp.path().join("data.json"), "{not json").unwrap();

    let (stdout, stderr, success) = run_td(tmp.path(), &["list"]);
    assert!(success);
    assert!(stdout.contains("Empty Data"));
    assert!(stderr.contains("warning: could not parse"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("data.json.bak")).unwrap(),
        "{not json"
    );
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_add_assigns_next_id() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(
        tmp.path(),
        &[
            "add",
            "Call plumber",
            "--due",
            "2999-06-01 10:00:00",
            "--category",
            "Home",
            "--priority",
            "4",
        ],
    );
    assert_eq!(out.trim(), "5");

    let saved = fs::read_to_string(tmp.path().join("data.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&saved).unwrap();
    let added = &parsed[3];
    assert_eq!(added["task"], "Call plumber");
    assert_eq!(added["priority"], 4);
    assert_eq!(added["status"], 0);
}

#[test]
fn test_add_into_empty_store_starts_at_zero() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_td_ok(tmp.path(), &["add", "First", "--due", "2999-01-01 00:00:00", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], 0);
}

#[test]
fn test_add_rejects_bad_input() {
    let tmp = tempfile::TempDir::new().unwrap();

    let (_, stderr, success) = run_td(tmp.path(), &["add", "x", "--due", "tomorrow"]);
    assert!(!success);
    assert!(stderr.contains("invalid date format"));

    let (_, stderr, success) = run_td(
        tmp.path(),
        &["add", "x", "--due", "2999-01-01 00:00:00", "--priority", "high"],
    );
    assert!(!success);
    assert!(stderr.contains("priority must be a number"));

    let (_, stderr, success) = run_td(tmp.path(), &["add", "x", "--due", "2000-01-01 00:00:00"]);
    assert!(!success);
    assert!(stderr.contains("due date must be later"));

    assert!(!tmp.path().join("data.json").exists());
}

#[test]
fn test_done_transitions() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["done", "4"]);
    assert!(out.contains("4 → done"));

    let (_, stderr, success) = run_td(tmp.path(), &["done", "4"]);
    assert!(!success);
    assert!(stderr.contains("task 4 is already done"));

    // task 0 was swept to overdue when td opened the file
    let (_, stderr, success) = run_td(tmp.path(), &["done", "0"]);
    assert!(!success);
    assert!(stderr.contains("task 0 is already overdue"));

    let (_, stderr, success) = run_td(tmp.path(), &["done", "99"]);
    assert!(!success);
    assert!(stderr.contains("task not found: 99"));
}

#[test]
fn test_delete_logs_to_recovery() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["delete", "1"]);
    assert!(out.contains("deleted 1 (Buy groceries)"));

    let (_, stderr, success) = run_td(tmp.path(), &["delete", "1"]);
    assert!(!success);
    assert!(stderr.contains("task not found: 1"));

    let out = run_td_ok(tmp.path(), &["recovery", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["category"], "delete");
    assert!(entries[0]["body"].as_str().unwrap().contains("Buy groceries"));
}

#[test]
fn test_delete_and_done_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let out = run_td_ok(tmp.path(), &["done", "4", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], 4);
    assert_eq!(parsed["status"], "done");

    let out = run_td_ok(tmp.path(), &["delete", "1", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["id"], 1);
    assert_eq!(parsed["task"], "Buy groceries");
}

#[test]
fn test_add_fails_when_ids_exhausted() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("data.json"),
        r#"[{"id": 18446744073709551615, "task": "last", "category": "", "priority": 1,
            "status": 1, "description": "", "created_at": "2024-01-01 00:00:00",
            "due_date": "2024-01-02 00:00:00"}]"#,
    )
    .unwrap();

    let (_, stderr, success) = run_td(tmp.path(), &["add", "x", "--due", "2999-01-01 00:00:00"]);
    assert!(!success);
    assert!(stderr.contains("no task id left to assign"));

    let out = run_td_ok(tmp.path(), &["stats", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["total"], 1);
}

#[test]
fn test_non_utf8_file_is_backed_up() {
    let tmp = tempfile::TempDir::new().unwrap();
    let original = b"[{\"task\": \"Tugas \xe9\"}]".to_vec();
    fs::write(tmp.path().join("data.json"), &original).unwrap();

    run_td_ok(tmp.path(), &["add", "Fresh start", "--due", "2999-01-01 00:00:00"]);

    assert_eq!(fs::read(tmp.path().join("data.json.bak")).unwrap(), original);
    let out = run_td_ok(tmp.path(), &["recovery", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed[0]["category"], "load");
}

#[test]
fn test_recovery_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = run_td_ok(tmp.path(), &["recovery"]);
    assert!(out.contains("No recovery entries."));
}

#[test]
fn test_config_disables_recovery_log() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());
    let config_dir = tmp.path().join("config/td");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "recovery_log = false\n").unwrap();

    run_td_ok(tmp.path(), &["delete", "1"]);
    assert!(!tmp.path().join(".td-recovery.log").exists());
}

#[test]
fn test_config_data_path() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config_dir = tmp.path().join("config/td");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "data_path = \"tasks.json\"\n").unwrap();

    // no --data flag: the configured path is used, relative to the working dir
    let output = Command::new(td_bin())
        .current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("config"))
        .args(["add", "Configured", "--due", "2999-01-01 00:00:00"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(tmp.path().join("tasks.json").exists());
}

// ---------------------------------------------------------------------------
// Interactive menu
// ---------------------------------------------------------------------------

#[test]
fn test_menu_session() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_data(tmp.path());

    let mut child = td_command(tmp.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"3\n4\n4\npassport\n8\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Search: passport"));
    assert!(stdout.contains("Goodbye!"));

    let saved = fs::read_to_string(tmp.path().join("data.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(parsed[2]["status"], 1);
}
