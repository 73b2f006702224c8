//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! gets its own temporary HOME so catalog, config and history state never
//! leak between tests.

use std::path::Path;
use std::process::Command;

/// Run a CLI command under the given HOME and return (stdout, stderr, code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "grillplan-cli", "--"])
        .args(args)
        .env("HOME", home)
        .env_remove("GRILLPLAN_ENV")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_item_list() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["item", "list"]);
    assert!(code == 0, "Item list failed");
    assert!(stdout.contains("maissi"));
    assert!(stdout.contains("lohi"));
    assert!(stdout.contains("makkara"));
}

#[test]
fn test_item_list_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["item", "list", "--json"]);
    assert!(code == 0, "Item list JSON failed");

    let items: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 8);

    let maissi = items.iter().find(|i| i["id"] == "maissi").unwrap();
    assert_eq!(maissi["type"], "veggie");
    assert_eq!(maissi["cookTimePerSide"], 3.0);
    assert_eq!(maissi["sides"], 8);

    let lohi = items.iter().find(|i| i["id"] == "lohi").unwrap();
    assert_eq!(lohi["cookTimeSecondSide"], 5.0);

    let parsa = items.iter().find(|i| i["id"] == "parsa").unwrap();
    assert!(parsa.get("cookTimeSecondSide").is_none());
}

#[test]
fn test_item_show() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["item", "show", "makkara"]);
    assert!(code == 0, "Item show failed");

    let item: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(item["id"], "makkara");
    assert_eq!(item["type"], "meat");
}

#[test]
fn test_item_show_unknown() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["item", "show", "bogus"]);
    assert!(code == 1, "Unknown item should fail");
    assert!(stderr.contains("no such item: bogus"));
}

#[test]
fn test_item_add_and_remove() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &[
            "item", "add", "--name", "Halloumi", "--kind", "veggie", "--per-side", "2",
        ],
    );
    assert!(code == 0, "Item add failed");

    let item: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let id = item["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("custom-"));
    assert_eq!(item["name"], "Halloumi");
    assert_eq!(item["sides"], 2);

    let (stdout, _, code) = run_cli(home.path(), &["item", "list"]);
    assert!(code == 0, "Item list failed");
    assert!(stdout.contains("Halloumi"));

    let (stdout, _, code) = run_cli(home.path(), &["item", "remove", &id]);
    assert!(code == 0, "Item remove failed");
    assert!(stdout.contains("removed"));

    let (stdout, _, code) = run_cli(home.path(), &["item", "list"]);
    assert!(code == 0, "Item list failed");
    assert!(!stdout.contains("Halloumi"));
}

#[test]
fn test_item_add_rejects_invalid_draft() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &[
            "item", "add", "--name", "", "--kind", "meat", "--per-side", "0.1",
        ],
    );
    assert!(code == 1, "Invalid draft should fail");
    assert!(stderr.contains("Name is required"));
    assert!(stderr.contains("cookTimePerSide"));
}

#[test]
fn test_item_remove_default_is_protected() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["item", "remove", "makkara"]);
    assert!(code == 1, "Removing a default item should fail");
    assert!(stderr.contains("cannot remove default item: makkara"));

    let (stdout, _, code) = run_cli(home.path(), &["item", "list"]);
    assert!(code == 0, "Item list failed");
    assert!(stdout.contains("makkara"));
}

#[test]
fn test_plan_aligns_finish_times() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["plan", "kana", "ulkofile"]);
    assert!(code == 0, "Plan failed");
    assert!(stdout.contains("Grill plan: 2 item(s), everything off at 10:00"));
    // ulkofile starts at 5:00 and flips half way through its 5 minutes.
    assert!(stdout.contains("07:30"));
}

#[test]
fn test_plan_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["plan", "kana", "ulkofile", "--json"]);
    assert!(code == 0, "Plan JSON failed");

    let timeline: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(timeline["totalTime"], 10.0);

    let items = timeline["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "kana");
    assert_eq!(items[0]["startTime"], 0.0);
    assert_eq!(items[1]["id"], "ulkofile");
    assert_eq!(items[1]["startTime"], 5.0);
    assert_eq!(items[1]["endTime"], 10.0);
    assert_eq!(items[1]["flips"][0], 2.5);
    assert_eq!(items[1]["flipTimes"][0], 7.5);
}

#[test]
fn test_plan_without_items() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["plan"]);
    assert!(code == 0, "Empty plan should not fail");
    assert!(stdout.contains("Select items to grill first."));
}

#[test]
fn test_plan_unknown_item() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["plan", "bogus"]);
    assert!(code == 1, "Unknown selection should fail");
    assert!(stderr.contains("no such item: bogus"));
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "display.minute_cols"]);
    assert!(code == 0, "Config get failed");
    assert_eq!(stdout.trim(), "4");

    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "display.minute_cols", "2"]);
    assert!(code == 0, "Config set failed");
    assert_eq!(stdout.trim(), "ok");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "display.minute_cols"]);
    assert!(code == 0, "Config get failed");
    assert_eq!(stdout.trim(), "2");
}

#[test]
fn test_config_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "display.nope"]);
    assert!(code == 1, "Unknown config key should fail");
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "list"]);
    assert!(code == 0, "Config list failed");

    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["notifications"]["enabled"], true);
    assert_eq!(config["display"]["minute_cols"], 4);
}

#[test]
fn test_history_starts_empty() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["history", "list"]);
    assert!(code == 0, "History list failed");
    assert_eq!(stdout.trim(), "[]");

    let (stdout, _, code) = run_cli(home.path(), &["history", "stats"]);
    assert!(code == 0, "History stats failed");

    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["total_sessions"], 0);
    assert_eq!(stats["today_sessions"], 0);
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["completions", "bash"]);
    assert!(code == 0, "Completions failed");
    assert!(stdout.contains("grillplan"));
}

#[test]
fn test_cook_help() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["cook", "--help"]);
    assert!(code == 0, "Cook help failed");
    assert!(stdout.contains("guided"));
}
