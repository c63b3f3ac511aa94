//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own HOME and plan file.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

struct Sandbox {
    home: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    fn plan(&self) -> PathBuf {
        self.home.path().join("plan.json")
    }

    /// Run a CLI command and return (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let plan = self.plan();
        let output = Command::new(env!("CARGO_BIN_EXE_examplan"))
            .env("HOME", self.home.path())
            .env_remove("EXAMPLAN_ENV")
            .env_remove("RUST_LOG")
            .arg("--plan")
            .arg(&plan)
            .args(args)
            .output()
            .expect("Failed to execute CLI command");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        (stdout, stderr, code)
    }

    fn ok(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "{args:?} failed: {stderr}");
        stdout
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.ok(args)).expect("Failed to parse JSON output")
    }
}

fn placed_id(stdout: &str) -> String {
    stdout
        .trim()
        .strip_prefix("Session placed: ")
        .expect("placement output")
        .to_string()
}

fn setup(sb: &Sandbox) {
    sb.ok(&["subject", "add", "Korean", "--exam", "2025-06-10", "--sessions", "4"]);
    sb.ok(&["subject", "add", "Math", "--exam", "2025-06-11", "--sessions", "5"]);
}

#[test]
fn test_window_without_subjects() {
    let sb = Sandbox::new();
    let stdout = sb.ok(&["window"]);
    assert!(stdout.contains("placement is closed"));
    assert!(!sb.plan().exists());
}

#[test]
fn test_subject_add_and_window() {
    let sb = Sandbox::new();
    setup(&sb);

    let subjects = sb.json(&["subject", "list", "--json"]);
    assert_eq!(subjects.as_array().unwrap().len(), 2);
    assert_eq!(subjects[0]["name"], "Korean");
    assert_eq!(subjects[0]["planned_sessions"], 4);

    let window = sb.json(&["window", "--json"]);
    assert_eq!(window["window"]["window_days"], 15);
    assert_eq!(window["window"]["start_date"], "2025-05-26");
    assert_eq!(window["window"]["placement_deadline"], "2025-06-09");
}

#[test]
fn test_place_toggle_and_errors() {
    let sb = Sandbox::new();
    setup(&sb);

    let id = placed_id(&sb.ok(&["place", "2025-06-01", "Korean"]));
    let stdout = sb.ok(&["place", "2025-06-01", "Korean"]);
    assert!(stdout.contains(&format!("Session removed: {id}")));

    let (_, stderr, code) = sb.run(&["place", "2025-06-10", "Korean"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: 2025-06-10 is after the placement deadline"), "{stderr}");

    let (_, stderr, code) = sb.run(&["place", "2025-06-01", "History"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("History"));
}

#[test]
fn test_consecutive_day_is_a_warning() {
    let sb = Sandbox::new();
    setup(&sb);
    sb.ok(&["place", "2025-06-01", "Math"]);

    let (stdout, stderr, code) = sb.run(&["place", "2025-06-02", "Math"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("Session placed:"));
    assert!(stderr.contains("warning:"), "{stderr}");
}

#[test]
fn test_outline_scopes_and_move() {
    let sb = Sandbox::new();
    setup(&sb);
    sb.ok(&["outline", "set", "Korean", "1.1\n1.2\n2.1\n2.2\n3.1"]);
    let late = placed_id(&sb.ok(&["place", "2025-06-03", "Korean"]));
    let early = placed_id(&sb.ok(&["place", "2025-06-01", "Korean"]));

    let days = sb.json(&["show", "--json"]);
    let day = days
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["date"] == "2025-06-01")
        .unwrap();
    assert_eq!(day["sessions"][0]["scope"], "1.1 / 1.2");

    let stdout = sb.ok(&["move", "2025-06-01", &early[..8], "-1"]);
    assert!(stdout.contains("stays on 2025-06-01"));
    let stdout = sb.ok(&["move", "2025-06-01", &early, "5"]);
    assert!(stdout.contains("2025-06-01 -> 2025-06-03"));

    // same day now: the earlier-placed session keeps the first chunk
    let preview = sb.ok(&["outline", "preview", "Korean"]);
    assert!(preview.contains("Session 1 [2025-06-03] 2 line(s): 1.1 / 1.2"), "{preview}");

    let stdout = sb.ok(&["remove", "2025-06-03", &late]);
    assert!(stdout.contains(&late));
}

#[test]
fn test_notes_mastery_and_progress() {
    let sb = Sandbox::new();
    setup(&sb);
    sb.ok(&["note", "set", "2025-06-02", "--academy", "math 7pm"]);
    let notes = sb.json(&["note", "list", "--json"]);
    assert_eq!(notes["2025-06-02"]["academy"], "math 7pm");

    sb.ok(&["mastery", "toggle", "Math", "1"]);
    let (_, _, code) = sb.run(&["mastery", "toggle", "Math", "0"]);
    assert_eq!(code, 1);

    sb.ok(&["place", "2025-06-01", "Korean"]);
    let progress = sb.json(&["progress", "--json"]);
    assert_eq!(progress["subjects"][0]["name"], "Math");
    assert_eq!(progress["subjects"][0]["mastered"], 1);
    assert_eq!(progress["subjects"][1]["remaining"], 3);
}

#[test]
fn test_subject_removal_warns_about_orphans() {
    let sb = Sandbox::new();
    setup(&sb);
    sb.ok(&["place", "2025-06-01", "Korean"]);
    let (_, stderr, code) = sb.run(&["subject", "remove", "Korean"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("warning:"), "{stderr}");
}

#[test]
fn test_config_get_set() {
    let sb = Sandbox::new();
    assert_eq!(sb.ok(&["config", "get", "planning.max_planned_sessions"]).trim(), "8");
    sb.ok(&["config", "set", "planning.default_planned_sessions", "6"]);
    sb.ok(&["subject", "add", "Art"]);
    let subjects = sb.json(&["subject", "list", "--json"]);
    assert_eq!(subjects[0]["planned_sessions"], 6);

    let (_, _, code) = sb.run(&["config", "get", "nope"]);
    assert_eq!(code, 1);
    assert_eq!(sb.ok(&["config", "get", "plan_file"]).trim(), "");
}

#[test]
fn test_config_rejects_inverted_quota_range() {
    let sb = Sandbox::new();
    let (_, stderr, code) = sb.run(&["config", "set", "planning.min_planned_sessions", "9"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("planning.min_planned_sessions"), "{stderr}");
    assert_eq!(sb.ok(&["config", "get", "planning.min_planned_sessions"]).trim(), "4");

    let listed = sb.ok(&["config", "list"]);
    assert!(listed.contains("[planning]"), "{listed}");
}
