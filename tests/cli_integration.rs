//! Integration tests for the `sd` CLI.
//!
//! Each test creates a temp session directory, runs `sd` as a subprocess,
//! and verifies stdout/stderr and/or file contents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Get the path to the built `sd` binary.
fn sd_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("sd");
    path
}

/// Create a minimal test session in the given directory.
fn create_test_session(root: &Path, policy: &str) {
    let stride_dir = root.join("stride");
    fs::create_dir_all(&stride_dir).unwrap();
    fs::write(
        stride_dir.join("session.toml"),
        format!(
            "[session]\nname = \"test-session\"\n\n[nav]\npolicy = \"{}\"\n",
            policy
        ),
    )
    .unwrap();
}

/// Run `sd` with the given args against a session root.
fn run_sd(root: &Path, args: &[&str]) -> Output {
    Command::new(sd_bin())
        .arg("-C")
        .arg(root)
        .args(args)
        .output()
        .expect("failed to run sd")
}

/// Run `sd` with the given stdin content.
fn run_sd_stdin(root: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(sd_bin())
        .arg("-C")
        .arg(root)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn sd");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for sd")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_session_toml() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(sd_bin())
        .current_dir(dir.path())
        .args(["init", "--name", "batch-42", "--policy", "wraparound"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let config = fs::read_to_string(dir.path().join("stride/session.toml")).unwrap();
    assert!(config.contains("name = \"batch-42\""));
    assert!(config.contains("policy = \"wraparound\""));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    let output = Command::new(sd_bin())
        .current_dir(dir.path())
        .args(["init"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("already exists"));
}

// ---------------------------------------------------------------------------
// ids
// ---------------------------------------------------------------------------

#[test]
fn ids_set_from_stdin_trims_and_filters() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");

    let output = run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "  x1 \n\n x2\nx3  ");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("saved 3 ids to data_id"));

    let output = run_sd(dir.path(), &["ids", "list", "data_id"]);
    assert_eq!(stdout(&output), "x1\nx2\nx3\n");
}

#[test]
fn ids_set_from_file_and_json_list() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    let ids_file = dir.path().join("ids.txt");
    fs::write(&ids_file, "q1\nq2\n").unwrap();

    let output = run_sd(
        dir.path(),
        &["ids", "set", "questionnaire_id", "--file", ids_file.to_str().unwrap()],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = run_sd(dir.path(), &["ids", "list", "questionnaire_id", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["key"], "questionnaire_id");
    assert_eq!(json["count"], 2);
    assert_eq!(json["ids"][0], "q1");
}

#[test]
fn ids_clear_empties_both_lists() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb");
    run_sd_stdin(dir.path(), &["ids", "set", "questionnaire_id"], "q");

    let output = run_sd(dir.path(), &["ids", "clear"]);
    assert!(output.status.success());

    for key in ["data_id", "questionnaire_id"] {
        let output = run_sd(dir.path(), &["ids", "list", key]);
        assert_eq!(stdout(&output), "", "list {} not empty", key);
    }
}

// ---------------------------------------------------------------------------
// next / prev
// ---------------------------------------------------------------------------

#[test]
fn next_with_explicit_id_does_not_touch_the_route() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb\nc");

    let output = run_sd(dir.path(), &["next", "--id", "a"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "b\n");

    let output = run_sd(dir.path(), &["route", "show"]);
    assert_eq!(stdout(&output), "no route set\n");
}

#[test]
fn next_steps_the_route_and_writes_back() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb\nc");
    run_sd(dir.path(), &["route", "set", "/supplier/task/t1?data_id=a"]);

    let output = run_sd(dir.path(), &["next"]);
    assert_eq!(stdout(&output), "b\n");

    let output = run_sd(dir.path(), &["route", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["query"]["data_id"], "b");
    assert_eq!(json["url"], "/supplier/task/t1?data_id=b");
}

#[test]
fn bounded_policy_reports_the_edge_once() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb\nc");
    run_sd(dir.path(), &["route", "set", "/supplier/task/t1?data_id=c"]);

    let output = run_sd(dir.path(), &["next"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "no more items in that direction\n");

    // the route is unchanged at the edge
    let output = run_sd(dir.path(), &["route", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["query"]["data_id"], "c");
}

#[test]
fn wraparound_policy_cycles_at_the_edge() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "wraparound");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb\nc");

    let output = run_sd(dir.path(), &["next", "--id", "c"]);
    assert_eq!(stdout(&output), "a\n");
    let output = run_sd(dir.path(), &["prev", "--id", "a"]);
    assert_eq!(stdout(&output), "c\n");
}

#[test]
fn policy_flag_overrides_the_config() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb\nc");

    let output = run_sd(dir.path(), &["next", "--id", "c", "--policy", "wraparound"]);
    assert_eq!(stdout(&output), "a\n");
}

#[test]
fn stepping_an_empty_list_warns() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "wraparound");

    let output = run_sd(dir.path(), &["next", "--id", "a", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["outcome"], "empty");
}

#[test]
fn next_without_a_route_is_an_error() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a");

    let output = run_sd(dir.path(), &["next"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no route set"));
}

#[test]
fn questionnaire_axis_steps_independently() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb");
    run_sd_stdin(dir.path(), &["ids", "set", "questionnaire_id"], "q1\nq2");
    run_sd(
        dir.path(),
        &["route", "set", "/supplier/task/t1?data_id=a&questionnaire_id=q1"],
    );

    let output = run_sd(dir.path(), &["next", "--key", "questionnaire_id"]);
    assert_eq!(stdout(&output), "q2\n");

    let output = run_sd(dir.path(), &["route", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["query"]["data_id"], "a");
    assert_eq!(json["query"]["questionnaire_id"], "q2");
}

// ---------------------------------------------------------------------------
// route
// ---------------------------------------------------------------------------

#[test]
fn route_show_derives_type_and_flags() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd(
        dir.path(),
        &["route", "set", "/supplier/review_audit/beebc1fa?user_id=1101"],
    );

    let output = run_sd(dir.path(), &["route", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["type"], "review_audit");
    assert_eq!(json["task_id"], "beebc1fa");
    assert_eq!(json["is_audit"], true);
    assert_eq!(json["is_preview"], true);
    assert_eq!(json["query"]["user_id"], "1101");
}

#[test]
fn route_update_merges_and_removes() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd(
        dir.path(),
        &["route", "set", "/supplier/task/t1?data_id=d1&is_search=1"],
    );

    let output = run_sd(
        dir.path(),
        &["route", "update", "data_id=d2", "is_search=", "record_status=completed"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "/supplier/task/t1?data_id=d2&record_status=completed\n"
    );
}

#[test]
fn route_update_rejects_bare_words() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd(dir.path(), &["route", "set", "/task/t1"]);

    let output = run_sd(dir.path(), &["route", "update", "data_id"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("expected KEY=VALUE"));
}

#[test]
fn route_clear_forgets_the_route() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd(dir.path(), &["route", "set", "/task/t1"]);
    run_sd(dir.path(), &["route", "clear"]);

    let output = run_sd(dir.path(), &["route", "show"]);
    assert_eq!(stdout(&output), "no route set\n");
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_policy_rewrites_session_toml() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");

    let output = run_sd(dir.path(), &["config", "policy", "wraparound"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let config = fs::read_to_string(dir.path().join("stride/session.toml")).unwrap();
    assert!(config.contains("policy = \"wraparound\""));

    // the new policy takes effect
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb");
    let output = run_sd(dir.path(), &["next", "--id", "b"]);
    assert_eq!(stdout(&output), "a\n");
}

#[test]
fn session_discovery_walks_up_from_nested_directories() {
    let dir = TempDir::new().unwrap();
    create_test_session(dir.path(), "bounded");
    run_sd_stdin(dir.path(), &["ids", "set", "data_id"], "a\nb");
    let nested = dir.path().join("deep/nested");
    fs::create_dir_all(&nested).unwrap();

    let output = run_sd(&nested, &["next", "--id", "a"]);
    assert_eq!(stdout(&output), "b\n");
}
