//! Integration tests for top-level CLI behavior.
//!
//! Everything here runs the real binary without touching a network:
//! failure paths stop before the transport, and the lookup test drives
//! the binary against a replay cassette via `TIX_REPLAY`.

use std::process::Command;

fn run_tix(envs: &[(&str, &str)], args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_tix");
    Command::new(bin)
        .env_clear()
        .envs(envs.iter().copied())
        .args(args)
        .output()
        .expect("failed to run tix binary")
}

#[test]
fn help_lists_the_backends() {
    let output = run_tix(&[], &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("rt"));
    assert!(stdout.contains("jira"));
    assert!(stdout.contains("redmine"));
    assert!(stdout.contains("weather"));
}

#[test]
fn rt_without_configuration_fails_with_the_missing_key() {
    let output = run_tix(&[], &["rt", "1"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("TIX_RT_URI environment variable not set"), "{stderr}");
}

#[test]
fn unknown_auth_type_is_reported_before_any_request() {
    let output = run_tix(
        &[
            ("TIX_RT_URI", "https://rt.invalid/"),
            ("TIX_RT_AUTHTYPE", "kerberos"),
        ],
        &["rt", "1"],
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    // The reply was delivered (to stderr), so the command itself succeeds.
    assert!(output.status.success());
    assert!(stderr.contains("'kerberos' is not a valid authType."), "{stderr}");
}

#[test]
fn invalid_jira_key_is_rejected_without_a_request() {
    let output = run_tix(&[("TIX_JIRA_URI", "https://jira.invalid/")], &["jira", "get", "1234"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success());
    assert!(stderr.contains("'1234' is not a valid issue key."), "{stderr}");
}

#[test]
fn disabled_backend_prints_nothing() {
    let output = run_tix(
        &[("TIX_RT_URI", "https://rt.invalid/"), ("TIX_RT_ENABLED", "false")],
        &["rt", "1"],
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn replayed_lookup_prints_the_summary_line() {
    let dir = std::env::temp_dir().join("tix_cli_replay_test");
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("rt42.cassette.yaml");

    let body = "RT/3.8.8 200 Ok\n\nid: ticket/99\nStatus: open\nSubject: printer on fire\n";
    let mut recorder = tix::cassette::CassetteRecorder::new(&cassette_path, "rt42");
    recorder.record(
        "http",
        "execute",
        serde_json::json!({"method": "GET", "url": "https://rt.example/REST/1.0/ticket/42"}),
        serde_json::json!({"Ok": {"status": 200, "body": body}}),
    );
    recorder.finish().unwrap();

    let output = run_tix(
        &[
            ("TIX_RT_URI", "https://rt.example/"),
            ("TIX_REPLAY", cassette_path.to_str().unwrap()),
        ],
        &["rt", "42"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout.trim(),
        "Ticket *99 (open): printer on fire - https://rt.example/Ticket/Display.html?id=99"
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_arguments_show_usage() {
    let output = run_tix(&[], &["rt"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.to_lowercase().contains("usage") || stderr.contains("<ID>"), "{stderr}");
}
