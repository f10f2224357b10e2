//! Integration test: `--script` replays commands and prints JSON lines

use serde_json::Value;
use std::process::{Command, Output};

/// Run the binary headless with no config file and no env overrides.
fn run_script(script: &str, children: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hscroll"))
        .env("HSCROLL_CONFIG", "/nonexistent/hscroll/config.toml")
        .env_remove("HSCROLL_DISPLACEMENT")
        .env_remove("HSCROLL_SNAP")
        .env("RUST_LOG", "off")
        .args([
            "--script",
            script,
            "--viewport-width",
            "300",
            "--children",
            children,
        ])
        .output()
        .expect("Failed to execute binary")
}

fn json_lines(output: &Output) -> Vec<Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line should be JSON"))
        .collect()
}

#[test]
fn next_pages_forward_and_settles() {
    let output = run_script("next", "100,100,100,100,100");
    assert!(output.status.success(), "{:?}", output);

    let events = json_lines(&output);
    assert_eq!(events[0]["event"], "refresh");
    assert_eq!(events[0]["left"], 0.0);
    assert_eq!(events[0]["hasNext"], true);
    assert_eq!(events[1]["event"], "next");

    let last = events.last().unwrap();
    assert_eq!(last["event"], "scroll-debounce");
    assert_eq!(last["left"], 200.0);
    assert_eq!(last["hasPrev"], true);
    assert_eq!(last["hasNext"], false);

    let settled = events
        .iter()
        .filter(|e| e["event"] == "scroll-debounce")
        .count();
    assert_eq!(settled, 1);
}

#[test]
fn refresh_reports_current_state() {
    let output = run_script("index:1,refresh", "100,100,100,100,100");
    assert!(output.status.success(), "{:?}", output);

    let events = json_lines(&output);
    let refreshes: Vec<&Value> = events
        .iter()
        .filter(|e| e["event"] == "refresh")
        .collect();
    assert_eq!(refreshes.len(), 2);
    assert_eq!(refreshes[1]["left"], 100.0);
    assert_eq!(refreshes[1]["scrollWidth"], 500.0);
}

#[test]
fn unknown_command_fails_without_output() {
    let output = run_script("jump", "100,100");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
