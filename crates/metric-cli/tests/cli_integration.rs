//! Integration tests for the metric-cli binary
//!
//! Each test spawns the real executable, the way a shell script or an
//! editor plugin would.

use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_metric-cli"));
    cmd.env_remove("METRIC_FORMAT").env_remove("RUST_LOG");
    cmd
}

/// Run with `input` piped to stdin
fn run_piped(cmd: &mut Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn metric-cli");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_single_expression_quiet() {
    let output = cli().args(["-q", "1000 kg*m^2*s^-3"]).output().unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1kW\n");
}

#[test]
fn test_format_flags_from_argument_and_env() {
    let output = cli()
        .args(["-q", "-F", "cd", "12 kg*m/s^3"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output), "12N/s\n");

    let output = cli()
        .env("METRIC_FORMAT", "cb")
        .args(["-q", "5 mN"])
        .output()
        .unwrap();
    assert_eq!(stdout(&output), "5mm*kg*s^-2\n");
}

#[test]
fn test_echo_mode_shows_input() {
    let output = cli().arg("5 g*m*s^-2").output().unwrap();
    let text = stdout(&output);
    assert!(text.starts_with("5 g*m*s^-2"));
    assert!(text.trim_end().ends_with("= 5mN"));
}

#[test]
fn test_pipe_mode_reports_failures() {
    let output = run_piped(cli().arg("-q"), "1 V\n\n3 furlong\n2 kat\n");
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "1V\n2kat\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("furlong"));
}

#[test]
fn test_json_output() {
    let output = run_piped(cli().args(["--json", "-F", "c"]), "12 N\nm//s\n");
    let lines: Vec<Value> = stdout(&output)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["display"], "12N");
    assert_eq!(lines[0]["quantity"], 12.0);
    assert_eq!(lines[0]["dimension"]["powers"][2], -2);
    assert!(lines[1]["error"].is_string());
    assert!(lines[1].get("display").is_none());
    assert!(!output.status.success());
}
