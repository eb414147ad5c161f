//! Tests for tool execution

use std::ffi::OsString;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::engine::{run_tool, CancelFlag};
use crate::errors::ToolError;

fn args(values: &[&str]) -> Vec<OsString> {
    values.iter().map(OsString::from).collect()
}

#[test]
fn test_successful_run() {
    let output = run_tool(Path::new("true"), &[], Duration::from_secs(10), &CancelFlag::new()).unwrap();
    assert!(output.status.success());
}

#[test]
fn test_exit_status_and_stderr_captured() {
    let result = run_tool(
        Path::new("sh"),
        &args(&["-c", "echo 'ERROR 4: missing.tif: No such file' >&2; exit 4"]),
        Duration::from_secs(10),
        &CancelFlag::new(),
    );

    match result {
        Err(ToolError::Failed { code, stderr, .. }) => {
            assert_eq!(code, Some(4));
            assert!(stderr.contains("No such file"));
        },
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_non_utf8_stderr_is_kept() {
    let result = run_tool(
        Path::new("sh"),
        &args(&["-c", "printf 'ERROR 4: caf\\351.tif: No such file' >&2; exit 4"]),
        Duration::from_secs(10),
        &CancelFlag::new(),
    );

    match result {
        Err(ToolError::Failed { stderr, .. }) => {
            assert!(stderr.contains("ERROR 4: caf\u{FFFD}.tif: No such file"), "stderr was {:?}", stderr);
        },
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_deadline_kills_forked_children() {
    // `sleep` runs as a grandchild that inherits the stderr pipe
    let started = Instant::now();
    let result = run_tool(
        Path::new("sh"),
        &args(&["-c", "sleep 5; echo done >&2"]),
        Duration::from_millis(100),
        &CancelFlag::new(),
    );

    assert!(matches!(result, Err(ToolError::TimedOut { .. })));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[test]
fn test_missing_binary() {
    let result = run_tool(
        Path::new("/nonexistent/gdal_translate"),
        &[],
        Duration::from_secs(1),
        &CancelFlag::new(),
    );
    assert!(matches!(result, Err(ToolError::Spawn { .. })));
}

#[test]
fn test_deadline_kills_child() {
    let started = Instant::now();
    let result = run_tool(Path::new("sleep"), &args(&["5"]), Duration::from_millis(100), &CancelFlag::new());

    assert!(matches!(result, Err(ToolError::TimedOut { .. })));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[test]
fn test_cancellation_kills_child() {
    let cancel = CancelFlag::new();
    let trigger = cancel.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        trigger.cancel();
    });

    let started = Instant::now();
    let result = run_tool(Path::new("sleep"), &args(&["5"]), Duration::from_secs(30), &cancel);
    canceller.join().unwrap();

    assert!(matches!(result, Err(ToolError::Cancelled { .. })));
    assert!(started.elapsed() < Duration::from_secs(4));

    cancel.reset();
    assert!(!cancel.is_cancelled());
}
