//! Pseudo-terminal supervision: output capture, exit codes, the timeout.

mod common;

use std::time::{Duration, Instant};

use routesplit::errors::ExecError;
use routesplit::exec::pty::run_pty;

fn sh(script: &str) -> Vec<String> {
    vec!["-c".to_string(), script.to_string()]
}

#[tokio::test]
async fn stdout_and_stderr_are_captured_together() {
    common::init_tracing();
    let result = run_pty(
        "/bin/sh",
        &sh("printf out-stream; printf err-stream >&2"),
        Duration::from_secs(10),
    )
    .await
    .unwrap();

    assert_eq!(result.exit_code, 0);
    assert!(result.output.contains("out-stream"), "got: {:?}", result.output);
    assert!(result.output.contains("err-stream"), "got: {:?}", result.output);
}

#[tokio::test]
async fn real_exit_status_is_reported() {
    common::init_tracing();
    let result = run_pty("/bin/sh", &sh("exit 3"), Duration::from_secs(10))
        .await
        .unwrap();
    assert_eq!(result.exit_code, 3);
}

#[tokio::test]
async fn output_written_just_before_exit_is_not_lost() {
    common::init_tracing();
    let result = run_pty(
        "/bin/sh",
        &sh("printf early; sleep 0.2; printf late-marker"),
        Duration::from_secs(10),
    )
    .await
    .unwrap();
    assert!(result.output.contains("late-marker"), "got: {:?}", result.output);
}

#[tokio::test]
async fn never_terminating_process_times_out_within_the_grace_window() {
    common::init_tracing();
    let started = Instant::now();
    let err = run_pty("/bin/sh", &sh("sleep 600"), Duration::from_secs(1))
        .await
        .unwrap_err();

    // Deadline + kill grace, with headroom for a slow machine.
    assert!(started.elapsed() < Duration::from_secs(10));
    match err {
        ExecError::Timeout { timeout_secs } => {
            assert_eq!(timeout_secs, 1);
            let message = err.to_string();
            assert!(message.contains("credential input"), "got: {message}");
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_program_never_reports_success() {
    common::init_tracing();
    // Depending on the platform the exec failure surfaces either at spawn
    // time or as a nonzero exit of the forked child.
    match run_pty("/nonexistent/program-for-sure", &[], Duration::from_secs(5)).await {
        Err(ExecError::SpawnFailed { .. }) => {}
        Ok(result) => assert_ne!(result.exit_code, 0),
        Err(other) => panic!("expected SpawnFailed or nonzero exit, got {other:?}"),
    }
}
