// src/exec/pty.rs

//! Pseudo-terminal process supervision.
//!
//! `sudo` refuses to prompt without a terminal, so the elevation helper is
//! spawned with all three stdio streams bound to the slave side of a PTY
//! pair. The supervisor owns the master side purely as a one-directional
//! drain: it never writes, it only collects everything the child prints
//! (prompt rendering included) and enforces a wall-clock deadline.

use std::io::{ErrorKind, Read};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use portable_pty::{native_pty_system, CommandBuilder, PtySize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::ExecError;
use crate::types::CommandResult;

/// Extra time the child gets to die after the termination signal.
const KILL_GRACE: Duration = Duration::from_secs(5);

/// Bound on the final read-to-EOF drain, in case a grandchild inherited the
/// slave descriptor and keeps it open.
const DRAIN_GRACE: Duration = Duration::from_secs(5);

/// Run one process on a PTY, collect its combined output and wait for exit
/// with a deadline.
///
/// On timeout the child is killed, given [`KILL_GRACE`] to die, and
/// [`ExecError::Timeout`] is returned. On normal exit the reader is drained
/// to EOF before the output is assembled, so no byte written before process
/// exit is lost.
pub async fn run_pty(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<CommandResult, ExecError> {
    let pty_system = native_pty_system();
    let pair = pty_system
        .openpty(PtySize {
            rows: 24,
            cols: 80,
            pixel_width: 0,
            pixel_height: 0,
        })
        .map_err(|e| ExecError::PtyAllocationFailed(e.to_string()))?;

    let mut cmd = CommandBuilder::new(program);
    for arg in args {
        cmd.arg(arg);
    }

    let mut child = pair
        .slave
        .spawn_command(cmd)
        .map_err(|e| ExecError::SpawnFailed {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    // Drop our copy of the slave immediately; the child owns its duplicate.
    // Keeping it open would prevent EOF on the master after the child exits.
    drop(pair.slave);

    let mut killer = child.clone_killer();

    // Reader side: drain the master into a shared accumulator. Runs
    // concurrently with the child and is not bounded by the timeout.
    let accumulator: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let mut reader = pair
        .master
        .try_clone_reader()
        .map_err(|e| ExecError::PtyAllocationFailed(e.to_string()))?;
    let reader_buf = Arc::clone(&accumulator);
    let reader_handle: JoinHandle<()> = tokio::task::spawn_blocking(move || {
        let mut chunk = [0u8; 8_192];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    if let Ok(mut buf) = reader_buf.lock() {
                        buf.extend_from_slice(&chunk[..n]);
                    }
                }
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                // The master reports EIO once the slave side is gone.
                Err(_) => break,
            }
        }
    });

    // Wait side: block on child exit off the async runtime, report through a
    // oneshot so the deadline can be applied here.
    let (exit_tx, mut exit_rx) = oneshot::channel::<i32>();
    let program_name = program.to_string();
    let _wait_handle = tokio::task::spawn_blocking(move || {
        let code = match child.wait() {
            Ok(status) => status.exit_code() as i32,
            Err(err) => {
                warn!(program = %program_name, error = %err, "wait on PTY child failed");
                -1
            }
        };
        let _ = exit_tx.send(code);
    });

    let timeout_secs = timeout.as_secs();
    let exit_code = match tokio::time::timeout(timeout, &mut exit_rx).await {
        Ok(Ok(code)) => code,
        Ok(Err(_)) => -1,
        Err(_) => {
            debug!(program, timeout_secs, "PTY deadline elapsed; killing child");
            if let Err(err) = killer.kill() {
                warn!(program, error = %err, "failed to kill timed-out PTY child");
            }
            // Give the child a moment to die so the PTY is torn down before
            // we return; the reader thread exits on the resulting EOF.
            let _ = tokio::time::timeout(KILL_GRACE, &mut exit_rx).await;
            return Err(ExecError::Timeout { timeout_secs });
        }
    };

    // Final drain: the reader stops at EOF, which the child's exit has made
    // imminent. Joining it here closes the race between the last read and
    // the exit notification.
    if tokio::time::timeout(DRAIN_GRACE, reader_handle).await.is_err() {
        warn!(program, "PTY master did not reach EOF after child exit");
    }

    let output = {
        let buf = accumulator
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    };

    debug!(program, exit_code, bytes = output.len(), "PTY child finished");
    Ok(CommandResult { exit_code, output })
}
