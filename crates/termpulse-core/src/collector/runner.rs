//! Timeout-bounded invocation of external commands.
//!
//! The `CommandRunner` trait lets the VCS collectors run the real binary or
//! replay canned output in tests (`MockRunner`).

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Error type for command failures.
#[derive(Debug)]
pub enum RunError {
    /// Binary missing, not executable, or working directory absent.
    Spawn(io::Error),
    /// Command did not exit within the timeout and was killed.
    Timeout(Duration),
    /// Command exited unsuccessfully (exit code, if any).
    Failed(Option<i32>),
    /// I/O error while waiting for the child or reading its output.
    Io(io::Error),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Spawn(e) => write!(f, "failed to spawn: {}", e),
            RunError::Timeout(t) => write!(f, "timed out after {:?}", t),
            RunError::Failed(Some(code)) => write!(f, "exited with status {}", code),
            RunError::Failed(None) => write!(f, "terminated by signal"),
            RunError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for RunError {}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

/// Runs an external program and returns its raw stdout.
pub trait CommandRunner: Send + Sync {
    /// Runs `program args...` in `cwd`, killing it after `timeout`.
    ///
    /// Only a successful exit yields output; stdout is decoded lossily and
    /// returned untrimmed.
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        timeout: Duration,
    ) -> Result<String, RunError>;
}

/// Runs real subprocesses.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        cwd: &Path,
        timeout: Duration,
    ) -> Result<String, RunError> {
        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(RunError::Spawn)?;

        // Drain stdout concurrently so a large diff cannot fill the pipe and
        // stall the child while we poll for exit.
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("stdout not captured"))?;
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            let result = stdout.read_to_end(&mut buf).map(|_| buf);
            let _ = tx.send(result);
        });

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if start.elapsed() >= timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(RunError::Timeout(timeout));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RunError::Io(e));
                }
            }
        };

        // A grandchild that inherited stdout can hold the pipe open after the
        // child exits. The deadline covers the drain as well.
        let output = match rx.recv_timeout(timeout.saturating_sub(start.elapsed())) {
            Ok(result) => result?,
            Err(RecvTimeoutError::Timeout) => return Err(RunError::Timeout(timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(io::Error::other("stdout reader exited without output").into());
            }
        };
        if !status.success() {
            return Err(RunError::Failed(status.code()));
        }
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_run_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = SystemRunner::new()
            .run("sh", &["-c", "printf ' M a.rs\\n'"], dir.path(), TIMEOUT)
            .unwrap();
        assert_eq!(out, " M a.rs\n");
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemRunner::new()
            .run("definitely-not-a-binary-xyz", &[], dir.path(), TIMEOUT)
            .unwrap_err();
        assert!(matches!(err, RunError::Spawn(_)));
    }

    #[test]
    fn test_nonzero_exit_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemRunner::new()
            .run("sh", &["-c", "echo partial; exit 3"], dir.path(), TIMEOUT)
            .unwrap_err();
        assert!(matches!(err, RunError::Failed(Some(3))));
    }

    #[test]
    fn test_timeout_kills_child() {
        let dir = tempfile::tempdir().unwrap();
        let start = Instant::now();
        let err = SystemRunner::new()
            .run("sleep", &["5"], dir.path(), Duration::from_millis(100))
            .unwrap_err();
        assert!(matches!(err, RunError::Timeout(_)));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_timeout_covers_inherited_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let start = Instant::now();
        let err = SystemRunner::new()
            .run(
                "sh",
                &["-c", "sleep 3 & echo hi"],
                dir.path(),
                Duration::from_millis(200),
            )
            .unwrap_err();
        assert!(matches!(err, RunError::Timeout(_)));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_large_output_does_not_deadlock() {
        let dir = tempfile::tempdir().unwrap();
        let out = SystemRunner::new()
            .run(
                "sh",
                &["-c", "i=0; while [ $i -lt 20000 ]; do echo line-$i; i=$((i+1)); done"],
                dir.path(),
                Duration::from_secs(20),
            )
            .unwrap();
        assert_eq!(out.lines().count(), 20000);
    }
}
