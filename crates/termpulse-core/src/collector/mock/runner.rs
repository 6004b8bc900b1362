//! Canned command output for testing the VCS collectors.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use crate::collector::runner::{CommandRunner, RunError};

/// Replays stdout keyed by argument list; the program name is ignored.
///
/// Unregistered commands fail with exit status 128, which is how the VCS
/// binary reports "not a repository" and unknown revisions.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<Vec<String>, Option<String>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a successful response.
    pub fn with(mut self, args: &[&str], stdout: impl Into<String>) -> Self {
        self.responses.insert(key(args), Some(stdout.into()));
        self
    }

    /// Registers an explicit failure (exit status 1).
    pub fn with_failure(mut self, args: &[&str]) -> Self {
        self.responses.insert(key(args), None);
        self
    }

    /// Argument lists of every call made so far, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

fn key(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

impl CommandRunner for MockRunner {
    fn run(
        &self,
        _program: &str,
        args: &[&str],
        _cwd: &Path,
        _timeout: Duration,
    ) -> Result<String, RunError> {
        let args = key(args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(args.clone());
        }
        match self.responses.get(&args) {
            Some(Some(stdout)) => Ok(stdout.clone()),
            Some(None) => Err(RunError::Failed(Some(1))),
            None => Err(RunError::Failed(Some(128))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_and_records() {
        let runner = MockRunner::new()
            .with(&["status", "--porcelain"], " M a.rs\n")
            .with_failure(&["stash", "list"]);
        let cwd = Path::new("/repo");
        let t = Duration::from_secs(1);

        assert_eq!(
            runner.run("git", &["status", "--porcelain"], cwd, t).unwrap(),
            " M a.rs\n"
        );
        assert!(matches!(
            runner.run("git", &["stash", "list"], cwd, t),
            Err(RunError::Failed(Some(1)))
        ));
        assert!(matches!(
            runner.run("git", &["log"], cwd, t),
            Err(RunError::Failed(Some(128)))
        ));
        assert_eq!(runner.calls().len(), 3);
    }
}
