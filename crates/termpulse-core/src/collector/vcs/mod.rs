//! Collectors backed by the version-control binary.
//!
//! Every query is independent: a failing command only leaves its own field
//! at the default value and is logged at debug level.

mod diff;
pub mod parser;
mod repository;

pub use diff::DiffCollector;
pub use repository::RepositoryCollector;

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::collector::runner::CommandRunner;

/// One VCS binary bound to a working directory and timeout.
pub(crate) struct Vcs<'a, R: CommandRunner> {
    runner: &'a R,
    binary: &'a str,
    cwd: &'a Path,
    timeout: Duration,
}

impl<'a, R: CommandRunner> Vcs<'a, R> {
    pub(crate) fn new(runner: &'a R, binary: &'a str, cwd: &'a Path, timeout: Duration) -> Self {
        Self {
            runner,
            binary,
            cwd,
            timeout,
        }
    }

    /// Runs a subcommand; `None` on any failure.
    ///
    /// Only trailing whitespace is trimmed: porcelain status output uses a
    /// leading space as a status character.
    pub(crate) fn run(&self, args: &[&str]) -> Option<String> {
        match self.runner.run(self.binary, args, self.cwd, self.timeout) {
            Ok(stdout) => Some(stdout.trim_end().to_string()),
            Err(e) => {
                debug!(
                    binary = self.binary,
                    ?args,
                    cwd = %self.cwd.display(),
                    error = %e,
                    "vcs command failed"
                );
                None
            }
        }
    }

    /// Like [`Vcs::run`], treating empty output as absent.
    pub(crate) fn run_nonempty(&self, args: &[&str]) -> Option<String> {
        self.run(args).filter(|out| !out.is_empty())
    }

    pub(crate) fn is_repository(&self) -> bool {
        self.run(&["rev-parse", "--is-inside-work-tree"]).as_deref() == Some("true")
    }

    /// Number of commits made in the trailing hour.
    pub(crate) fn commits_last_hour(&self) -> u32 {
        self.run(&["log", "--oneline", "--since=1.hour.ago"])
            .map(|out| parser::count_lines(&out))
            .unwrap_or(0)
    }
}
