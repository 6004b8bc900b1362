//! Collector configuration and refresh cadences.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often each panel's collector runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intervals {
    pub resources: Duration,
    pub repository: Duration,
    pub commands: Duration,
    pub momentum: Duration,
    /// Only honoured while the diff view is open.
    pub diff: Duration,
    /// Only honoured while the heatmap view is open.
    pub heatmap: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            resources: Duration::from_secs(2),
            repository: Duration::from_secs(5),
            commands: Duration::from_secs(10),
            momentum: Duration::from_secs(5),
            diff: Duration::from_secs(5),
            heatmap: Duration::from_secs(30),
        }
    }
}

/// Knobs shared by all collectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Version-control binary invoked by the repository and diff collectors.
    pub vcs_binary: String,
    /// Timeout for a single VCS invocation.
    pub command_timeout: Duration,
    /// Timeout for heatmap log queries, which walk more history.
    pub heatmap_timeout: Duration,
    /// Number of trailing shell-history lines to parse.
    pub history_limit: usize,
    /// Commits scanned by the heatmap.
    pub heatmap_commits: usize,
    /// Heatmap entries kept.
    pub heatmap_top: usize,
    /// Base path to proc filesystem (usually "/proc").
    pub proc_path: String,
    /// Mount point whose usage is reported as disk usage.
    pub disk_mount: PathBuf,
    /// Explicit shell-history file; skips `HISTFILE` and the candidate list.
    pub history_file: Option<PathBuf>,
    pub intervals: Intervals,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vcs_binary: "git".to_string(),
            command_timeout: Duration::from_secs(5),
            heatmap_timeout: Duration::from_secs(10),
            history_limit: 100,
            heatmap_commits: 50,
            heatmap_top: 15,
            proc_path: "/proc".to_string(),
            disk_mount: PathBuf::from("/"),
            history_file: None,
            intervals: Intervals::default(),
        }
    }
}

impl Config {
    /// Overrides the history file location.
    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }

    /// Overrides the VCS binary.
    pub fn with_vcs_binary(mut self, binary: impl Into<String>) -> Self {
        self.vcs_binary = binary.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cadences() {
        let intervals = Intervals::default();
        assert!(intervals.resources < intervals.repository);
        assert!(intervals.repository < intervals.commands);
        assert!(intervals.heatmap > intervals.diff);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::default()
            .with_history_file("/tmp/hist")
            .with_vcs_binary("/opt/git/bin/git");
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/hist")));
        assert_eq!(config.vcs_binary, "/opt/git/bin/git");
        assert_eq!(config.history_limit, 100);
    }
}
