//! Branch, tracking, working-tree and commit state of one repository.

use std::path::Path;
use std::time::Duration;

use crate::collector::now_epoch;
use crate::collector::runner::CommandRunner;
use crate::config::Config;
use crate::model::RepositorySnapshot;

use super::Vcs;
use super::parser::{count_lines, count_status, parse_ahead_behind};

/// Number of one-line commits kept in `recent_commits`.
const RECENT_COMMITS: &str = "-5";

/// Collects a [`RepositorySnapshot`] by querying the VCS binary.
pub struct RepositoryCollector<R: CommandRunner> {
    runner: R,
    binary: String,
    timeout: Duration,
}

impl<R: CommandRunner> RepositoryCollector<R> {
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            binary: config.vcs_binary.clone(),
            timeout: config.command_timeout,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Collects the state of the repository containing `cwd`.
    ///
    /// Never fails: outside a repository, or when the binary is missing,
    /// the snapshot has `is_repository == false` and empty fields.
    pub fn collect(&self, cwd: &Path) -> RepositorySnapshot {
        self.collect_at(cwd, now_epoch())
    }

    /// Same as [`RepositoryCollector::collect`] with an explicit wall clock.
    pub fn collect_at(&self, cwd: &Path, now: f64) -> RepositorySnapshot {
        let vcs = Vcs::new(&self.runner, &self.binary, cwd, self.timeout);
        if !vcs.is_repository() {
            return RepositorySnapshot::not_a_repository();
        }

        let mut snapshot = RepositorySnapshot {
            is_repository: true,
            ..Default::default()
        };

        // Detached HEAD has no branch name; fall back to the short hash.
        snapshot.branch = vcs
            .run_nonempty(&["branch", "--show-current"])
            .or_else(|| vcs.run_nonempty(&["rev-parse", "--short", "HEAD"]))
            .unwrap_or_else(|| "?".to_string());

        if let Some((ahead, behind)) = vcs
            .run(&["rev-list", "--left-right", "--count", "HEAD...@{u}"])
            .and_then(|out| parse_ahead_behind(&out))
        {
            snapshot.ahead = ahead;
            snapshot.behind = behind;
        }

        if let Some(status) = vcs.run(&["status", "--porcelain"]) {
            let counts = count_status(&status);
            snapshot.staged = counts.staged;
            snapshot.modified = counts.modified;
            snapshot.untracked = counts.untracked;
            snapshot.conflicts = counts.conflicts;
        }

        if let Some(committed_at) = vcs
            .run_nonempty(&["log", "-1", "--format=%ct"])
            .and_then(|out| out.trim().parse::<f64>().ok())
        {
            snapshot.last_commit_age_seconds = (now - committed_at).max(0.0);
        }

        snapshot.last_commit_message = vcs
            .run(&["log", "-1", "--format=%s"])
            .unwrap_or_default();

        if let Some(log) = vcs.run(&["log", "--oneline", RECENT_COMMITS]) {
            snapshot.recent_commits = log
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(stashes) = vcs.run(&["stash", "list"]) {
            snapshot.stash_count = count_lines(&stashes);
        }

        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockRunner;
    use crate::model::DriftLevel;

    const NOW: f64 = 1_700_003_600.0;

    fn collector(runner: MockRunner) -> RepositoryCollector<MockRunner> {
        RepositoryCollector::new(runner, &Config::default())
    }

    #[test]
    fn test_full_repository() {
        let snapshot = collector(MockRunner::dirty_repository()).collect_at(Path::new("/repo"), NOW);

        assert!(snapshot.is_repository);
        assert_eq!(snapshot.branch, "main");
        assert_eq!((snapshot.ahead, snapshot.behind), (2, 1));
        assert_eq!(snapshot.staged, 2);
        assert_eq!(snapshot.modified, 2);
        assert_eq!(snapshot.untracked, 1);
        assert_eq!(snapshot.conflicts, 1);
        assert_eq!(snapshot.total_changes(), 5);
        assert_eq!(snapshot.last_commit_age_seconds, 2400.0);
        assert_eq!(snapshot.drift_level(), DriftLevel::Hot);
        assert_eq!(snapshot.last_commit_message, "Add drift meter");
        assert_eq!(snapshot.recent_commits.len(), 3);
        assert_eq!(snapshot.recent_commits[0], "a1b2c3d Add drift meter");
        assert_eq!(snapshot.stash_count, 2);
    }

    #[test]
    fn test_not_a_repository() {
        let runner = MockRunner::new();
        let snapshot = collector(runner).collect_at(Path::new("/tmp"), NOW);
        assert!(!snapshot.is_repository);
        assert_eq!(snapshot.branch, "");
        assert!(snapshot.is_clean());
        assert_eq!(snapshot, RepositorySnapshot::default());
    }

    #[test]
    fn test_probe_failure_short_circuits() {
        let runner = MockRunner::new().with(&["rev-parse", "--is-inside-work-tree"], "false\n");
        let c = collector(runner);
        let snapshot = c.collect_at(Path::new("/repo"), NOW);
        assert!(!snapshot.is_repository);
        assert_eq!(c.runner().calls().len(), 1);
    }

    #[test]
    fn test_detached_head_and_empty_repository() {
        let runner = MockRunner::new()
            .with(&["rev-parse", "--is-inside-work-tree"], "true\n")
            .with(&["branch", "--show-current"], "\n")
            .with(&["rev-parse", "--short", "HEAD"], "deadbee\n");
        let snapshot = collector(runner).collect_at(Path::new("/repo"), NOW);
        assert!(snapshot.is_repository);
        assert_eq!(snapshot.branch, "deadbee");
        assert_eq!((snapshot.ahead, snapshot.behind), (0, 0));
        assert_eq!(snapshot.last_commit_age_seconds, 0.0);
        assert!(snapshot.recent_commits.is_empty());
        assert_eq!(snapshot.stash_count, 0);
    }

    #[test]
    fn test_unknown_branch() {
        let runner = MockRunner::new().with(&["rev-parse", "--is-inside-work-tree"], "true");
        let snapshot = collector(runner).collect_at(Path::new("/repo"), NOW);
        assert_eq!(snapshot.branch, "?");
    }

    #[test]
    fn test_real_non_repository_directory() {
        let dir = tempfile::tempdir().unwrap();
        let c = RepositoryCollector::new(crate::collector::SystemRunner::new(), &Config::default());
        let snapshot = c.collect(dir.path());
        assert!(!snapshot.is_repository);
        assert_eq!(snapshot.branch, "");
        assert!(snapshot.is_clean());
    }

    #[test]
    fn test_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_vcs_binary("no-such-vcs-binary-xyz");
        let c = RepositoryCollector::new(crate::collector::SystemRunner::new(), &config);
        assert!(!c.collect(dir.path()).is_repository);
    }
}
