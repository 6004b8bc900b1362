//! Changed files with line statistics, and the commit-churn heatmap.

use std::path::Path;
use std::time::Duration;

use tracing::debug;

use crate::collector::runner::CommandRunner;
use crate::config::Config;
use crate::model::{DiffFile, DiffStatus, HeatmapEntry};

use super::Vcs;
use super::parser::{count_paths, parse_numstat_line, parse_status_entry};

/// Collects working-tree changes and churn hotspots.
pub struct DiffCollector<R: CommandRunner> {
    runner: R,
    binary: String,
    timeout: Duration,
    /// Name-only log over many commits can be slow on large repositories.
    heatmap_timeout: Duration,
}

impl<R: CommandRunner> DiffCollector<R> {
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            binary: config.vcs_binary.clone(),
            timeout: config.command_timeout,
            heatmap_timeout: config.heatmap_timeout,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Lists changed files, lexicographic by path with untracked files last.
    pub fn collect_changed_files(&self, cwd: &Path) -> Vec<DiffFile> {
        let vcs = Vcs::new(&self.runner, &self.binary, cwd, self.timeout);
        if !vcs.is_repository() {
            return Vec::new();
        }
        let Some(status) = vcs.run(&["status", "--porcelain"]) else {
            return Vec::new();
        };

        let mut files: Vec<DiffFile> = Vec::new();
        for entry in status.lines().filter_map(parse_status_entry) {
            if files.iter().any(|f| f.path == entry.path) {
                continue;
            }
            let status = DiffStatus::from_porcelain(entry.index, entry.worktree);
            files.push(DiffFile::new(entry.path, status));
        }

        for args in [&["diff", "--numstat"][..], &["diff", "--numstat", "--cached"][..]] {
            let Some(numstat) = vcs.run(args) else {
                continue;
            };
            for stat in numstat.lines().filter_map(parse_numstat_line) {
                if let Some(file) = files.iter_mut().find(|f| f.path == stat.path) {
                    file.insertions += stat.insertions;
                    file.deletions += stat.deletions;
                }
            }
        }

        for file in files.iter_mut() {
            if file.status == DiffStatus::Untracked {
                continue;
            }
            let text = vcs
                .run_nonempty(&["diff", "--", &file.path])
                .or_else(|| vcs.run_nonempty(&["diff", "--cached", "--", &file.path]));
            if let Some(text) = text {
                file.diff_lines = text.lines().map(str::to_string).collect();
            }
        }

        files.sort_by(|a, b| {
            let a_untracked = a.status == DiffStatus::Untracked;
            let b_untracked = b.status == DiffStatus::Untracked;
            a_untracked.cmp(&b_untracked).then_with(|| a.path.cmp(&b.path))
        });

        debug!(files = files.len(), cwd = %cwd.display(), "changed files collected");
        files
    }

    /// Returns the `top_n` most frequently changed paths over the last
    /// `window` commits, most churned first.
    pub fn collect_heatmap(&self, cwd: &Path, window: usize, top_n: usize) -> Vec<HeatmapEntry> {
        if window == 0 || top_n == 0 {
            return Vec::new();
        }
        let vcs = Vcs::new(&self.runner, &self.binary, cwd, self.heatmap_timeout);
        if !vcs.is_repository() {
            return Vec::new();
        }

        let window_arg = format!("-{window}");
        let Some(log) = vcs.run(&["log", &window_arg, "--name-only", "--pretty=format:"]) else {
            return Vec::new();
        };

        let mut counts = count_paths(&log);
        // Stable: ties keep first-seen order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(top_n);

        counts
            .into_iter()
            .map(|(path, commit_count)| {
                let last_author = vcs
                    .run(&["log", "-1", "--format=%an", "--", &path])
                    .unwrap_or_default();
                HeatmapEntry {
                    path,
                    commit_count,
                    last_author,
                }
            })
            .collect()
    }
}
