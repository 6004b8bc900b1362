//! Shell-history reader.
//!
//! Understands plain one-command-per-line files, zsh extended history
//! (`: <epoch>:<duration>;<command>`) and bash files written with
//! `HISTTIMEFORMAT` set, where a `#<epoch>` line precedes each command.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::collector::traits::FileSystem;
use crate::config::Config;
use crate::model::CommandEntry;

/// History files tried in order, relative to the home directory.
const CANDIDATES: &[&str] = &[".zsh_history", ".bash_history", ".histfile"];

/// Reads the most recent commands from a shell-history file.
pub struct HistoryCollector<F: FileSystem> {
    fs: F,
    candidates: Vec<PathBuf>,
}

impl<F: FileSystem> HistoryCollector<F> {
    /// Looks for the well-known history files under `home`.
    pub fn new(fs: F, home: &Path) -> Self {
        Self {
            fs,
            candidates: CANDIDATES.iter().map(|name| home.join(name)).collect(),
        }
    }

    /// Reads exactly one file.
    pub fn with_file(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            candidates: vec![path.into()],
        }
    }

    /// Resolves candidates from the config, `HISTFILE` and the home directory.
    ///
    /// An explicit `history_file` wins outright. Otherwise `HISTFILE` (when
    /// set and non-empty) is tried before the home-directory candidates.
    pub fn from_config(fs: F, config: &Config) -> Self {
        if let Some(path) = &config.history_file {
            return Self::with_file(fs, path.clone());
        }

        let home = dirs::home_dir();
        if home.is_none() {
            debug!("home directory unknown, shell history limited to HISTFILE");
        }
        Self {
            fs,
            candidates: history_candidates(std::env::var_os("HISTFILE"), home.as_deref()),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// First candidate that exists.
    pub fn locate(&self) -> Option<&Path> {
        self.candidates
            .iter()
            .map(PathBuf::as_path)
            .find(|path| self.fs.exists(path))
    }

    /// Parses the last `limit` lines of the history file, oldest first.
    ///
    /// Never fails: a missing or unreadable file yields no entries. Invalid
    /// UTF-8 is replaced rather than rejected.
    pub fn collect(&self, limit: usize) -> Vec<CommandEntry> {
        let Some(path) = self.locate() else {
            debug!("no shell history file found");
            return Vec::new();
        };
        match self.fs.read(path) {
            Ok(bytes) => parse_history(&String::from_utf8_lossy(&bytes), limit),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "failed to read shell history");
                Vec::new()
            }
        }
    }
}

/// Orders history files for lookup: a non-empty `HISTFILE` first, then the
/// well-known files under `home`.
pub fn history_candidates(histfile: Option<OsString>, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(histfile) = histfile.filter(|v| !v.is_empty()) {
        candidates.push(PathBuf::from(histfile));
    }
    if let Some(home) = home {
        candidates.extend(CANDIDATES.iter().map(|name| home.join(name)));
    }
    candidates
}

/// Parses the last `limit` lines of history text into entries.
pub fn parse_history(text: &str, limit: usize) -> Vec<CommandEntry> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(limit);

    let mut entries = Vec::new();
    let mut pending_timestamp = None;
    for line in &lines[start..] {
        if let Some(ts) = bash_timestamp(line) {
            pending_timestamp = Some(ts);
            continue;
        }
        let (timestamp, command) = match split_extended(line) {
            Some((ts, command)) => (ts, command),
            None => (pending_timestamp, *line),
        };
        pending_timestamp = None;
        if let Some(entry) = CommandEntry::parse(command, timestamp) {
            entries.push(entry);
        }
    }
    entries
}

/// Splits zsh `: <epoch>:<duration>;<command>` into timestamp and command.
///
/// An unparseable timestamp still yields the command, without a timestamp.
fn split_extended(line: &str) -> Option<(Option<f64>, &str)> {
    let rest = line.strip_prefix(": ")?;
    let (meta, command) = rest.split_once(';')?;
    let timestamp = meta
        .split(':')
        .next()
        .and_then(|ts| ts.trim().parse::<f64>().ok());
    Some((timestamp, command))
}

/// Parses a bash `#<epoch>` marker line.
fn bash_timestamp(line: &str) -> Option<f64> {
    let digits = line.strip_prefix('#')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;
    use crate::model::CommandCategory;

    const HOME: &str = "/home/dev";

    #[test]
    fn test_zsh_extended_history() {
        let collector = HistoryCollector::new(MockFs::zsh_home(HOME), Path::new(HOME));
        let entries = collector.collect(100);

        assert_eq!(entries.len(), 6);
        assert_eq!(entries[0].raw, "cd ~/src/termpulse");
        assert_eq!(entries[0].category, CommandCategory::Navigate);
        assert_eq!(entries[0].timestamp, Some(1_700_000_000.0));
        assert_eq!(entries[3].command, "/usr/bin/git");
        assert_eq!(entries[3].category, CommandCategory::Git);
        assert_eq!(entries[5].category, CommandCategory::Python);
    }

    #[test]
    fn test_limit_keeps_most_recent_lines_in_file_order() {
        let collector = HistoryCollector::new(MockFs::zsh_home(HOME), Path::new(HOME));
        let entries = collector.collect(2);
        let raw: Vec<&str> = entries.iter().map(|e| e.raw.as_str()).collect();
        assert_eq!(raw, vec!["nvim src/lib.rs", "python3 scripts/bench.py"]);
        assert!(collector.collect(0).is_empty());
    }

    #[test]
    fn test_falls_back_to_bash_history() {
        let mut fs = MockFs::new();
        fs.add_file(
            format!("{HOME}/.bash_history"),
            "ls -la\n\n   \ndocker ps\nunknown-tool --flag\n",
        );
        let collector = HistoryCollector::new(fs, Path::new(HOME));

        assert_eq!(
            collector.locate(),
            Some(Path::new("/home/dev/.bash_history"))
        );
        let entries = collector.collect(100);
        let categories: Vec<CommandCategory> = entries.iter().map(|e| e.category).collect();
        assert_eq!(
            categories,
            vec![
                CommandCategory::Navigate,
                CommandCategory::Docker,
                CommandCategory::Other
            ]
        );
        assert!(entries.iter().all(|e| e.timestamp.is_none()));
    }

    #[test]
    fn test_zsh_history_preferred_over_bash() {
        let mut fs = MockFs::zsh_home(HOME);
        fs.add_file(format!("{HOME}/.bash_history"), "ls\n");
        let collector = HistoryCollector::new(fs, Path::new(HOME));
        assert_eq!(collector.locate(), Some(Path::new("/home/dev/.zsh_history")));
    }

    #[test]
    fn test_bash_timestamp_lines() {
        let entries = parse_history("#1700000000\ngit pull\nmake\n#1700000300\ncargo build\n", 100);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].timestamp, Some(1_700_000_000.0));
        assert_eq!(entries[1].timestamp, None);
        assert_eq!(entries[2].timestamp, Some(1_700_000_300.0));
    }

    #[test]
    fn test_malformed_extended_lines() {
        let entries = parse_history(": notanumber:0;npm test\n: 1700000000:0\n#\n", 100);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].raw, "npm test");
        assert_eq!(entries[0].timestamp, None);
        assert_eq!(entries[0].category, CommandCategory::Node);
        // Without a separator the whole line is the command.
        assert_eq!(entries[1].command, ":");
        assert_eq!(entries[2].raw, "#");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut fs = MockFs::new();
        fs.add_file(
            format!("{HOME}/.zsh_history"),
            &b": 1700000000:0;echo caf\xe9\n: 1700000001:0;git log\n"[..],
        );
        let entries = HistoryCollector::new(fs, Path::new(HOME)).collect(100);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category, CommandCategory::Shell);
        assert!(entries[0].raw.contains('\u{FFFD}'));
        assert_eq!(entries[1].category, CommandCategory::Git);
    }

    #[test]
    fn test_no_history_file() {
        let collector = HistoryCollector::new(MockFs::new(), Path::new(HOME));
        assert_eq!(collector.locate(), None);
        assert!(collector.collect(100).is_empty());
    }

    #[test]
    fn test_explicit_file_from_config() {
        let mut fs = MockFs::new();
        fs.add_file("/tmp/custom_history", "cargo test\n");
        let config = Config::default().with_history_file("/tmp/custom_history");
        let collector = HistoryCollector::from_config(fs, &config);

        assert_eq!(collector.candidates(), &[PathBuf::from("/tmp/custom_history")]);
        assert_eq!(collector.collect(10)[0].category, CommandCategory::Build);
    }

    #[test]
    fn test_histfile_tried_before_home_candidates() {
        let candidates =
            history_candidates(Some(OsString::from("/tmp/.my_history")), Some(Path::new(HOME)));
        assert_eq!(
            candidates,
            vec![
                PathBuf::from("/tmp/.my_history"),
                PathBuf::from("/home/dev/.zsh_history"),
                PathBuf::from("/home/dev/.bash_history"),
                PathBuf::from("/home/dev/.histfile"),
            ]
        );
    }

    #[test]
    fn test_empty_histfile_ignored() {
        let candidates = history_candidates(Some(OsString::new()), Some(Path::new(HOME)));
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0], PathBuf::from("/home/dev/.zsh_history"));
    }

    #[test]
    fn test_no_home_leaves_only_histfile() {
        let candidates = history_candidates(Some(OsString::from("/tmp/.my_history")), None);
        assert_eq!(candidates, vec![PathBuf::from("/tmp/.my_history")]);
        assert!(history_candidates(None, None).is_empty());
    }

    #[test]
    fn test_histfile_wins_when_both_exist() {
        let mut fs = MockFs::zsh_home(HOME);
        fs.add_file("/tmp/.my_history", "docker ps\n");
        let collector = HistoryCollector {
            fs,
            candidates: history_candidates(
                Some(OsString::from("/tmp/.my_history")),
                Some(Path::new(HOME)),
            ),
        };
        assert_eq!(collector.locate(), Some(Path::new("/tmp/.my_history")));
        assert_eq!(collector.collect(10)[0].category, CommandCategory::Docker);
    }

    #[test]
    fn test_real_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".histfile"), "ssh prod\n").unwrap();
        let collector = HistoryCollector::new(crate::collector::RealFs::new(), dir.path());
        let entries = collector.collect(10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, CommandCategory::Network);
    }
}
