//! Point-in-time version-control state.

use serde::{Deserialize, Serialize};

/// Severity of the time elapsed since the last commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftLevel {
    /// Less than 15 minutes.
    Calm,
    /// Less than 30 minutes.
    Warm,
    /// Less than 60 minutes.
    Hot,
    /// An hour or more.
    Critical,
}

impl DriftLevel {
    pub fn from_minutes(minutes: f64) -> Self {
        if minutes < 15.0 {
            DriftLevel::Calm
        } else if minutes < 30.0 {
            DriftLevel::Warm
        } else if minutes < 60.0 {
            DriftLevel::Hot
        } else {
            DriftLevel::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DriftLevel::Calm => "calm",
            DriftLevel::Warm => "warm",
            DriftLevel::Hot => "hot",
            DriftLevel::Critical => "critical",
        }
    }
}

/// Snapshot of a working tree as reported by the VCS binary.
///
/// `staged`, `modified`, `untracked` and `conflicts` are per-file counts. A
/// conflicted file is counted once, as a conflict, and never as modified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySnapshot {
    pub is_repository: bool,
    pub branch: String,
    pub ahead: u32,
    pub behind: u32,
    pub staged: u32,
    pub modified: u32,
    pub untracked: u32,
    pub conflicts: u32,
    pub last_commit_age_seconds: f64,
    pub last_commit_message: String,
    /// One-line log, newest first, at most 5 entries.
    pub recent_commits: Vec<String>,
    pub stash_count: u32,
}

impl RepositorySnapshot {
    /// Snapshot returned for anything that is not a repository.
    pub fn not_a_repository() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.staged == 0 && self.modified == 0 && self.untracked == 0
    }

    /// Staged + modified + untracked. Conflicts are not included.
    pub fn total_changes(&self) -> u32 {
        self.staged + self.modified + self.untracked
    }

    pub fn drift_minutes(&self) -> f64 {
        self.last_commit_age_seconds / 60.0
    }

    pub fn drift_level(&self) -> DriftLevel {
        DriftLevel::from_minutes(self.drift_minutes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aged(seconds: f64) -> RepositorySnapshot {
        RepositorySnapshot {
            last_commit_age_seconds: seconds,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_are_clean() {
        let repo = RepositorySnapshot::default();
        assert!(repo.is_clean());
        assert_eq!(repo.total_changes(), 0);
        assert_eq!(repo.drift_level(), DriftLevel::Calm);
    }

    #[test]
    fn test_dirty_totals() {
        let repo = RepositorySnapshot {
            staged: 2,
            modified: 3,
            untracked: 1,
            ..Default::default()
        };
        assert!(!repo.is_clean());
        assert_eq!(repo.total_changes(), 6);
    }

    #[test]
    fn test_conflicts_excluded_from_totals() {
        let repo = RepositorySnapshot {
            conflicts: 2,
            ..Default::default()
        };
        assert_eq!(repo.total_changes(), 0);
        assert!(repo.is_clean());
    }

    #[test]
    fn test_drift_levels() {
        assert_eq!(aged(0.0).drift_level(), DriftLevel::Calm);
        assert_eq!(aged(599.0).drift_level(), DriftLevel::Calm);
        assert_eq!(aged(600.0).drift_level(), DriftLevel::Calm);
        assert_eq!(aged(1200.0).drift_level(), DriftLevel::Warm);
        assert_eq!(aged(2400.0).drift_level(), DriftLevel::Hot);
        assert_eq!(aged(7200.0).drift_level(), DriftLevel::Critical);
    }

    #[test]
    fn test_drift_minutes() {
        assert_eq!(aged(1800.0).drift_minutes(), 30.0);
    }

    #[test]
    fn test_drift_level_serializes_lowercase() {
        let json = serde_json::to_string(&DriftLevel::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
