//! Changed working-tree files, churn heatmap entries and change fingerprints.

use serde::{Deserialize, Serialize};

/// Working-tree status of a changed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    #[default]
    Modified,
    Added,
    Deleted,
    Renamed,
    Untracked,
}

impl DiffStatus {
    /// Resolves the two porcelain status columns into one status.
    ///
    /// Precedence: untracked, added (index), deleted (either column),
    /// renamed (index), modified.
    pub fn from_porcelain(index: char, worktree: char) -> Self {
        if index == '?' && worktree == '?' {
            DiffStatus::Untracked
        } else if index == 'A' {
            DiffStatus::Added
        } else if index == 'D' || worktree == 'D' {
            DiffStatus::Deleted
        } else if index == 'R' {
            DiffStatus::Renamed
        } else {
            DiffStatus::Modified
        }
    }

    pub fn code(self) -> char {
        match self {
            DiffStatus::Modified => 'M',
            DiffStatus::Added => 'A',
            DiffStatus::Deleted => 'D',
            DiffStatus::Renamed => 'R',
            DiffStatus::Untracked => '?',
        }
    }
}

/// A changed file with line statistics and raw unified-diff text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffFile {
    pub path: String,
    pub status: DiffStatus,
    /// Summed across staged and unstaged diffs.
    pub insertions: u32,
    pub deletions: u32,
    /// Empty for untracked files.
    pub diff_lines: Vec<String>,
}

impl DiffFile {
    pub fn new(path: impl Into<String>, status: DiffStatus) -> Self {
        Self {
            path: path.into(),
            status,
            ..Default::default()
        }
    }

    pub fn total_changes(&self) -> u32 {
        self.insertions + self.deletions
    }

    /// Share of insertions: 0.0 all deletions, 1.0 all insertions.
    ///
    /// Files without line stats (renames, binaries) report the 0.5 midpoint.
    pub fn change_ratio(&self) -> f64 {
        let total = self.total_changes();
        if total == 0 {
            return 0.5;
        }
        self.insertions as f64 / total as f64
    }

    pub fn fingerprint(&self, buckets: usize) -> Vec<bool> {
        fingerprint(&self.diff_lines, buckets)
    }
}

/// File churn across a trailing window of commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapEntry {
    pub path: String,
    pub commit_count: u32,
    pub last_author: String,
}

/// New-side line range of one hunk, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    pub start: u32,
    pub end: u32,
}

impl HunkRange {
    /// Parses `@@ -a,b +c,d @@ ...`. A missing count means one line.
    pub fn parse(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("@@ ")?;
        let (ranges, _) = rest.split_once(" @@")?;
        let new_side = ranges.split_whitespace().find(|part| part.starts_with('+'))?;
        let new_side = &new_side[1..];
        let (start, count) = match new_side.split_once(',') {
            Some((start, count)) => (start.parse().ok()?, count.parse().ok()?),
            None => (new_side.parse().ok()?, 1),
        };
        Some(Self {
            start,
            end: start.saturating_add(count),
        })
    }
}

/// Maps hunk positions onto `buckets` equal-width slices of the file.
///
/// The file extent is the furthest hunk end. A bucket is hot when any hunk
/// overlaps it. Always returns exactly `buckets` values.
pub fn fingerprint(diff_lines: &[String], buckets: usize) -> Vec<bool> {
    let mut hot = vec![false; buckets];
    if buckets == 0 {
        return hot;
    }

    // Pure deletions have an empty new-side range; give them one line.
    let hunks: Vec<(f64, f64)> = diff_lines
        .iter()
        .filter_map(|line| HunkRange::parse(line))
        .map(|h| (h.start as f64, h.end.max(h.start.saturating_add(1)) as f64))
        .collect();
    let extent = hunks.iter().map(|&(_, end)| end).fold(0.0, f64::max);
    if extent <= 0.0 {
        return hot;
    }

    let width = extent / buckets as f64;
    for (i, cell) in hot.iter_mut().enumerate() {
        let lo = i as f64 * width;
        let hi = lo + width;
        *cell = hunks.iter().any(|&(start, end)| start < hi && end > lo);
    }
    hot
}

/// Splits `width` cells between insertions and deletions.
///
/// Returns `(inserted_cells, deleted_cells)`; they fill the whole width when
/// there are any changes and are both zero otherwise.
pub fn diff_density(insertions: u32, deletions: u32, width: usize) -> (usize, usize) {
    let total = insertions as u64 + deletions as u64;
    if total == 0 || width == 0 {
        return (0, 0);
    }
    let inserted = ((insertions as u64 * width as u64) as f64 / total as f64).round() as usize;
    let inserted = inserted.min(width);
    (inserted, width - inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_change_ratio() {
        let mut file = DiffFile::new("new.rs", DiffStatus::Added);
        assert_eq!(file.change_ratio(), 0.5);

        file.insertions = 20;
        assert_eq!(file.change_ratio(), 1.0);

        file.insertions = 0;
        file.deletions = 15;
        assert_eq!(file.change_ratio(), 0.0);

        file.insertions = 10;
        file.deletions = 5;
        assert_eq!(file.total_changes(), 15);
        assert!((file.change_ratio() - 0.667).abs() < 0.01);
    }

    #[test]
    fn test_status_precedence() {
        assert_eq!(DiffStatus::from_porcelain('?', '?'), DiffStatus::Untracked);
        assert_eq!(DiffStatus::from_porcelain('A', 'M'), DiffStatus::Added);
        assert_eq!(DiffStatus::from_porcelain('A', 'D'), DiffStatus::Added);
        assert_eq!(DiffStatus::from_porcelain(' ', 'D'), DiffStatus::Deleted);
        assert_eq!(DiffStatus::from_porcelain('R', 'D'), DiffStatus::Deleted);
        assert_eq!(DiffStatus::from_porcelain('R', ' '), DiffStatus::Renamed);
        assert_eq!(DiffStatus::from_porcelain('M', 'M'), DiffStatus::Modified);
        assert_eq!(DiffStatus::from_porcelain(' ', 'M'), DiffStatus::Modified);
    }

    #[test]
    fn test_hunk_header_parse() {
        assert_eq!(
            HunkRange::parse("@@ -1,5 +1,8 @@"),
            Some(HunkRange { start: 1, end: 9 })
        );
        assert_eq!(
            HunkRange::parse("@@ -20,3 +23 @@ fn main() {"),
            Some(HunkRange { start: 23, end: 24 })
        );
        assert_eq!(HunkRange::parse("+new line"), None);
        assert_eq!(HunkRange::parse("@@ garbage @@"), None);
    }

    #[test]
    fn test_fingerprint_marks_hunk_buckets() {
        let diff = lines(&[
            "@@ -1,5 +1,8 @@",
            "+new line",
            " context",
            "@@ -20,3 +23,5 @@",
            "+another",
        ]);
        // Extent 28 over 4 buckets of 7 lines: [0,7) [7,14) [14,21) [21,28)
        assert_eq!(fingerprint(&diff, 4), vec![true, true, false, true]);
    }

    #[test]
    fn test_fingerprint_without_hunks() {
        assert_eq!(fingerprint(&[], 10), vec![false; 10]);
        assert_eq!(fingerprint(&lines(&["+x"]), 3), vec![false; 3]);
        assert!(fingerprint(&lines(&["@@ -1 +1 @@"]), 0).is_empty());
    }

    #[test]
    fn test_hunk_range_saturates_at_line_limit() {
        assert_eq!(
            HunkRange::parse("@@ -1 +4294967295,5 @@"),
            Some(HunkRange {
                start: u32::MAX,
                end: u32::MAX
            })
        );
        let diff = lines(&["@@ -1 +4294967295,5 @@", "@@ -3,2 +4294967295,0 @@"]);
        assert_eq!(fingerprint(&diff, 4).len(), 4);
    }

    #[test]
    fn test_diff_density() {
        assert_eq!(diff_density(0, 0, 10), (0, 0));
        assert_eq!(diff_density(10, 0, 10), (10, 0));
        assert_eq!(diff_density(0, 7, 10), (0, 10));
        assert_eq!(diff_density(10, 5, 9), (6, 3));
    }
}
