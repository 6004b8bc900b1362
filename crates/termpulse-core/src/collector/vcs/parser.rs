//! Parsers for VCS command output.
//!
//! These are pure functions over command stdout, designed to be easily
//! testable with string inputs.

use std::collections::HashMap;

/// Per-file counters from porcelain status output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub staged: u32,
    pub modified: u32,
    pub untracked: u32,
    pub conflicts: u32,
}

/// Index-column codes that mean a staged change.
const STAGED_CODES: &[char] = &['M', 'A', 'D', 'R', 'C'];

/// Whether an `(index, worktree)` pair marks an unmerged file.
///
/// Any `U` column is unmerged, as are both-added (`AA`) and both-deleted (`DD`).
pub fn is_conflict(index: char, worktree: char) -> bool {
    index == 'U'
        || worktree == 'U'
        || (index == 'A' && worktree == 'A')
        || (index == 'D' && worktree == 'D')
}

/// Splits a porcelain line into its two status columns.
fn status_columns(line: &str) -> Option<(char, char)> {
    let mut chars = line.chars();
    Some((chars.next()?, chars.next()?))
}

/// Counts staged, modified, untracked and conflicted files.
///
/// A conflicted file only increments `conflicts`. Otherwise a file may count
/// as both staged and modified (staged with further unstaged edits).
pub fn count_status(output: &str) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for line in output.lines() {
        let Some((index, worktree)) = status_columns(line) else {
            continue;
        };
        if is_conflict(index, worktree) {
            counts.conflicts += 1;
            continue;
        }
        if STAGED_CODES.contains(&index) {
            counts.staged += 1;
        }
        if worktree == 'M' || worktree == 'D' {
            counts.modified += 1;
        } else if index == '?' && worktree == '?' {
            counts.untracked += 1;
        }
    }
    counts
}

/// One file line of porcelain status output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub index: char,
    pub worktree: char,
    /// Post-rename path for renames.
    pub path: String,
}

/// Parses `XY path` or `XY old -> new`. Lines shorter than 3 chars are skipped.
pub fn parse_status_entry(line: &str) -> Option<StatusEntry> {
    let (index, worktree) = status_columns(line)?;
    let rest = line.get(index.len_utf8() + worktree.len_utf8()..)?;
    let path = rest.trim();
    if rest.is_empty() || path.is_empty() {
        return None;
    }
    let path = match path.split_once(" -> ") {
        Some((_, new)) => new,
        None => path,
    };
    Some(StatusEntry {
        index,
        worktree,
        path: path.to_string(),
    })
}

/// Parses `rev-list --left-right --count` output into `(ahead, behind)`.
pub fn parse_ahead_behind(output: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = output.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }
    Some((parts[0].parse().ok()?, parts[1].parse().ok()?))
}

/// One line of `diff --numstat` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumstatEntry {
    pub insertions: u32,
    pub deletions: u32,
    pub path: String,
}

/// Parses `insertions<TAB>deletions<TAB>path`. Binary files (`-`) count as 0.
pub fn parse_numstat_line(line: &str) -> Option<NumstatEntry> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() != 3 {
        return None;
    }
    let count = |field: &str| -> Option<u32> {
        if field == "-" {
            Some(0)
        } else {
            field.parse().ok()
        }
    };
    Some(NumstatEntry {
        insertions: count(parts[0])?,
        deletions: count(parts[1])?,
        path: parts[2].to_string(),
    })
}

/// Counts non-empty lines.
pub fn count_lines(output: &str) -> u32 {
    output.lines().filter(|l| !l.trim().is_empty()).count() as u32
}

/// Counts path occurrences in a name-only log, in first-seen order.
pub fn count_paths(log_output: &str) -> Vec<(String, u32)> {
    let mut order: Vec<(String, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for line in log_output.lines() {
        let path = line.trim();
        if path.is_empty() {
            continue;
        }
        match index.get(path) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(path, order.len());
                order.push((path.to_string(), 1));
            }
        }
    }
    order
}
