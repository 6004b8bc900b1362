//! Parsed shell-history entries and their categories.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Coarse classification of a shell command by its executable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    Git,
    Python,
    Node,
    Build,
    Navigate,
    Edit,
    Docker,
    Shell,
    Network,
    Assistant,
    Other,
}

/// Known executables per category. Lookup order is table order.
const CATEGORY_TABLE: &[(CommandCategory, &[&str])] = &[
    (CommandCategory::Git, &["git"]),
    (
        CommandCategory::Python,
        &["python", "python3", "pip", "pip3", "pytest", "mypy", "ruff"],
    ),
    (
        CommandCategory::Node,
        &["node", "npm", "npx", "yarn", "pnpm", "bun", "tsx", "ts-node"],
    ),
    (
        CommandCategory::Build,
        &["make", "cargo", "go", "gcc", "cmake", "gradle", "mvn"],
    ),
    (
        CommandCategory::Navigate,
        &["cd", "ls", "ll", "lll", "pwd", "fd", "rg", "bat", "cat", "less"],
    ),
    (
        CommandCategory::Edit,
        &["vim", "nvim", "nano", "code", "cursor", "emacs"],
    ),
    (
        CommandCategory::Docker,
        &["docker", "docker-compose", "podman", "kubectl", "k9s"],
    ),
    (
        CommandCategory::Shell,
        &["echo", "export", "source", "alias", "which", "type", "env"],
    ),
    (
        CommandCategory::Network,
        &["curl", "wget", "ssh", "scp", "rsync", "httpie"],
    ),
    (
        CommandCategory::Assistant,
        &["claude", "grip", "gg", "ggr", "ggl", "sesh"],
    ),
];

impl CommandCategory {
    /// Classifies a command line by the basename of its first token.
    ///
    /// `/usr/bin/git status` is `Git`; blank input is `Other`.
    pub fn classify(command_line: &str) -> Self {
        let Some(first) = command_line.split_whitespace().next() else {
            return CommandCategory::Other;
        };
        let base = first.rsplit('/').next().unwrap_or(first);
        CATEGORY_TABLE
            .iter()
            .find(|(_, names)| names.contains(&base))
            .map(|(category, _)| *category)
            .unwrap_or(CommandCategory::Other)
    }

    pub fn label(self) -> &'static str {
        match self {
            CommandCategory::Git => "git",
            CommandCategory::Python => "python",
            CommandCategory::Node => "node",
            CommandCategory::Build => "build",
            CommandCategory::Navigate => "navigate",
            CommandCategory::Edit => "edit",
            CommandCategory::Docker => "docker",
            CommandCategory::Shell => "shell",
            CommandCategory::Network => "network",
            CommandCategory::Assistant => "assistant",
            CommandCategory::Other => "other",
        }
    }

    /// Single glyph used by the command stream.
    pub fn symbol(self) -> char {
        match self {
            CommandCategory::Git => '◆',
            CommandCategory::Python => '●',
            CommandCategory::Node => '▲',
            CommandCategory::Build => '■',
            CommandCategory::Navigate => '→',
            CommandCategory::Edit => '✎',
            CommandCategory::Docker => '⬢',
            CommandCategory::Shell => '$',
            CommandCategory::Network => '⇄',
            CommandCategory::Assistant => '✦',
            CommandCategory::Other => '·',
        }
    }
}

/// One parsed shell-history line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    /// Full command line, trimmed.
    pub raw: String,
    /// First whitespace-delimited token, as written (paths kept).
    pub command: String,
    pub category: CommandCategory,
    /// Epoch seconds, when the history format records it.
    pub timestamp: Option<f64>,
}

impl CommandEntry {
    /// Builds an entry from a command line. Returns `None` for blank lines.
    pub fn parse(command_line: &str, timestamp: Option<f64>) -> Option<Self> {
        let raw = command_line.trim();
        let command = raw.split_whitespace().next()?;
        Some(Self {
            raw: raw.to_string(),
            command: command.to_string(),
            category: CommandCategory::classify(raw),
            timestamp,
        })
    }
}

/// Counts entries per category.
pub fn command_distribution(entries: &[CommandEntry]) -> BTreeMap<CommandCategory, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_basename() {
        assert_eq!(
            CommandCategory::classify("/usr/bin/git status"),
            CommandCategory::Git
        );
        assert_eq!(
            CommandCategory::classify("/usr/local/bin/python3 test.py"),
            CommandCategory::Python
        );
        assert_eq!(CommandCategory::classify("cargo test"), CommandCategory::Build);
        assert_eq!(
            CommandCategory::classify("unknown_tool --help"),
            CommandCategory::Other
        );
    }

    #[test]
    fn test_classify_blank() {
        assert_eq!(CommandCategory::classify(""), CommandCategory::Other);
        assert_eq!(CommandCategory::classify("   "), CommandCategory::Other);
    }

    #[test]
    fn test_parse_entry() {
        let entry = CommandEntry::parse("  /usr/bin/git commit -m wip ", Some(1.0)).unwrap();
        assert_eq!(entry.raw, "/usr/bin/git commit -m wip");
        assert_eq!(entry.command, "/usr/bin/git");
        assert_eq!(entry.category, CommandCategory::Git);
        assert_eq!(entry.timestamp, Some(1.0));

        assert!(CommandEntry::parse(" \t ", None).is_none());
    }

    #[test]
    fn test_command_distribution() {
        let entries: Vec<CommandEntry> = ["git status", "git commit", "python3 test.py", "ls -la"]
            .iter()
            .filter_map(|line| CommandEntry::parse(line, None))
            .collect();
        let dist = command_distribution(&entries);
        assert_eq!(dist[&CommandCategory::Git], 2);
        assert_eq!(dist[&CommandCategory::Python], 1);
        assert_eq!(dist[&CommandCategory::Navigate], 1);
        assert!(!dist.contains_key(&CommandCategory::Other));
    }
}
