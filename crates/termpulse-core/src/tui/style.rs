//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

use crate::model::{CommandCategory, DiffStatus, DriftLevel, FlowLevel};

/// Dashboard color palette.
pub struct Theme;

impl Theme {
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_BG: Color = Color::Blue;
    pub const HEADER_FG: Color = Color::White;
    pub const SELECTED_BG: Color = Color::DarkGray;

    pub const INSERT: Color = Color::Green;
    pub const DELETE: Color = Color::Red;
    pub const HUNK: Color = Color::Cyan;

    pub const CPU_COLOR: Color = Color::Cyan;
    pub const MEM_COLOR: Color = Color::Magenta;
    pub const DISK_COLOR: Color = Color::Yellow;
    pub const NET_COLOR: Color = Color::Green;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row style.
    pub fn selected() -> Style {
        Style::default()
            .bg(Theme::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    pub fn label() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn bold() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn insert() -> Style {
        Style::default().fg(Theme::INSERT)
    }

    pub fn modified() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn delete() -> Style {
        Style::default().fg(Theme::DELETE)
    }

    pub fn hunk() -> Style {
        Style::default().fg(Theme::HUNK)
    }

    /// Style for one line of unified-diff text.
    pub fn diff_line(line: &str) -> Style {
        if line.starts_with("@@") {
            Self::hunk()
        } else if line.starts_with("+++") || line.starts_with("---") {
            Self::bold()
        } else if line.starts_with('+') {
            Self::insert()
        } else if line.starts_with('-') {
            Self::delete()
        } else {
            Style::default()
        }
    }

    /// Style for a percentage: green, yellow above 60, red above 85.
    pub fn percent(value: f64) -> Style {
        let color = if value > 85.0 {
            Color::Red
        } else if value > 60.0 {
            Color::Yellow
        } else {
            Color::Green
        };
        Style::default().fg(color)
    }
}

pub fn drift_color(level: DriftLevel) -> Color {
    match level {
        DriftLevel::Calm => Color::Green,
        DriftLevel::Warm => Color::Yellow,
        DriftLevel::Hot => Color::LightRed,
        DriftLevel::Critical => Color::Red,
    }
}

pub fn flow_color(level: FlowLevel) -> Color {
    match level {
        FlowLevel::Low => Color::DarkGray,
        FlowLevel::Steady => Color::Yellow,
        FlowLevel::Flow => Color::Green,
    }
}

pub fn category_color(category: CommandCategory) -> Color {
    match category {
        CommandCategory::Git => Color::LightRed,
        CommandCategory::Python => Color::Yellow,
        CommandCategory::Node => Color::Green,
        CommandCategory::Build => Color::LightBlue,
        CommandCategory::Navigate => Color::Gray,
        CommandCategory::Edit => Color::Magenta,
        CommandCategory::Docker => Color::Cyan,
        CommandCategory::Shell => Color::White,
        CommandCategory::Network => Color::LightCyan,
        CommandCategory::Assistant => Color::LightMagenta,
        CommandCategory::Other => Color::DarkGray,
    }
}

pub fn status_color(status: DiffStatus) -> Color {
    match status {
        DiffStatus::Modified => Color::Yellow,
        DiffStatus::Added => Color::Green,
        DiffStatus::Deleted => Color::Red,
        DiffStatus::Renamed => Color::Cyan,
        DiffStatus::Untracked => Color::DarkGray,
    }
}
