//! Main rendering logic for the dashboard.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders};

use super::state::{AppState, View};
use super::style::drift_color;
use super::widgets::{
    render_commands, render_diff, render_footer, render_header, render_heatmap, render_help,
    render_momentum, render_repository, render_resources,
};

/// Main render function.
pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(8),    // Body
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_header(frame, chunks[0], state);
    match state.view {
        View::Dashboard => render_dashboard(frame, chunks[1], state),
        View::Diff => render_diff(frame, chunks[1], state),
        View::Heatmap => render_heatmap(frame, chunks[1], state),
    }
    render_footer(frame, chunks[2], state);

    if state.show_help {
        render_help(frame, area);
    }
}

/// 2x2 grid inside a border colored by the repository's drift level.
fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(drift_color(state.repository.drift_level())));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);
    let top = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_repository(frame, top[0], &state.repository);
    render_resources(frame, top[1], &state.resources);
    render_commands(frame, bottom[0], &state.commands);
    render_momentum(frame, bottom[1], &state.momentum);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        CommandEntry, DiffFile, DiffStatus, HeatmapEntry, MomentumSnapshot, RepositorySnapshot,
        ResourceSnapshot,
    };
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::Path;

    fn populated_state() -> AppState {
        let mut state = AppState::new(Path::new("/home/dev/termpulse"));
        state.repository = RepositorySnapshot {
            is_repository: true,
            branch: "main".to_string(),
            ahead: 1,
            modified: 2,
            untracked: 1,
            last_commit_age_seconds: 1900.0,
            last_commit_message: "fix parser".to_string(),
            recent_commits: vec!["abc1234 fix parser".to_string(), "def5678 init".to_string()],
            ..Default::default()
        };
        state.resources = ResourceSnapshot {
            cpu_percent: 42.0,
            cpu_history: vec![0.0, 10.0, 42.0],
            memory_percent: 61.0,
            memory_used_gb: 9.8,
            memory_total_gb: 16.0,
            disk_percent: 90.0,
            net_sent_bytes_per_sec: 2048,
            load_average_1m: 0.5,
            process_count: 312,
            ..Default::default()
        };
        state.commands = ["git status", "cargo test", "cd src", "nvim lib.rs"]
            .iter()
            .filter_map(|line| CommandEntry::parse(line, None))
            .collect();
        state.momentum = MomentumSnapshot {
            flow_score: 72.0,
            command_diversity: 0.8,
            session_duration_minutes: 95.0,
            ..Default::default()
        };
        let mut file = DiffFile::new("src/lib.rs", DiffStatus::Modified);
        file.insertions = 3;
        file.deletions = 1;
        file.diff_lines = vec![
            "@@ -1,2 +1,4 @@".to_string(),
            "+use std::io;".to_string(),
            "-old".to_string(),
        ];
        state.set_diff_files(vec![file, DiffFile::new("notes.txt", DiffStatus::Untracked)]);
        state.set_heatmap(vec![HeatmapEntry {
            path: "src/lib.rs".to_string(),
            commit_count: 4,
            last_author: "Dev".to_string(),
        }]);
        state
    }

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_every_view() {
        let mut state = populated_state();
        for view in [View::Dashboard, View::Diff, View::Heatmap] {
            state.view = view;
            let screen = draw(&state, 120, 32);
            assert!(screen.contains("termpulse"), "{:?} view has no header", view);
        }
    }

    #[test]
    fn test_dashboard_panels() {
        let screen = draw(&populated_state(), 120, 32);
        assert!(screen.contains("Repository"));
        assert!(screen.contains("System"));
        assert!(screen.contains("Commands (4)"));
        assert!(screen.contains("Momentum"));
        assert!(screen.contains("main"));
    }

    #[test]
    fn test_diff_view_shows_selected_file() {
        let mut state = populated_state();
        state.view = View::Diff;
        let screen = draw(&state, 120, 32);
        assert!(screen.contains("Changed files (2)"));
        assert!(screen.contains("+use std::io;"));
    }

    #[test]
    fn test_empty_state_and_help_overlay() {
        let mut state = AppState::new(Path::new("/tmp/empty"));
        state.show_help = true;
        let screen = draw(&state, 80, 24);
        assert!(screen.contains("not a repository"));
        assert!(screen.contains("Help"));
    }

    #[test]
    fn test_tiny_terminal() {
        let mut state = populated_state();
        for view in [View::Dashboard, View::Diff, View::Heatmap] {
            state.view = view;
            draw(&state, 20, 6);
        }
    }
}
