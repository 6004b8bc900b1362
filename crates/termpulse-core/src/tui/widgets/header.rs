//! Header bar (project, branch, view, clock) and key-hint footer.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::fmt::truncate_path;
use crate::tui::state::{AppState, View};
use crate::tui::style::Styles;

/// Renders the header bar.
pub fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([
        Constraint::Min(20),    // Project and cwd
        Constraint::Length(12), // View
        Constraint::Length(10), // Mode
        Constraint::Length(10), // Clock
    ])
    .split(area);

    let mut title = vec![Span::styled(format!(" termpulse · {}", state.project), Styles::header())];
    if state.repository.is_repository {
        title.push(Span::styled(format!(" ({})", state.repository.branch), Styles::header()));
    }
    let room = (chunks[0].width as usize).saturating_sub(title_width(&title) + 2);
    if room > 8 {
        title.push(Span::styled(
            format!("  {}", truncate_path(&state.cwd, room)),
            Styles::header(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(title)).style(Styles::header()), chunks[0]);

    let view = Paragraph::new(format!(" {} ", state.view.name())).style(Styles::header());
    frame.render_widget(view, chunks[1]);

    let mode = if state.paused { " PAUSED " } else { " LIVE " };
    frame.render_widget(Paragraph::new(mode).style(Styles::header()), chunks[2]);

    let clock = Local::now().format(" %H:%M:%S").to_string();
    frame.render_widget(Paragraph::new(clock).style(Styles::header()), chunks[3]);
}

fn title_width(spans: &[Span]) -> usize {
    spans.iter().map(|s| s.content.chars().count()).sum()
}

/// Renders the key hints for the current view.
pub fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let hints: &[(&str, &str)] = match state.view {
        View::Dashboard => &[
            ("q", "quit"),
            ("r", "refresh"),
            ("v", "diff"),
            ("h", "heatmap"),
            ("p", "pause"),
            ("?", "help"),
        ],
        View::Diff => &[
            ("j/k", "select"),
            ("J/K", "scroll"),
            ("d", "dashboard"),
            ("h", "heatmap"),
            ("?", "help"),
        ],
        View::Heatmap => &[
            ("j/k", "select"),
            ("d", "dashboard"),
            ("v", "diff"),
            ("?", "help"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(format!(" {} ", key), Styles::label()),
                Span::styled(format!("{} ", action), Styles::dim()),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
