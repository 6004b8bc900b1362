//! Help popup listing the keybindings.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::style::Styles;

const KEYS: &[(&str, &str)] = &[
    ("q, Esc", "quit (Esc leaves a view first)"),
    ("Ctrl-C", "quit immediately"),
    ("r", "refresh every panel now"),
    ("p", "pause or resume polling"),
    ("v", "toggle the diff view"),
    ("h", "toggle the heatmap view"),
    ("d", "back to the dashboard"),
    ("j/k, ↓/↑", "select file"),
    ("J/K, PgDn/PgUp", "scroll the diff"),
    ("?", "close this help"),
];

/// Renders the help popup centered on screen.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let popup_width = (area.width * 60 / 100).clamp(40, 64).min(area.width);
    let popup_height = (KEYS.len() as u16 + 4).min(area.height);

    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![Line::from("")];
    lines.extend(KEYS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!(" {:<16}", key), Styles::label()),
            Span::raw(*action),
        ])
    }));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, popup_area);
}
