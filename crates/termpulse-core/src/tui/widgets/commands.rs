//! Command flow panel: recent commands as category glyphs plus the distribution.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::truncate;
use crate::model::{CommandEntry, command_distribution};
use crate::tui::style::{Styles, category_color};

use super::bar;

/// Most recent commands listed verbatim below the distribution.
const RECENT_SHOWN: usize = 5;

pub fn render_commands(frame: &mut Frame, area: Rect, commands: &[CommandEntry]) {
    let block = Block::default()
        .title(format!(" Commands ({}) ", commands.len()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if commands.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(" no shell history", Styles::dim())),
            inner,
        );
        return;
    }

    let width = inner.width as usize;

    // Newest glyphs on the right, one per command.
    let stream_len = width.saturating_sub(2);
    let start = commands.len().saturating_sub(stream_len);
    let mut stream = vec![Span::raw(" ")];
    stream.extend(commands[start..].iter().map(|c| {
        Span::styled(
            c.category.symbol().to_string(),
            Style::default().fg(category_color(c.category)),
        )
    }));
    let mut lines = vec![Line::from(stream), Line::from("")];

    let mut distribution: Vec<_> = command_distribution(commands).into_iter().collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1));
    let total = commands.len() as f64;
    let bar_width = width.saturating_sub(22).clamp(4, 20);
    for (category, count) in distribution {
        let color = Style::default().fg(category_color(category));
        lines.push(Line::from(vec![
            Span::styled(format!(" {} {:<9}", category.symbol(), category.label()), color),
            Span::styled(bar(count as f64 / total, bar_width), color),
            Span::styled(format!(" {:>3}", count), Styles::dim()),
        ]));
    }

    lines.push(Line::from(""));
    for entry in commands.iter().rev().take(RECENT_SHOWN) {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", entry.category.symbol()),
                Style::default().fg(category_color(entry.category)),
            ),
            Span::raw(truncate(&entry.raw, width.saturating_sub(4))),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
