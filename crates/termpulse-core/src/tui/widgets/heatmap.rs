//! Heatmap view: most frequently committed files with their last author.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::fmt::{truncate, truncate_path};
use crate::tui::state::AppState;
use crate::tui::style::Styles;

use super::bar;

const BAR_WIDTH: usize = 20;
const AUTHOR_WIDTH: usize = 18;

pub fn render_heatmap(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" Hot files ({}) ", state.heatmap.len()))
        .borders(Borders::ALL);

    if state.heatmap.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled(" no commit history", Styles::dim())),
            inner,
        );
        return;
    }

    let max = state.heatmap.iter().map(|e| e.commit_count).max().unwrap_or(1).max(1);
    let path_width = (area.width as usize)
        .saturating_sub(BAR_WIDTH + AUTHOR_WIDTH + 12)
        .max(8);

    let items: Vec<ListItem> = state
        .heatmap
        .iter()
        .map(|entry| {
            let ratio = entry.commit_count as f64 / max as f64;
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    " {:<width$} ",
                    truncate_path(&entry.path, path_width),
                    width = path_width
                )),
                Span::styled(bar(ratio, BAR_WIDTH), Style::default().fg(heat_color(ratio))),
                Span::raw(format!(" {:>4} ", entry.commit_count)),
                Span::styled(truncate(&entry.last_author, AUTHOR_WIDTH), Styles::dim()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Styles::selected());
    let mut list_state = ListState::default().with_selected(Some(state.heatmap_selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn heat_color(ratio: f64) -> Color {
    if ratio > 0.75 {
        Color::Red
    } else if ratio > 0.4 {
        Color::Yellow
    } else {
        Color::Green
    }
}
