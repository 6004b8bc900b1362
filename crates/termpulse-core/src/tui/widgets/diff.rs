//! Diff view: changed-file list on the left, selected file's diff on the right.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use crate::fmt::truncate_path;
use crate::model::{DiffFile, diff_density};
use crate::tui::state::AppState;
use crate::tui::style::{Styles, status_color};

use super::fingerprint_cells;

const DENSITY_WIDTH: usize = 10;
const FINGERPRINT_BUCKETS: usize = 12;

pub fn render_diff(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_file_list(frame, chunks[0], state);
    render_diff_text(frame, chunks[1], state);
}

fn render_file_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" Changed files ({}) ", state.diff_files.len()))
        .borders(Borders::ALL);

    if state.diff_files.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(
            Paragraph::new(Span::styled(" nothing to show", Styles::dim())),
            inner,
        );
        return;
    }

    // status + spaces + density + counts + fingerprint
    let fixed = 3 + DENSITY_WIDTH + 12 + FINGERPRINT_BUCKETS + 2;
    let path_width = (area.width as usize).saturating_sub(fixed + 2).max(8);

    let items: Vec<ListItem> = state
        .diff_files
        .iter()
        .map(|file| ListItem::new(file_line(file, path_width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Styles::selected());
    let mut list_state = ListState::default().with_selected(Some(state.diff_selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn file_line(file: &DiffFile, path_width: usize) -> Line<'static> {
    let (inserted, deleted) = diff_density(file.insertions, file.deletions, DENSITY_WIDTH);
    let idle = DENSITY_WIDTH - inserted - deleted;
    Line::from(vec![
        Span::styled(
            format!(" {} ", file.status.code()),
            Style::default().fg(status_color(file.status)),
        ),
        Span::raw(format!("{:<width$} ", truncate_path(&file.path, path_width), width = path_width)),
        Span::styled("+".repeat(inserted), Styles::insert()),
        Span::styled("-".repeat(deleted), Styles::delete()),
        Span::raw(" ".repeat(idle)),
        Span::styled(format!(" {:>4}", format!("+{}", file.insertions)), Styles::insert()),
        Span::styled(format!(" {:>4} ", format!("-{}", file.deletions)), Styles::delete()),
        Span::styled(fingerprint_cells(&file.fingerprint(FINGERPRINT_BUCKETS)), Styles::hunk()),
    ])
}

fn render_diff_text(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = state
        .selected_diff()
        .map(|f| format!(" {} ", f.path))
        .unwrap_or_else(|| " Diff ".to_string());
    let block = Block::default().title(title).borders(Borders::ALL);

    let lines: Vec<Line> = match state.selected_diff() {
        Some(file) if !file.diff_lines.is_empty() => file
            .diff_lines
            .iter()
            .map(|line| Line::from(Span::styled(line.as_str(), Styles::diff_line(line))))
            .collect(),
        Some(_) => vec![Line::from(Span::styled(" no diff text (untracked or binary)", Styles::dim()))],
        None => Vec::new(),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((state.diff_scroll, 0));
    frame.render_widget(paragraph, area);
}
