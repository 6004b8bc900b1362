//! Repository pulse panel: branch, tracking, working-tree counts and drift.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::{format_age, truncate};
use crate::model::RepositorySnapshot;
use crate::tui::style::{Styles, drift_color};

use super::bar;

pub fn render_repository(frame: &mut Frame, area: Rect, repo: &RepositorySnapshot) {
    let block = Block::default().title(" Repository ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !repo.is_repository {
        let text = Paragraph::new(Line::from(Span::styled(
            " not a repository",
            Styles::dim(),
        )));
        frame.render_widget(text, inner);
        return;
    }

    let width = inner.width as usize;
    let drift = Style::default().fg(drift_color(repo.drift_level()));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" ⎇ ", Styles::label()),
            Span::styled(repo.branch.clone(), Styles::bold()),
            Span::raw(format!("  ↑{} ↓{}", repo.ahead, repo.behind)),
            Span::styled(
                if repo.stash_count > 0 {
                    format!("  stash {}", repo.stash_count)
                } else {
                    String::new()
                },
                Styles::dim(),
            ),
        ]),
        Line::from(vec![
            Span::styled(format!(" +{} staged", repo.staged), Styles::insert()),
            Span::styled(format!("  ~{} modified", repo.modified), Styles::modified()),
            Span::styled(format!("  ?{} untracked", repo.untracked), Styles::dim()),
            Span::styled(
                if repo.conflicts > 0 {
                    format!("  !{} conflicts", repo.conflicts)
                } else {
                    String::new()
                },
                Styles::delete(),
            ),
        ]),
    ];

    let bar_width = width.saturating_sub(24).clamp(4, 30);
    let drift_ratio = (repo.drift_minutes() / 60.0).min(1.0);
    lines.push(Line::from(vec![
        Span::styled(" drift ", Styles::label()),
        Span::styled(bar(drift_ratio, bar_width), drift),
        Span::styled(
            format!(" {} {}", format_age(repo.last_commit_age_seconds), repo.drift_level().label()),
            drift,
        ),
    ]));

    if repo.is_clean() {
        lines.push(Line::from(Span::styled(" ✓ working tree clean", Styles::insert())));
    }

    lines.push(Line::from(""));
    for commit in &repo.recent_commits {
        let (hash, message) = commit.split_once(' ').unwrap_or((commit.as_str(), ""));
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", hash), Styles::dim()),
            Span::raw(truncate(message, width.saturating_sub(hash.len() + 3))),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
