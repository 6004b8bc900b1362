//! Momentum panel: flow score, velocity, diversity, session length and streak.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::{FmtStyle, format_duration};
use crate::model::MomentumSnapshot;
use crate::tui::style::{Styles, flow_color};

use super::bar;

pub fn render_momentum(frame: &mut Frame, area: Rect, momentum: &MomentumSnapshot) {
    let block = Block::default().title(" Momentum ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let level = momentum.flow_level();
    let flow = Style::default().fg(flow_color(level));
    let bar_width = (inner.width as usize).saturating_sub(20).clamp(4, 30);

    let session_secs = (momentum.session_duration_minutes * 60.0) as i64;
    let streak_secs = (momentum.streak_minutes * 60.0) as i64;

    let lines = vec![
        Line::from(vec![
            Span::styled(" flow  ", Styles::label()),
            Span::styled(bar(momentum.flow_score / 100.0, bar_width), flow),
            Span::styled(format!(" {:>3.0} {}", momentum.flow_score, level.label()), flow),
        ]),
        Line::from(vec![
            Span::styled(" diversity ", Styles::label()),
            Span::styled(bar(momentum.command_diversity, bar_width.saturating_sub(4)), Styles::dim()),
            Span::raw(format!(" {:.2}", momentum.command_diversity)),
        ]),
        Line::from(vec![
            Span::styled(" commits/h ", Styles::label()),
            Span::raw(format!(
                "{:.1}  ({} in the last hour)",
                momentum.commit_velocity_per_hour, momentum.commits_this_session
            )),
        ]),
        Line::from(vec![
            Span::styled(" session ", Styles::label()),
            Span::raw(format_duration(session_secs, FmtStyle::Detail)),
            Span::styled("   streak ", Styles::label()),
            Span::raw(format_duration(streak_secs, FmtStyle::Compact)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
