//! System vitals panel: CPU sparkline, memory and disk bars, network, load.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::{FmtStyle, format_bytes_rate, format_gb_pair};
use crate::model::{CPU_HISTORY_LEN, ResourceSnapshot};
use crate::tui::style::{Styles, Theme};

use super::{bar, sparkline};

pub fn render_resources(frame: &mut Frame, area: Rect, res: &ResourceSnapshot) {
    let block = Block::default().title(" System ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // " CPU " label plus a 7-char figure on either side of the graph.
    let graph_width = (inner.width as usize).saturating_sub(14).clamp(4, CPU_HISTORY_LEN);
    let bar_width = (inner.width as usize).saturating_sub(24).clamp(4, 30);

    let lines = vec![
        Line::from(vec![
            Span::styled(" CPU  ", Styles::label()),
            Span::styled(
                sparkline(&res.cpu_history, 100.0, graph_width),
                Style::default().fg(Theme::CPU_COLOR),
            ),
            Span::styled(format!(" {:>5.1}%", res.cpu_percent), Styles::percent(res.cpu_percent)),
        ]),
        Line::from(vec![
            Span::styled(" MEM  ", Styles::label()),
            Span::styled(
                bar(res.memory_percent / 100.0, bar_width),
                Style::default().fg(Theme::MEM_COLOR),
            ),
            Span::styled(format!(" {:>5.1}%", res.memory_percent), Styles::percent(res.memory_percent)),
            Span::styled(
                format!(" {}", format_gb_pair(res.memory_used_gb, res.memory_total_gb)),
                Styles::dim(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" DISK ", Styles::label()),
            Span::styled(
                bar(res.disk_percent / 100.0, bar_width),
                Style::default().fg(Theme::DISK_COLOR),
            ),
            Span::styled(format!(" {:>5.1}%", res.disk_percent), Styles::percent(res.disk_percent)),
            Span::styled(
                format!(" {}", format_gb_pair(res.disk_used_gb, res.disk_total_gb)),
                Styles::dim(),
            ),
        ]),
        Line::from(vec![
            Span::styled(" NET  ", Styles::label()),
            Span::styled(
                format!(
                    "↑ {}  ↓ {}",
                    format_bytes_rate(res.net_sent_bytes_per_sec as f64, FmtStyle::Compact),
                    format_bytes_rate(res.net_recv_bytes_per_sec as f64, FmtStyle::Compact),
                ),
                Style::default().fg(Theme::NET_COLOR),
            ),
        ]),
        Line::from(vec![
            Span::styled(" LOAD ", Styles::label()),
            Span::raw(format!("{:.2}", res.load_average_1m)),
            Span::styled("   PROCS ", Styles::label()),
            Span::raw(res.process_count.to_string()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
