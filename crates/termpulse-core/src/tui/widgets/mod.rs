//! Panel widgets.

mod commands;
mod diff;
mod header;
mod heatmap;
mod help;
mod momentum;
mod repository;
mod resources;

pub use commands::render_commands;
pub use diff::render_diff;
pub use header::{render_footer, render_header};
pub use heatmap::render_heatmap;
pub use help::render_help;
pub use momentum::render_momentum;
pub use repository::render_repository;
pub use resources::render_resources;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Horizontal bar of `width` cells, `ratio` of them filled.
pub(crate) fn bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let mut out = "█".repeat(filled);
    out.push_str(&"░".repeat(width - filled));
    out
}

/// One glyph per value, scaled against `max`. Keeps the newest `width` values.
pub(crate) fn sparkline(values: &[f64], max: f64, width: usize) -> String {
    let start = values.len().saturating_sub(width);
    values[start..]
        .iter()
        .map(|&v| {
            if max <= 0.0 {
                return SPARK_LEVELS[0];
            }
            let level = (v / max).clamp(0.0, 1.0) * (SPARK_LEVELS.len() - 1) as f64;
            SPARK_LEVELS[level.round() as usize]
        })
        .collect()
}

/// Hot buckets as `■`, cold as `·`.
pub(crate) fn fingerprint_cells(buckets: &[bool]) -> String {
    buckets
        .iter()
        .map(|&hot| if hot { '■' } else { '·' })
        .collect()
}
