//! Terminal dashboard.
//!
//! A four-panel dashboard (repository, system, commands, momentum) plus two
//! drill-down views for the working-tree diff and the commit heatmap.

mod app;
mod event;
mod input;
mod render;
pub mod schedule;
pub mod state;
pub(crate) mod style;
mod widgets;

pub use app::App;
pub use schedule::{Schedule, Task};
pub use state::{AppState, View};
