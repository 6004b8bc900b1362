//! termpulse-core - collectors and derived metrics for the termpulse dashboard.
//!
//! Provides:
//! - `collector`: repository, resource, shell-history, momentum and diff collectors
//! - `model`: immutable snapshot types produced by the collectors
//! - `config`: refresh cadences and collector knobs
//! - `fmt`: shared formatting helpers (bytes, durations, rates)
//!
//! With `tui` feature (default):
//! - `tui`: terminal dashboard (ratatui/crossterm) consuming the snapshots

pub mod collector;
pub mod config;
pub mod fmt;
pub mod model;

#[cfg(feature = "tui")]
pub mod tui;

pub use config::Config;
