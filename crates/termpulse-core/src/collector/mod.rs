//! Data collectors for the dashboard panels.
//!
//! # Architecture
//!
//! Collectors sit on two seams so every one of them runs against canned data
//! in tests:
//!
//! - [`FileSystem`]: `/proc` and shell-history reads ([`RealFs`], [`MockFs`])
//! - [`CommandRunner`]: VCS invocations with a timeout ([`SystemRunner`], [`MockRunner`])
//!
//! No collector returns an error. A failed read or command leaves the
//! affected fields at their defaults and is logged at debug level.
//!
//! State that must survive between polls lives in explicit context values
//! owned by the caller: [`ResourceContext`] (CPU history, network baseline)
//! and [`Session`] (session start).

pub mod history;
pub mod mock;
pub mod momentum;
pub mod procfs;
pub mod runner;
pub mod traits;
pub mod vcs;

pub use history::HistoryCollector;
pub use mock::{MockFs, MockRunner};
pub use momentum::{MomentumCollector, Session};
pub use procfs::{ResourceCollector, ResourceContext};
pub use runner::{CommandRunner, RunError, SystemRunner};
pub use traits::{FileSystem, RealFs};
pub use vcs::{DiffCollector, RepositoryCollector};

/// Current wall-clock time in epoch seconds.
pub(crate) fn now_epoch() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
