//! Snapshot types produced by the collectors.
//!
//! Every snapshot is a plain value: constructed fresh on each poll, never
//! mutated after it is returned, and free of references to other snapshots.
//! Derived fields (drift level, change ratio, ...) are computed accessors.

mod command;
mod diff;
mod momentum;
mod repository;
mod resource;

pub use command::{CommandCategory, CommandEntry, command_distribution};
pub use diff::{DiffFile, DiffStatus, HeatmapEntry, HunkRange, diff_density, fingerprint};
pub use momentum::{FlowLevel, MomentumSnapshot};
pub use repository::{DriftLevel, RepositorySnapshot};
pub use resource::{CPU_HISTORY_LEN, ResourceSnapshot};

/// Rounds `value` to `places` decimal places.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.26, 1), 1.3);
        assert_eq!(round_to(0.666_666, 2), 0.67);
        assert_eq!(round_to(42.4, 0), 42.0);
    }
}
