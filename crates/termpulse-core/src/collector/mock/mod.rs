//! Mock implementations of the collector seams for testing.

mod filesystem;
mod runner;
mod scenarios;

pub use filesystem::MockFs;
pub use runner::MockRunner;
pub use scenarios::TYPICAL_STAT;
