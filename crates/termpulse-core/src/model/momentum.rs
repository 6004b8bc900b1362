//! Composite developer-momentum metrics.

use serde::{Deserialize, Serialize};

/// Bucketed flow score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowLevel {
    Low,
    Steady,
    Flow,
}

impl FlowLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            FlowLevel::Flow
        } else if score >= 40.0 {
            FlowLevel::Steady
        } else {
            FlowLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlowLevel::Low => "low",
            FlowLevel::Steady => "steady",
            FlowLevel::Flow => "flow",
        }
    }
}

/// Momentum derived from a repository snapshot and recent commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    /// Epoch seconds; fixed for the lifetime of the session.
    pub session_start: f64,
    pub session_duration_minutes: f64,
    /// Commits in the trailing hour, not since session start.
    pub commits_this_session: u32,
    pub commit_velocity_per_hour: f64,
    /// Normalized Shannon entropy of the category distribution, in `[0, 1]`.
    pub command_diversity: f64,
    /// Weighted composite in `[0, 100]`.
    pub flow_score: f64,
    /// Minutes of uninterrupted shell activity ending at the latest command.
    pub streak_minutes: f64,
}

impl MomentumSnapshot {
    pub fn flow_level(&self) -> FlowLevel {
        FlowLevel::from_score(self.flow_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let m = MomentumSnapshot::default();
        assert_eq!(m.flow_score, 0.0);
        assert_eq!(m.commit_velocity_per_hour, 0.0);
        assert_eq!(m.flow_level(), FlowLevel::Low);
    }

    #[test]
    fn test_flow_level_boundaries() {
        assert_eq!(FlowLevel::from_score(39.0), FlowLevel::Low);
        assert_eq!(FlowLevel::from_score(40.0), FlowLevel::Steady);
        assert_eq!(FlowLevel::from_score(69.0), FlowLevel::Steady);
        assert_eq!(FlowLevel::from_score(70.0), FlowLevel::Flow);
        assert_eq!(FlowLevel::from_score(100.0), FlowLevel::Flow);
    }
}
