//! Momentum combiner: commit velocity, command diversity and flow score.

use std::path::Path;
use std::time::Duration;

use crate::collector::now_epoch;
use crate::collector::runner::CommandRunner;
use crate::collector::vcs::Vcs;
use crate::config::Config;
use crate::model::{CommandEntry, MomentumSnapshot, RepositorySnapshot, command_distribution, round_to};

/// Velocity is measured against at least this many hours.
const MIN_SESSION_HOURS: f64 = 0.1;
/// Commits per hour that saturate the velocity signal.
const FULL_VELOCITY: f64 = 3.0;
/// Drift penalty used when there is no repository to judge.
const NEUTRAL_DRIFT_PENALTY: f64 = 0.5;
/// Commands further apart than this break a streak.
const STREAK_GAP_SECONDS: f64 = 300.0;

const VELOCITY_WEIGHT: f64 = 0.4;
const DIVERSITY_WEIGHT: f64 = 0.3;
const DRIFT_WEIGHT: f64 = 0.3;

/// Start of the dashboard session, fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    /// Epoch seconds.
    pub start: f64,
}

impl Session {
    pub fn start_now() -> Self {
        Self::started_at(now_epoch())
    }

    pub fn started_at(start: f64) -> Self {
        Self { start }
    }
}

/// Derives a [`MomentumSnapshot`] from cached repository and command snapshots.
pub struct MomentumCollector<R: CommandRunner> {
    runner: R,
    binary: String,
    timeout: Duration,
}

impl<R: CommandRunner> MomentumCollector<R> {
    pub fn new(runner: R, config: &Config) -> Self {
        Self {
            runner,
            binary: config.vcs_binary.clone(),
            timeout: config.command_timeout,
        }
    }

    /// Combines `repo` and `commands` into momentum metrics.
    ///
    /// The only live query is the trailing-hour commit count in `cwd`; its
    /// failure leaves the count at 0.
    pub fn collect(
        &self,
        session: &Session,
        cwd: &Path,
        repo: &RepositorySnapshot,
        commands: &[CommandEntry],
    ) -> MomentumSnapshot {
        self.collect_at(session, cwd, repo, commands, now_epoch())
    }

    /// Same as [`MomentumCollector::collect`] with an explicit wall clock.
    pub fn collect_at(
        &self,
        session: &Session,
        cwd: &Path,
        repo: &RepositorySnapshot,
        commands: &[CommandEntry],
        now: f64,
    ) -> MomentumSnapshot {
        let vcs = Vcs::new(&self.runner, &self.binary, cwd, self.timeout);
        let commits = vcs.commits_last_hour();

        let session_duration_minutes = ((now - session.start) / 60.0).max(0.0);
        let hours = (session_duration_minutes / 60.0).max(MIN_SESSION_HOURS);
        let commit_velocity_per_hour = round_to(commits as f64 / hours, 1);
        let command_diversity = command_diversity(commands);

        MomentumSnapshot {
            session_start: session.start,
            session_duration_minutes,
            commits_this_session: commits,
            commit_velocity_per_hour,
            command_diversity,
            flow_score: flow_score(commit_velocity_per_hour, command_diversity, repo),
            streak_minutes: streak_minutes(commands),
        }
    }
}

/// Normalized Shannon entropy of the category distribution, in `[0, 1]`.
///
/// Exactly 0 with fewer than two distinct categories.
pub fn command_diversity(commands: &[CommandEntry]) -> f64 {
    let distribution = command_distribution(commands);
    if distribution.len() < 2 {
        return 0.0;
    }
    let total = commands.len() as f64;
    let entropy: f64 = distribution
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();
    round_to(entropy / (distribution.len() as f64).log2(), 2)
}

/// Weighted blend of velocity, diversity and inverse drift, in `[0, 100]`.
pub fn flow_score(velocity_per_hour: f64, diversity: f64, repo: &RepositorySnapshot) -> f64 {
    let drift_penalty = if repo.is_repository {
        (repo.drift_minutes() / 60.0).clamp(0.0, 1.0)
    } else {
        NEUTRAL_DRIFT_PENALTY
    };
    let velocity_signal = (velocity_per_hour / FULL_VELOCITY).clamp(0.0, 1.0);
    let diversity_signal = diversity.clamp(0.0, 1.0);

    let blend = VELOCITY_WEIGHT * velocity_signal
        + DIVERSITY_WEIGHT * diversity_signal
        + DRIFT_WEIGHT * (1.0 - drift_penalty);
    (100.0 * blend).round()
}

/// Minutes spanned by the run of timestamped commands ending at the latest one.
pub fn streak_minutes(commands: &[CommandEntry]) -> f64 {
    let mut timestamps = commands.iter().rev().filter_map(|c| c.timestamp);
    let Some(last) = timestamps.next() else {
        return 0.0;
    };

    let mut earliest = last;
    for ts in timestamps {
        if earliest - ts >= STREAK_GAP_SECONDS {
            break;
        }
        earliest = earliest.min(ts);
    }
    round_to((last - earliest) / 60.0, 1)
}
