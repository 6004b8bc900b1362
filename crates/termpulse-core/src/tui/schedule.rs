//! Per-collector refresh deadlines.
//!
//! Every collector has its own cadence. The event loop asks the schedule
//! which tasks are due on each tick and runs them to completion in order.

use std::time::{Duration, Instant};

use crate::config::Intervals;
use crate::tui::state::View;

/// One periodic collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Resources,
    Repository,
    Commands,
    /// Runs after `Repository` and `Commands` so it sees their latest snapshots.
    Momentum,
    Diff,
    Heatmap,
}

impl Task {
    /// Execution order within one tick.
    pub const ALL: [Task; 6] = [
        Task::Resources,
        Task::Repository,
        Task::Commands,
        Task::Momentum,
        Task::Diff,
        Task::Heatmap,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn interval(self, intervals: &Intervals) -> Duration {
        match self {
            Task::Resources => intervals.resources,
            Task::Repository => intervals.repository,
            Task::Commands => intervals.commands,
            Task::Momentum => intervals.momentum,
            Task::Diff => intervals.diff,
            Task::Heatmap => intervals.heatmap,
        }
    }

    /// Diff and heatmap only run while their view is open.
    fn is_active(self, view: View) -> bool {
        match self {
            Task::Diff => view == View::Diff,
            Task::Heatmap => view == View::Heatmap,
            _ => true,
        }
    }
}

/// Next deadline per task; `None` means due now.
#[derive(Debug, Clone)]
pub struct Schedule {
    intervals: Intervals,
    next: [Option<Instant>; Task::ALL.len()],
}

impl Schedule {
    pub fn new(intervals: Intervals) -> Self {
        Self {
            intervals,
            next: [None; Task::ALL.len()],
        }
    }

    /// Returns the tasks due at `now` for `view`, in execution order, and
    /// moves each one's deadline a full interval past `now`.
    pub fn due(&mut self, now: Instant, view: View) -> Vec<Task> {
        let mut due = Vec::new();
        for task in Task::ALL {
            if !task.is_active(view) {
                continue;
            }
            let slot = &mut self.next[task.index()];
            if slot.is_none_or(|deadline| now >= deadline) {
                *slot = Some(now + task.interval(&self.intervals));
                due.push(task);
            }
        }
        due
    }

    /// Makes every task due on the next call to [`Schedule::due`].
    pub fn reset(&mut self) {
        self.next = [None; Task::ALL.len()];
    }

    /// Makes one task due on the next call to [`Schedule::due`].
    pub fn reset_task(&mut self, task: Task) {
        self.next[task.index()] = None;
    }
}
