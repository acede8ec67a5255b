//! Compliance streaks
//!
//! A day is clean when no task is overdue on it: nothing due strictly before that day
//! is still uncompleted at that day. A task due `d` and completed on `c` (or still
//! pending at `as_of`) makes the days `d+1 ..= c-1` (or `d+1 ..= as_of`) dirty. The
//! streaks are the runs of clean days between the earliest due date and `as_of`.

use chrono::NaiveDate;
use oblig_model::TaskInstance;
use serde::{Deserialize, Serialize};

/// Current and longest run of clean days
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Clean days ending at `as_of`; zero when something is overdue at `as_of`
    pub current: u32,
    /// Longest run of clean days in the history
    pub longest: u32,
}

impl Streak {
    /// Compute streaks over the full task history
    #[must_use]
    pub fn compute(tasks: &[TaskInstance], as_of: NaiveDate) -> Self {
        let Some(history_start) = tasks.iter().map(|t| t.due_date).min() else {
            return Self::default();
        };
        if history_start > as_of {
            return Self::default();
        }

        let mut dirty: Vec<(NaiveDate, NaiveDate)> = tasks
            .iter()
            .filter_map(|task| dirty_interval(task, as_of))
            .collect();
        dirty.sort_unstable();

        let mut longest = 0;
        let mut cursor = Some(history_start);
        for (start, end) in merge(dirty) {
            let Some(clean_from) = cursor else { break };
            if start > clean_from {
                longest = longest.max(span(clean_from, start.pred_opt().unwrap_or(start)));
            }
            cursor = cursor.max(Some(end)).and_then(|d| d.succ_opt());
        }

        let current = match cursor {
            Some(clean_from) if clean_from <= as_of => span(clean_from, as_of),
            _ => 0,
        };

        Self {
            current,
            longest: longest.max(current),
        }
    }
}

/// Days on which `task` is overdue, clipped to `as_of`
fn dirty_interval(task: &TaskInstance, as_of: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = task.due_date.succ_opt()?;
    let end = match task.completed_on() {
        Some(done) => done.pred_opt()?.min(as_of),
        None => as_of,
    };
    (start <= end).then_some((start, end))
}

/// Merge sorted intervals that overlap or touch
fn merge(sorted: Vec<(NaiveDate, NaiveDate)>) -> Vec<(NaiveDate, NaiveDate)> {
    let mut merged: Vec<(NaiveDate, NaiveDate)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match merged.last_mut() {
            Some(last) if last.1.succ_opt().map_or(true, |next| start <= next) => {
                last.1 = last.1.max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Inclusive day count of `[from, to]`
fn span(from: NaiveDate, to: NaiveDate) -> u32 {
    u32::try_from((to - from).num_days() + 1).unwrap_or(0)
}
