//! Status counts

use crate::percentage;
use chrono::NaiveDate;
use oblig_model::TaskInstance;
use serde::{Deserialize, Serialize};

/// Counts by status over a set of tasks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskStatistics {
    /// All tasks
    pub total: usize,
    /// Tasks with a completion timestamp
    pub completed: usize,
    /// Tasks without a completion timestamp
    pub pending: usize,
    /// Pending tasks due before `as_of`
    pub overdue: usize,
    /// Completed on or before the due date
    pub completed_on_time: usize,
    /// Completed after the due date
    pub completed_late: usize,
    /// `completed_on_time / completed * 100`; 100 when nothing is completed
    pub on_time_rate: f64,
}

impl TaskStatistics {
    /// Count `tasks` as of `as_of`
    #[must_use]
    pub fn collect<'a>(
        tasks: impl IntoIterator<Item = &'a TaskInstance>,
        as_of: NaiveDate,
    ) -> Self {
        let mut stats = Self::default();

        for task in tasks {
            stats.total += 1;
            match task.completed_on_time() {
                Some(true) => {
                    stats.completed += 1;
                    stats.completed_on_time += 1;
                }
                Some(false) => {
                    stats.completed += 1;
                    stats.completed_late += 1;
                }
                None => {
                    stats.pending += 1;
                    if task.is_overdue(as_of) {
                        stats.overdue += 1;
                    }
                }
            }
        }

        stats.on_time_rate = percentage(stats.completed_on_time, stats.completed).unwrap_or(100.0);
        stats
    }

    /// Whether no tasks were counted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Default for TaskStatistics {
    fn default() -> Self {
        Self {
            total: 0,
            completed: 0,
            pending: 0,
            overdue: 0,
            completed_on_time: 0,
            completed_late: 0,
            on_time_rate: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblig_model::Category;
    use oblig_test_utils::{date, late_task, on_time_task, pending_task};

    #[test]
    fn empty_history() {
        let stats = TaskStatistics::collect(std::iter::empty(), date(2025, 1, 1));
        assert!(stats.is_empty());
        assert_eq!(stats.on_time_rate, 100.0);
    }

    #[test]
    fn counts_by_status() {
        let as_of = date(2025, 6, 15);
        let tasks = vec![
            on_time_task(date(2025, 6, 1), Category::Vat),
            late_task(date(2025, 6, 2), 3, Category::Vat),
            pending_task(date(2025, 6, 10), Category::Vat),
            pending_task(date(2025, 6, 15), Category::Vat),
            pending_task(date(2025, 7, 1), Category::Vat),
        ];

        let stats = TaskStatistics::collect(&tasks, as_of);

        assert_eq!(stats.total, 5);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.pending, 3);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.completed_on_time, 1);
        assert_eq!(stats.completed_late, 1);
        assert!((stats.on_time_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn pending_only_has_full_on_time_rate() {
        let tasks = vec![pending_task(date(2025, 1, 1), Category::Other)];
        let stats = TaskStatistics::collect(&tasks, date(2025, 3, 1));
        assert_eq!(stats.on_time_rate, 100.0);
        assert_eq!(stats.overdue, 1);
    }
}
