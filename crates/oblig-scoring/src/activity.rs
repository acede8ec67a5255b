//! Activity around the reporting date

use crate::ScoringConfig;
use chrono::{Days, NaiveDate};
use oblig_model::TaskInstance;
use serde::{Deserialize, Serialize};

/// Recent completions and upcoming deadlines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    /// Completed within the trailing recent window, up to and including `as_of`
    pub recent_completions: usize,
    /// Pending tasks due in `[as_of, as_of + week]`
    pub upcoming_this_week: usize,
    /// Pending tasks due in `[as_of, as_of + month]`
    pub upcoming_this_month: usize,
}

impl RecentActivity {
    /// Count activity around `as_of`
    #[must_use]
    pub fn collect<'a>(
        tasks: impl IntoIterator<Item = &'a TaskInstance>,
        as_of: NaiveDate,
        config: &ScoringConfig,
    ) -> Self {
        let recent_from = as_of
            .checked_sub_days(Days::new(config.recent_window_days.into()))
            .unwrap_or(NaiveDate::MIN);
        let week_end = forward(as_of, config.week_days);
        let month_end = forward(as_of, config.month_days);

        let mut activity = Self::default();
        for task in tasks {
            match task.completed_on() {
                Some(done) => {
                    if done >= recent_from && done <= as_of {
                        activity.recent_completions += 1;
                    }
                }
                None => {
                    if task.due_date >= as_of {
                        if task.due_date <= week_end {
                            activity.upcoming_this_week += 1;
                        }
                        if task.due_date <= month_end {
                            activity.upcoming_this_month += 1;
                        }
                    }
                }
            }
        }
        activity
    }
}

fn forward(from: NaiveDate, days: u32) -> NaiveDate {
    from.checked_add_days(Days::new(days.into()))
        .unwrap_or(NaiveDate::MAX)
}
