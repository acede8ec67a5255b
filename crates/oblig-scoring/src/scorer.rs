//! Compliance scorer

use crate::{CategoryBreakdown, Grade, RecentActivity, ScoringConfig, Streak, TaskStatistics};
use chrono::{Days, NaiveDate};
use oblig_model::TaskInstance;
use serde::Serialize;

/// Scored view of a task history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceReport {
    /// Reporting date
    pub as_of: NaiveDate,
    /// Earliest due date that counts towards the score; the window ends at `as_of`
    pub window_start: NaiveDate,
    /// Statistics over the scoring window
    pub statistics: TaskStatistics,
    /// Statistics over the full history
    pub lifetime_statistics: TaskStatistics,
    /// On-time rate over the scoring window, in `[0, 100]`
    pub score: f64,
    /// `score` rounded to the nearest integer
    pub display_score: u8,
    /// Grade derived from the unrounded score
    pub grade: Grade,
    /// Human-readable grade descriptor
    pub grade_description: &'static str,
    /// Completion per category over the scoring window
    pub category_breakdown: Vec<CategoryBreakdown>,
    /// Completions and upcoming deadlines around `as_of`
    pub recent_activity: RecentActivity,
    /// Clean-day streaks over the full history
    pub streak: Streak,
}

/// Turns a task history into a [`ComplianceReport`]
#[derive(Debug, Clone, Default)]
pub struct ComplianceScorer {
    config: ScoringConfig,
}

impl ComplianceScorer {
    /// Create new scorer
    #[inline]
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score `tasks` as of `as_of`
    ///
    /// Only tasks due in `[as_of - scoring window, as_of]` count towards statistics,
    /// score, grade and categories. Older and not-yet-due tasks still contribute to
    /// lifetime statistics, streaks and recent activity.
    #[must_use]
    pub fn score(&self, tasks: &[TaskInstance], as_of: NaiveDate) -> ComplianceReport {
        let window_start = as_of
            .checked_sub_days(Days::new(self.config.scoring_window_days.into()))
            .unwrap_or(NaiveDate::MIN);
        let in_window: Vec<&TaskInstance> = tasks
            .iter()
            .filter(|task| (window_start..=as_of).contains(&task.due_date))
            .collect();

        let statistics = TaskStatistics::collect(in_window.iter().copied(), as_of);
        let score = if statistics.is_empty() {
            100.0
        } else {
            statistics.on_time_rate.clamp(0.0, 100.0)
        };
        let grade = Grade::from_score(score);

        let report = ComplianceReport {
            as_of,
            window_start,
            statistics,
            lifetime_statistics: TaskStatistics::collect(tasks, as_of),
            score,
            display_score: round_score(score),
            grade,
            grade_description: grade.description(),
            category_breakdown: CategoryBreakdown::collect(in_window.iter().copied()),
            recent_activity: RecentActivity::collect(tasks, as_of, &self.config),
            streak: Streak::compute(tasks, as_of),
        };

        tracing::debug!(
            "Scored {} of {} tasks as of {}: {} ({})",
            report.statistics.total,
            tasks.len(),
            as_of,
            report.display_score,
            report.grade
        );

        report
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_score(score: f64) -> u8 {
    score.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use oblig_model::Category;
    use oblig_test_utils::{completed_task, date, late_task, on_time_task, pending_task};

    #[test]
    fn empty_history_is_perfect() {
        let report = ComplianceScorer::default().score(&[], date(2025, 6, 1));

        assert_eq!(report.score, 100.0);
        assert_eq!(report.display_score, 100);
        assert_eq!(report.grade, Grade::APlus);
        assert!(report.category_breakdown.is_empty());
        assert_eq!(report.streak, Streak::default());
    }

    #[test]
    fn only_pending_tasks_score_full() {
        let tasks = vec![pending_task(date(2025, 5, 20), Category::Vat)];
        let report = ComplianceScorer::default().score(&tasks, date(2025, 6, 1));

        assert_eq!(report.score, 100.0);
        assert_eq!(report.statistics.pending, 1);
    }

    #[test]
    fn future_tasks_are_not_scored() {
        let as_of = date(2025, 6, 15);
        let mut tasks = vec![on_time_task(date(2025, 6, 1), Category::Vat)];
        tasks.extend((7..=12).map(|month| pending_task(date(2025, month, 25), Category::Vat)));
        // completed early, still not due
        tasks.push(completed_task(date(2025, 9, 1), -90, Category::IncomeTax));

        let report = ComplianceScorer::default().score(&tasks, as_of);

        assert_eq!(report.statistics.total, 1);
        assert_eq!(report.statistics.pending, 0);
        assert_eq!(report.category_breakdown.len(), 1);
        assert_eq!(report.category_breakdown[0].category, Category::Vat);
        assert_eq!(report.category_breakdown[0].total, 1);
        assert_eq!(report.category_breakdown[0].completion_rate, 100.0);
        assert_eq!(report.lifetime_statistics.total, 8);
        assert_eq!(report.lifetime_statistics.pending, 6);
        assert_eq!(report.recent_activity.recent_completions, 2);
    }

    #[test]
    fn due_on_as_of_is_scored() {
        let as_of = date(2025, 6, 15);
        let tasks = vec![
            pending_task(as_of, Category::Vat),
            pending_task(date(2025, 6, 16), Category::Vat),
        ];

        let report = ComplianceScorer::default().score(&tasks, as_of);

        assert_eq!(report.statistics.total, 1);
    }

    #[test]
    fn old_tasks_only_count_in_lifetime() {
        let as_of = date(2025, 6, 1);
        let tasks = vec![
            late_task(date(2023, 1, 1), 10, Category::Vat),
            on_time_task(date(2025, 5, 1), Category::Vat),
        ];

        let report = ComplianceScorer::default().score(&tasks, as_of);

        assert_eq!(report.statistics.total, 1);
        assert_eq!(report.lifetime_statistics.total, 2);
        assert_eq!(report.score, 100.0);
        assert_eq!(report.lifetime_statistics.completed_late, 1);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let as_of = date(2025, 6, 1);
        let scorer = ComplianceScorer::default();
        let boundary = scorer.score(&[late_task(date(2024, 6, 1), 1, Category::Vat)], as_of);
        let outside = scorer.score(&[late_task(date(2024, 5, 31), 1, Category::Vat)], as_of);

        assert_eq!(boundary.window_start, date(2024, 6, 1));
        assert_eq!(boundary.statistics.total, 1);
        assert_eq!(boundary.score, 0.0);
        assert_eq!(outside.statistics.total, 0);
    }

    #[test]
    fn grade_uses_unrounded_score() {
        // 29 of 30 on time: 96.67, displayed as 97 but graded A
        let as_of = date(2025, 6, 1);
        let mut tasks: Vec<_> = (1..=29)
            .map(|day| on_time_task(date(2025, 3, day), Category::Vat))
            .collect();
        tasks.push(late_task(date(2025, 4, 1), 2, Category::Vat));

        let report = ComplianceScorer::default().score(&tasks, as_of);

        assert_eq!(report.display_score, 97);
        assert_eq!(report.grade, Grade::A);
        assert_eq!(report.grade_description, "Very good");
    }

    #[test]
    fn custom_window() {
        let as_of = date(2025, 6, 1);
        let scorer = ComplianceScorer::new(ScoringConfig::default().with_scoring_window(30));
        let tasks = vec![late_task(date(2025, 4, 1), 1, Category::Vat)];

        let report = scorer.score(&tasks, as_of);

        assert_eq!(report.statistics.total, 0);
        assert_eq!(report.score, 100.0);
    }

    #[test]
    fn report_serializes_grade_as_letter() {
        let report = ComplianceScorer::default().score(&[], date(2025, 6, 1));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["grade"], "A+");
        assert_eq!(json["display_score"], 100);
        assert_eq!(json["as_of"], "2025-06-01");
    }
}
