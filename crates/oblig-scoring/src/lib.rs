//! Oblig Scoring
//!
//! Scores a user's task history into a single comparable compliance metric.
//!
//! # Core Concepts
//!
//! - [`ComplianceScorer`]: entry point, produces a [`ComplianceReport`]
//! - [`TaskStatistics`]: status counts and on-time rate
//! - [`Grade`]: fixed letter-grade table over the 0–100 score
//! - [`CategoryBreakdown`]: completion per obligation category
//! - [`RecentActivity`]: completions and upcoming deadlines around `as_of`
//! - [`Streak`]: consecutive days without an overdue obligation
//!
//! Scoring is pure and never fails: any history, including an empty one, yields a
//! report.
//!
//! # Example
//!
//! ```rust,ignore
//! use oblig_scoring::ComplianceScorer;
//!
//! let report = ComplianceScorer::default().score(&tasks, today);
//! println!("{} ({})", report.display_score, report.grade);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod activity;
mod breakdown;
mod config;
mod grade;
mod scorer;
mod statistics;
mod streak;

pub use activity::RecentActivity;
pub use breakdown::CategoryBreakdown;
pub use config::ScoringConfig;
pub use grade::Grade;
pub use scorer::{ComplianceReport, ComplianceScorer};
pub use statistics::TaskStatistics;
pub use streak::Streak;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `part / whole * 100`, or `None` when `whole` is zero
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percentage(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}
