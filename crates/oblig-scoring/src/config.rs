//! Scoring configuration

use serde::{Deserialize, Serialize};

/// Window lengths used by the scorer, in days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Trailing window of due dates that count towards score and grade
    pub scoring_window_days: u32,
    /// Trailing window for recent completions
    pub recent_window_days: u32,
    /// Forward window for "upcoming this week"
    pub week_days: u32,
    /// Forward window for "upcoming this month"
    pub month_days: u32,
}

impl ScoringConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With scoring window length
    #[inline]
    #[must_use]
    pub fn with_scoring_window(mut self, days: u32) -> Self {
        self.scoring_window_days = days;
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            scoring_window_days: 365,
            recent_window_days: 30,
            week_days: 7,
            month_days: 30,
        }
    }
}
