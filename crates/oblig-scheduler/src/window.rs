//! Generation horizon

use crate::error::GenerateError;
use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// Inclusive date window with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Create window, rejecting `start > end`
    ///
    /// # Errors
    /// [`GenerateError::InvalidDateRange`] if the bounds are reversed.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, GenerateError> {
        if start > end {
            return Err(GenerateError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Exactly one year starting at `start`: up to the day before its anniversary
    ///
    /// The anniversary of Feb 29 in a common year is Mar 1, so the window still
    /// covers Feb 28.
    #[must_use]
    pub fn one_year_from(start: NaiveDate) -> Self {
        let anniversary = if (start.month(), start.day()) == (2, 29) {
            NaiveDate::from_ymd_opt(start.year() + 1, 3, 1)
        } else {
            start.checked_add_months(Months::new(12))
        };
        let end = anniversary
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    /// Resolve optional request bounds against `today`
    ///
    /// - neither bound: one year from today
    /// - start only: one year from start
    /// - end only: today through end
    ///
    /// # Errors
    /// [`GenerateError::InvalidDateRange`] if the resolved bounds are reversed.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, GenerateError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            (Some(start), None) => Ok(Self::one_year_from(start)),
            (None, Some(end)) => Self::new(today, end),
            (None, None) => Ok(Self::one_year_from(today)),
        }
    }

    /// First day
    #[inline]
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day
    #[inline]
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls in the window
    #[inline]
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, both bounds included
    #[inline]
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
