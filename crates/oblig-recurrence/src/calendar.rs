//! Calendar arithmetic for day-of-month clamping

use chrono::{Months, NaiveDate};

/// Number of days in `month` of `year`
///
/// Returns `None` for an invalid month or a year outside chrono's range.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// Date on `day` of the given month, clamped to the month's last day
#[must_use]
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let last = days_in_month(year, month)?;
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}
