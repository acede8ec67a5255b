//! Oblig Recurrence
//!
//! Expands recurrence rules into concrete due dates.
//!
//! Only a strict subset of RFC 5545 is supported:
//!
//! - `FREQ=MONTHLY;BYMONTHDAY=<1..31>`
//! - `FREQ=YEARLY;BYMONTH=<1..12>;BYMONTHDAY=<1..31>`
//!
//! Pairs are `;`-separated, order-independent and case-insensitive. A day that does
//! not exist in a month (31st of April, 29th of February in a common year) is clamped
//! to the month's last day. The month is never skipped.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use oblig_recurrence::expand;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
//! let dates = expand("FREQ=MONTHLY;BYMONTHDAY=31", start, end).unwrap();
//!
//! assert_eq!(dates[1], NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod calendar;
mod rule;

pub use calendar::{clamped_date, days_in_month};
pub use rule::{Frequency, RecurrenceError, RecurrenceRule};

use chrono::NaiveDate;

/// Parse `rule` and expand it over `[start, end]`, both bounds inclusive
///
/// # Errors
/// Returns [`RecurrenceError`] if the rule is outside the supported subset.
pub fn expand(
    rule: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<NaiveDate>, RecurrenceError> {
    let rule: RecurrenceRule = rule.parse()?;
    Ok(rule.expand(start, end))
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
