//! Structured recurrence rules
//!
//! Provides [`RecurrenceRule`], the parsed form of a rule string. The string is only
//! the external representation; everything inside the engine works on the parsed value.

use crate::calendar::clamped_date;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// Once per calendar month
    Monthly,
    /// Once per calendar year
    Yearly,
}

impl Frequency {
    /// Wire name (`MONTHLY` / `YEARLY`)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

/// Parsed recurrence rule
///
/// Day values above the length of a month are kept as written and clamped per month
/// during expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecurrenceRule {
    /// `FREQ=MONTHLY;BYMONTHDAY=day`
    Monthly {
        /// Day of month (1..=31)
        day: u32,
    },
    /// `FREQ=YEARLY;BYMONTH=month;BYMONTHDAY=day`
    Yearly {
        /// Month (1..=12)
        month: u32,
        /// Day of month (1..=31)
        day: u32,
    },
}

impl RecurrenceRule {
    /// Rule frequency
    #[inline]
    #[must_use]
    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Monthly { .. } => Frequency::Monthly,
            Self::Yearly { .. } => Frequency::Yearly,
        }
    }

    /// Occurrence falling in the given month, if any
    ///
    /// Monthly rules occur in every month; yearly rules only in their own month.
    #[must_use]
    pub fn occurrence_in(&self, year: i32, month: u32) -> Option<NaiveDate> {
        match *self {
            Self::Monthly { day } => clamped_date(year, month, day),
            Self::Yearly { month: m, day } if m == month => clamped_date(year, month, day),
            Self::Yearly { .. } => None,
        }
    }

    /// Expand into every occurrence in `[start, end]`, ascending and duplicate-free
    ///
    /// An inverted window yields no dates.
    #[must_use]
    pub fn expand(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if start > end {
            return Vec::new();
        }

        let in_window = |date: &NaiveDate| (start..=end).contains(date);

        match *self {
            Self::Monthly { day } => {
                let mut dates = Vec::new();
                let (mut year, mut month) = (start.year(), start.month());
                loop {
                    if let Some(date) = clamped_date(year, month, day).filter(in_window) {
                        dates.push(date);
                    }
                    if (year, month) == (end.year(), end.month()) {
                        break;
                    }
                    (year, month) = next_month(year, month);
                }
                dates
            }
            Self::Yearly { month, day } => (start.year()..=end.year())
                .filter_map(|year| clamped_date(year, month, day))
                .filter(in_window)
                .collect(),
        }
    }

    /// First occurrence on or after `date`
    #[must_use]
    pub fn next_on_or_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            Self::Monthly { day } => {
                let this_month = clamped_date(date.year(), date.month(), day)?;
                if this_month >= date {
                    return Some(this_month);
                }
                let (year, month) = next_month(date.year(), date.month());
                clamped_date(year, month, day)
            }
            Self::Yearly { month, day } => {
                let this_year = clamped_date(date.year(), month, day)?;
                if this_year >= date {
                    return Some(this_year);
                }
                clamped_date(date.year() + 1, month, day)
            }
        }
    }
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

impl Display for RecurrenceRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly { day } => write!(f, "FREQ=MONTHLY;BYMONTHDAY={day}"),
            Self::Yearly { month, day } => {
                write!(f, "FREQ=YEARLY;BYMONTH={month};BYMONTHDAY={day}")
            }
        }
    }
}

impl FromStr for RecurrenceRule {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut freq: Option<String> = None;
        let mut by_month: Option<u32> = None;
        let mut by_month_day: Option<u32> = None;

        for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| RecurrenceError::MalformedPair(pair.to_string()))?;
            let key = key.trim().to_ascii_uppercase();
            let value = value.trim();

            match key.as_str() {
                "FREQ" => set_once(&mut freq, "FREQ", value.to_ascii_uppercase())?,
                "BYMONTH" => set_once(
                    &mut by_month,
                    "BYMONTH",
                    parse_part("BYMONTH", value, 1..=12)?,
                )?,
                "BYMONTHDAY" => set_once(
                    &mut by_month_day,
                    "BYMONTHDAY",
                    parse_part("BYMONTHDAY", value, 1..=31)?,
                )?,
                _ => return Err(RecurrenceError::UnsupportedKey(key)),
            }
        }

        let freq = freq.ok_or(RecurrenceError::MissingKey("FREQ"))?;
        match freq.as_str() {
            "MONTHLY" => {
                if by_month.is_some() {
                    return Err(RecurrenceError::KeyNotAllowed {
                        key: "BYMONTH",
                        freq: Frequency::Monthly.as_str(),
                    });
                }
                let day = by_month_day.ok_or(RecurrenceError::MissingKey("BYMONTHDAY"))?;
                Ok(Self::Monthly { day })
            }
            "YEARLY" => {
                let month = by_month.ok_or(RecurrenceError::MissingKey("BYMONTH"))?;
                let day = by_month_day.ok_or(RecurrenceError::MissingKey("BYMONTHDAY"))?;
                Ok(Self::Yearly { month, day })
            }
            _ => Err(RecurrenceError::UnsupportedFrequency(freq)),
        }
    }
}

fn set_once<T>(slot: &mut Option<T>, key: &'static str, value: T) -> Result<(), RecurrenceError> {
    if slot.is_some() {
        return Err(RecurrenceError::DuplicateKey(key));
    }
    *slot = Some(value);
    Ok(())
}

fn parse_part(
    key: &'static str,
    value: &str,
    range: RangeInclusive<u32>,
) -> Result<u32, RecurrenceError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|n| range.contains(n))
        .ok_or_else(|| RecurrenceError::InvalidValue {
            key,
            value: value.to_string(),
        })
}

impl TryFrom<String> for RecurrenceRule {
    type Error = RecurrenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecurrenceRule> for String {
    fn from(rule: RecurrenceRule) -> Self {
        rule.to_string()
    }
}

/// Rule string outside the supported subset
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurrenceError {
    /// FREQ other than MONTHLY or YEARLY
    #[error("unsupported frequency: {0}")]
    UnsupportedFrequency(String),

    /// Rule part the engine does not implement (INTERVAL, BYDAY, ...)
    #[error("unsupported rule part: {0}")]
    UnsupportedKey(String),

    /// Supported part used with a frequency that does not accept it
    #[error("{key} is not supported with FREQ={freq}")]
    KeyNotAllowed {
        key: &'static str,
        freq: &'static str,
    },

    /// Same part given twice
    #[error("duplicate rule part: {0}")]
    DuplicateKey(&'static str),

    /// Required part absent
    #[error("missing rule part: {0}")]
    MissingKey(&'static str),

    /// Non-numeric or out-of-range value
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    /// Part without `=`
    #[error("malformed rule part: '{0}' (expected KEY=VALUE)")]
    MalformedPair(String),
}
