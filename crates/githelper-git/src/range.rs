// Copyright (c) 2026 - present Junjie
// SPDX-License-Identifier: MIT

//! Calendar date ranges and their instant windows
//!
//! A [`DateRange`] holds two inclusive calendar dates. Commit selection uses
//! the half-open window `[start of start, start of (end + 1 day))` in the
//! local time zone.

use std::fmt;

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::GitError;

/// Format accepted for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// Half-open instant window in epoch seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// First second included
    pub since: i64,
    /// First second excluded
    pub until: i64,
}

impl Window {
    /// Check whether an epoch timestamp falls inside the window
    #[must_use]
    pub fn contains(&self, seconds: i64) -> bool {
        self.since <= seconds && seconds < self.until
    }
}

impl DateRange {
    /// Create a range, rejecting a start date after the end date
    ///
    /// # Errors
    ///
    /// Returns `GitError::DateRangeInvalid` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, GitError> {
        if start > end {
            return Err(GitError::DateRangeInvalid {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings
    ///
    /// # Errors
    ///
    /// Returns `GitError::DateFormat` for a malformed date and
    /// `GitError::DateRangeInvalid` if the start lies after the end.
    pub fn parse(start: &str, end: &str) -> Result<Self, GitError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// First calendar day of the range
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last calendar day of the range
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Resolve the range into an instant window in the local time zone
    ///
    /// # Errors
    ///
    /// Returns `GitError::DateRangeInvalid` if the day after `end` is not
    /// representable.
    pub fn window(&self) -> Result<Window, GitError> {
        self.window_in(&Local)
    }

    /// Resolve the range into an instant window in the given time zone
    ///
    /// # Errors
    ///
    /// Returns `GitError::DateRangeInvalid` if the day after `end` is not
    /// representable.
    pub fn window_in<Tz: TimeZone>(&self, tz: &Tz) -> Result<Window, GitError> {
        let after_end = self
            .end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| GitError::DateRangeInvalid {
                start: self.start.to_string(),
                end: self.end.to_string(),
            })?;

        Ok(Window {
            since: start_of_day(tz, self.start).timestamp(),
            until: start_of_day(tz, after_end).timestamp(),
        })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Parse a single `YYYY-MM-DD` calendar date
///
/// Exactly four year digits, two month digits and two day digits are
/// required; surrounding whitespace and signs are rejected.
///
/// # Errors
///
/// Returns `GitError::DateFormat` for a malformed or impossible date.
pub fn parse_date(input: &str) -> Result<NaiveDate, GitError> {
    let invalid = |reason: String| GitError::DateFormat {
        input: input.to_string(),
        reason,
    };
    if !has_date_shape(input) {
        return Err(invalid("expected YYYY-MM-DD".to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| invalid(e.to_string()))
}

fn has_date_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// First instant of a calendar day in `tz`
///
/// An ambiguous midnight picks the earlier instant. A midnight skipped by a
/// DST transition moves forward to the first valid local time.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = NaiveDateTime::from(date);
    let mut candidate = midnight;
    // Transitions are at most a few hours; step until a local time exists.
    for _ in 0..(24 * 4) {
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return dt;
        }
        candidate += TimeDelta::minutes(15);
    }
    tz.from_utc_datetime(&midnight)
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn date_strategy() -> impl Strategy<Value = NaiveDate> {
        (0i64..20_000).prop_map(|offset| {
            NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date") + TimeDelta::days(offset)
        })
    }

    proptest! {
        /// Property: a range covers exactly (end - start + 1) days in UTC
        #[test]
        fn prop_window_spans_whole_days(a in date_strategy(), b in date_strategy()) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let range = DateRange::new(start, end).expect("ordered range");
            let window = range.window_in(&Utc).expect("window");
            let days = (end - start).num_days() + 1;
            prop_assert_eq!(window.until - window.since, days * 86_400);
        }

        /// Property: every second of every included day is inside the window
        #[test]
        fn prop_noon_of_end_day_included(a in date_strategy(), b in date_strategy()) {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            let range = DateRange::new(start, end).expect("ordered range");
            let window = range.window_in(&Utc).expect("window");
            let noon = Utc.from_utc_datetime(&end.and_hms_opt(12, 0, 0).expect("noon"));
            prop_assert!(window.contains(noon.timestamp()));
        }

        /// Property: reversed ranges are always rejected
        #[test]
        fn prop_reversed_rejected(a in date_strategy(), b in date_strategy()) {
            prop_assume!(a != b);
            let (start, end) = if a > b { (a, b) } else { (b, a) };
            let rejected = matches!(
                DateRange::new(start, end),
                Err(GitError::DateRangeInvalid { .. })
            );
            prop_assert!(rejected);
        }

        /// Property: formatting then parsing a date is lossless
        #[test]
        fn prop_parse_formatted_date(d in date_strategy()) {
            let text = d.format(DATE_FORMAT).to_string();
            prop_assert_eq!(parse_date(&text).expect("parse"), d);
        }
    }
}
