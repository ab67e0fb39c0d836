//! Date range validation for time-bounded resources.

use chrono::NaiveDate;
use std::fmt;

use crate::errors::{MisfitError, MisfitResult};

/// Longest span, in days, the API accepts between start and end date.
pub const MAX_RANGE_DAYS: i64 = 30;

/// Wire format of every date the API accepts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Argument name reported for a bad start date.
pub const START_DATE_FIELD: &str = "start_date";

/// Argument name reported for a bad end date.
pub const END_DATE_FIELD: &str = "end_date";

/// A validated, inclusive date range of at most [`MAX_RANGE_DAYS`] days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Parses and validates a `YYYY-MM-DD` start/end pair.
    ///
    /// The start date is checked before the end date, so a pair of bad
    /// dates reports `start_date`.
    pub fn parse(start_date: &str, end_date: &str) -> MisfitResult<Self> {
        let start = parse_date(START_DATE_FIELD, start_date)?;
        let end = parse_date(END_DATE_FIELD, end_date)?;
        Self::new(start, end)
    }

    /// Validates an already-parsed pair of dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> MisfitResult<Self> {
        if end < start {
            return Err(MisfitError::InvalidDateRange {
                reason: "endDate may not precede startDate".to_string(),
            });
        }

        if (end - start).num_days() > MAX_RANGE_DAYS {
            return Err(MisfitError::InvalidDateRange {
                reason: format!("Date range is greater than {} days", MAX_RANGE_DAYS),
            });
        }

        Ok(Self { start, end })
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days between start and end.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Query parameters for the range, in wire format.
    pub fn query_pairs(&self) -> [(String, String); 2] {
        [
            ("start_date".to_string(), self.start.format(DATE_FORMAT).to_string()),
            ("end_date".to_string(), self.end.format(DATE_FORMAT).to_string()),
        ]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// Parses one date strictly: chrono alone would accept unpadded fields.
fn parse_date(field: &str, value: &str) -> MisfitResult<NaiveDate> {
    let invalid = || MisfitError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}
