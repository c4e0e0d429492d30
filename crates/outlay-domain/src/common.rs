//! Date windows and calendar helpers.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// A calendar-date range, inclusive at both ends.
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end < start {
            return Err(DateWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_containing(date: NaiveDate) -> Self {
        let start = first_of_month(date);
        let end = start + Duration::days(days_in_month(date.year(), date.month()) as i64 - 1);
        Self { start, end }
    }

    /// `days` consecutive days ending at `anchor`. Zero is treated as one.
    pub fn trailing_days(anchor: NaiveDate, days: u32) -> Self {
        let span = days.max(1) as i64 - 1;
        Self {
            start: anchor - Duration::days(span),
            end: anchor,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered, bounds included.
    pub fn len_days(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len_days() as i64).map(move |offset| start + Duration::days(offset))
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateWindow`] values.
pub enum DateWindowError {
    InvalidRange,
}

impl fmt::Display for DateWindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateWindowError::InvalidRange => f.write_str("date window end must not precede start"),
        }
    }
}

impl std::error::Error for DateWindowError {}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match NaiveDate::from_ymd_opt(next_year, next_month, 1) {
        Some(first_next) => (first_next - Duration::days(1)).day(),
        None => 28,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        assert!(window.contains(date(2024, 3, 1)));
        assert!(window.contains(date(2024, 3, 31)));
        assert!(!window.contains(date(2024, 4, 1)));
        assert!(!window.contains(date(2024, 2, 29)));
    }

    #[test]
    fn reversed_window_is_rejected() {
        let err = DateWindow::new(date(2024, 3, 2), date(2024, 3, 1)).unwrap_err();
        assert_eq!(err, DateWindowError::InvalidRange);
        assert!(DateWindow::new(date(2024, 3, 1), date(2024, 3, 1)).is_ok());
    }

    #[test]
    fn month_window_handles_leap_february() {
        let window = DateWindow::month_containing(date(2024, 2, 17));
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert_eq!(window.len_days(), 29);

        let december = DateWindow::month_containing(date(2023, 12, 31));
        assert_eq!(december.end, date(2023, 12, 31));
    }

    #[test]
    fn trailing_days_end_at_anchor() {
        let window = DateWindow::trailing_days(date(2024, 3, 3), 7);
        assert_eq!(window.start, date(2024, 2, 26));
        assert_eq!(window.end, date(2024, 3, 3));
        assert_eq!(window.days().count(), 7);
    }
}
