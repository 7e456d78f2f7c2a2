//! The half-open date window of one ingestion run.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Dates in `[start, end)`.
pub struct Window {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Window {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Window { start, end }
    }

    /// Returns the first day of every month that intersects the window, in order.
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        month_starts(self.start, self.end)
    }

    /// Inclusive lower bound as a timestamp at midnight.
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(chrono::NaiveTime::MIN)
    }

    /// Exclusive upper bound as a timestamp at midnight.
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end.and_time(chrono::NaiveTime::MIN)
    }
}

pub fn month_starts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut months = vec![];
    let mut cursor = first_of_month(start);

    while cursor < end {
        months.push(cursor);
        cursor = match next_month(cursor) {
            Some(next) => next,
            None => break,
        };
    }

    months
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

// -- Tests -------------------------------------------------------------------
