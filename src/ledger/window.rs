use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dates::{MAX_YEAR, MIN_YEAR};
use crate::errors::{LedgerError, Result};

/// Day of month on which every billing cycle opens.
pub const CYCLE_START_DAY: u32 = 20;

/// Half-open date interval `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start < end, "window end must be after start");
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Last date inside the window.
    pub fn last_day(&self) -> NaiveDate {
        self.end - Duration::days(1)
    }

    /// "Jan 20th - Feb 19th".
    pub fn label(&self) -> String {
        let last = self.last_day();
        format!(
            "{} {} - {} {}",
            self.start.format("%b"),
            ordinal(self.start.day()),
            last.format("%b"),
            ordinal(last.day())
        )
    }
}

/// Billing cycle containing `reference`: from the 20th of one month up to the
/// 20th of the next. A reference on the 20th opens a new cycle.
///
/// References outside the supported year range are a `Validation` error.
pub fn cycle_window(reference: NaiveDate) -> Result<DateWindow> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&reference.year()) {
        return Err(LedgerError::validation(
            "request",
            "referenceDate",
            format!("{reference} is outside years {MIN_YEAR}..={MAX_YEAR}"),
        ));
    }
    let anchor = if reference.day() < CYCLE_START_DAY {
        shift_month(first_of_month(reference), -1)
    } else {
        Some(first_of_month(reference))
    };
    let start = anchor.and_then(|anchor| anchor.with_day(CYCLE_START_DAY));
    let end = start.and_then(|start| shift_month(start, 1));
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateWindow::new(start, end)),
        _ => Err(LedgerError::validation(
            "request",
            "referenceDate",
            format!("no billing cycle around {reference}"),
        )),
    }
}

/// Calendar month as an inclusive `(first, last)` pair.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.with_day(days_in_month(year, month))?;
    Some((first, last))
}

/// Places `day` onto the month of `month_start`, overflowing into the
/// following month when `day` exceeds its length (day 30 of February becomes
/// early March).
pub fn place_day(month_start: NaiveDate, day: u32) -> NaiveDate {
    first_of_month(month_start) + Duration::days(i64::from(day.max(1)) - 1)
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day()) - 1)
}

/// Calendar-correct month shift; the day is clamped to the target month.
/// `None` when the target lies outside the representable calendar.
pub fn shift_month(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = date.year() * 12 + date.month0() as i32 + months;
    let year = index.div_euclid(12);
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}

/// English ordinal: 1st, 2nd, 3rd, 4th, 11th, 22nd...
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
