use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{
    dates::check_year,
    snapshot::ParsedLedger,
    window::{month_bounds, place_day},
    Ledger,
};
use crate::errors::{LedgerError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    /// "February 2026".
    pub month_label: String,
    pub month_start: NaiveDate,
    /// Inclusive.
    pub month_end: NaiveDate,
    pub total_income: f64,
    /// Negative running total.
    pub total_expenses: f64,
    pub net_balance: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    income: f64,
    expenses: f64,
}

impl Totals {
    fn add(&mut self, amount: f64) {
        if amount >= 0.0 {
            self.income += amount;
        } else {
            self.expenses += amount;
        }
    }
}

/// Occurrence of `day` in the month starting at `month_start`, or `None`
/// when the day would roll into the next month.
pub fn occurrence_in_month(month_start: NaiveDate, day: u32) -> Option<NaiveDate> {
    let placed = place_day(month_start, day);
    (placed.month() == month_start.month()).then_some(placed)
}

/// Calendar-month income, expenses and net for every month of `year`.
///
/// Independent of the 20th-to-20th cycle: months are `[1st, last]` inclusive.
/// Recurring items whose day does not exist in a month are skipped, not
/// clamped.
pub fn aggregate_monthly(ledger: &Ledger, year: i32) -> Result<Vec<MonthlySummary>> {
    check_year(year)?;
    let parsed = ParsedLedger::parse(ledger)?;
    let mut summaries = Vec::with_capacity(12);

    for month in 1..=12u32 {
        let (month_start, month_end) = month_bounds(year, month).ok_or_else(|| {
            LedgerError::validation("request", "year", format!("no month {month} in {year}"))
        })?;
        let mut totals = Totals::default();

        for entry in &parsed.recurring {
            if entry.start_date > month_end {
                continue;
            }
            if let Some(date) = occurrence_in_month(month_start, entry.item.day) {
                totals.add(parsed.resolved_amount(entry.item, date));
            }
        }

        for entry in &parsed.one_offs {
            if entry.date >= month_start && entry.date <= month_end {
                totals.add(entry.item.amount);
            }
        }

        summaries.push(MonthlySummary {
            month_label: month_start.format("%B %Y").to_string(),
            month_start,
            month_end,
            total_income: totals.income,
            total_expenses: totals.expenses,
            net_balance: totals.income + totals.expenses,
        });
    }

    tracing::debug!(year, months = summaries.len(), "aggregated monthly summaries");
    Ok(summaries)
}
