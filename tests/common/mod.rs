#![allow(dead_code)]

use chrono::NaiveDate;

use cashflow_core::ledger::{Ledger, MonthlyOverride, OneOffItem, RecurringItem};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Rent on the 1st, salary on the 28th, a bonus one-off and one override.
pub fn household_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .recurring
        .push(RecurringItem::new("rent", "Rent", -1000.0, 1, "2025-01-01"));
    ledger
        .recurring
        .push(RecurringItem::new("salary", "Salary", 3000.0, 28, "2025-01-28"));
    ledger
        .one_offs
        .push(OneOffItem::new("bonus", "Bonus", 500.0, "2025-02-10"));
    ledger
        .overrides
        .push(MonthlyOverride::new("ov1", "rent", "2025-03-01", -1100.0));
    ledger
}
