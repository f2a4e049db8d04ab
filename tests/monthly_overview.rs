mod common;

use cashflow_core::core::services::SummaryService;
use cashflow_core::errors::LedgerError;
use cashflow_core::ledger::{aggregate_monthly, parse_year, Ledger, OneOffItem, RecurringItem};
use chrono::Datelike;
use common::{date, household_ledger};

#[test]
fn household_year_breakdown() {
    let months = aggregate_monthly(&household_ledger(), 2025).expect("aggregate");
    assert_eq!(months.len(), 12);

    // January: rent, salary on the 28th
    assert_eq!(months[0].total_income, 3000.0);
    assert_eq!(months[0].total_expenses, -1000.0);
    assert_eq!(months[0].net_balance, 2000.0);

    // February: bonus on top
    assert_eq!(months[1].total_income, 3500.0);
    assert_eq!(months[1].net_balance, 2500.0);

    // March: overridden rent
    assert_eq!(months[2].total_expenses, -1100.0);
    assert_eq!(months[2].net_balance, 1900.0);
}

#[test]
fn months_are_chronological_and_calendar_aligned() {
    let months = aggregate_monthly(&Ledger::new(), 2025).expect("aggregate");
    for (idx, month) in months.iter().enumerate() {
        assert_eq!(month.month_start.month() as usize, idx + 1);
        assert_eq!(month.month_start.day(), 1);
        assert_eq!(month.month_end.month(), month.month_start.month());
        assert_eq!(month.total_income, 0.0);
        assert_eq!(month.total_expenses, 0.0);
    }
    assert_eq!(months[0].month_label, "January 2025");
    assert_eq!(months[11].month_label, "December 2025");
    assert_eq!(months[11].month_end, date(2025, 12, 31));
}

#[test]
fn one_off_only_ledger_nets_to_in_year_sum() {
    let mut ledger = Ledger::new();
    let entries = [
        ("a", 120.5, "2025-01-01"),
        ("b", -40.25, "2025-04-30"),
        ("c", -999.0, "2025-12-31"),
        ("d", 75.0, "2025-07-15"),
        ("outside-before", 1_000.0, "2024-12-31"),
        ("outside-after", -1_000.0, "2026-01-01"),
    ];
    for (id, amount, when) in entries {
        ledger.one_offs.push(OneOffItem::new(id, id, amount, when));
    }

    let months = aggregate_monthly(&ledger, 2025).expect("aggregate");
    let net: f64 = months.iter().map(|m| m.net_balance).sum();
    let expected = 120.5 - 40.25 - 999.0 + 75.0;
    assert!((net - expected).abs() < 1e-9, "net {net} != {expected}");
}

#[test]
fn day_thirty_one_is_skipped_for_thirty_day_months() {
    let mut ledger = Ledger::new();
    ledger
        .recurring
        .push(RecurringItem::new("r", "Savings", -50.0, 31, "2025-01-31"));
    let months = aggregate_monthly(&ledger, 2025).expect("aggregate");
    for short in [2usize, 4, 6, 9, 11] {
        assert_eq!(months[short - 1].total_expenses, 0.0, "month {short}");
    }
    for long in [1usize, 3, 5, 7, 8, 10, 12] {
        assert_eq!(months[long - 1].total_expenses, -50.0, "month {long}");
    }
}

#[test]
fn zero_amounts_count_as_income() {
    let mut ledger = Ledger::new();
    ledger
        .one_offs
        .push(OneOffItem::new("z", "Refund", 0.0, "2025-05-05"));
    let months = aggregate_monthly(&ledger, 2025).expect("aggregate");
    assert_eq!(months[4].total_income, 0.0);
    assert_eq!(months[4].total_expenses, 0.0);
}

#[test]
fn year_input_is_validated() {
    assert!(parse_year("abc").unwrap_err().is_validation());
    assert!(parse_year("2025.0").unwrap_err().is_validation());
    assert!(aggregate_monthly(&Ledger::new(), 99_999)
        .unwrap_err()
        .is_validation());
    let overview = SummaryService::monthly_overview(&household_ledger(), parse_year(" 2025 ").unwrap())
        .expect("overview");
    assert_eq!(overview.year, 2025);
}

#[test]
fn malformed_dates_fail_aggregation_with_item_context() {
    let mut ledger = household_ledger();
    ledger.recurring[1].start_date = "2025/01/28".into();
    match aggregate_monthly(&ledger, 2025) {
        Err(LedgerError::Validation { id, field, .. }) => {
            assert_eq!(id, "salary");
            assert_eq!(field, "startDate");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    // a bad record outside the requested year still fails the call
    let mut ledger = household_ledger();
    ledger
        .one_offs
        .push(OneOffItem::new("typo", "Typo", -5.0, "2031-02-30"));
    match aggregate_monthly(&ledger, 2025) {
        Err(LedgerError::Validation { id, field, .. }) => {
            assert_eq!(id, "typo");
            assert_eq!(field, "date");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn repeated_aggregation_is_identical() {
    let ledger = household_ledger();
    assert_eq!(
        aggregate_monthly(&ledger, 2025).expect("first"),
        aggregate_monthly(&ledger, 2025).expect("second")
    );
}
