use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::ledger::{
    aggregate_monthly, parse_reference_date, parse_year, resolve_cycle, CycleResult, Ledger,
    MonthlySummary,
};
use crate::utils::Clock;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyOverview {
    pub year: i32,
    pub months: Vec<MonthlySummary>,
}

impl MonthlyOverview {
    pub fn net_total(&self) -> f64 {
        self.months.iter().fold(0.0, |acc, m| acc + m.net_balance)
    }
}

/// Entry points used by transports; wraps the pure engine with parsing and logging.
pub struct SummaryService;

impl SummaryService {
    pub fn cycle_for(ledger: &Ledger, reference: NaiveDate) -> Result<CycleResult> {
        let cycle = resolve_cycle(ledger, reference)?;
        tracing::info!(
            label = %cycle.label,
            items = cycle.items.len(),
            balance = cycle.end_balance,
            "cycle resolved"
        );
        Ok(cycle)
    }

    /// `raw` of `None` means today.
    pub fn cycle_for_input(
        ledger: &Ledger,
        raw: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<CycleResult> {
        let reference = match raw {
            Some(raw) => parse_reference_date(raw)?,
            None => clock.today(),
        };
        Self::cycle_for(ledger, reference)
    }

    pub fn monthly_overview(ledger: &Ledger, year: i32) -> Result<MonthlyOverview> {
        let months = aggregate_monthly(ledger, year)?;
        let overview = MonthlyOverview { year, months };
        tracing::info!(year, net = overview.net_total(), "monthly overview computed");
        Ok(overview)
    }

    /// `raw` of `None` means the current year.
    pub fn monthly_overview_for_input(
        ledger: &Ledger,
        raw: Option<&str>,
        clock: &dyn Clock,
    ) -> Result<MonthlyOverview> {
        let year = match raw {
            Some(raw) => parse_year(raw)?,
            None => clock.today().year(),
        };
        Self::monthly_overview(ledger, year)
    }
}
