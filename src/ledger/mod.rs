//! Ledger snapshot model and the pure cash-flow computations over it.

pub mod cycle;
pub mod dates;
pub mod items;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod monthly;
mod snapshot;
pub mod window;

pub use cycle::{occurrence_in_cycle, resolve_cycle, CycleItem, CycleResult};
pub use dates::{format_date, parse_date, parse_reference_date, parse_year};
pub use items::{EntryKind, MonthlyOverride, OneOffItem, RecurringItem};
pub use ledger::Ledger;
pub use monthly::{aggregate_monthly, occurrence_in_month, MonthlySummary};
pub use window::{cycle_window, month_bounds, DateWindow, CYCLE_START_DAY};
