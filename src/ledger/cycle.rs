use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    snapshot::ParsedLedger,
    window::{cycle_window, place_day, DateWindow},
    EntryKind, Ledger,
};
use crate::errors::Result;

/// One dated occurrence inside a cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CycleItem {
    pub id: String,
    pub date: NaiveDate,
    pub name: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CycleResult {
    pub label: String,
    pub start_date: NaiveDate,
    /// Exclusive.
    pub end_date: NaiveDate,
    pub items: Vec<CycleItem>,
    /// No balance is carried between cycles yet.
    pub start_balance: f64,
    pub end_balance: f64,
}

impl CycleResult {
    pub fn window(&self) -> DateWindow {
        DateWindow::new(self.start_date, self.end_date)
    }

    pub fn balance(&self) -> f64 {
        self.end_balance
    }
}

/// Where a recurring item with the given `day` falls inside `window`.
pub fn occurrence_in_cycle(window: &DateWindow, day: u32) -> NaiveDate {
    let placed = place_day(window.start, day);
    if placed < window.start {
        place_day(window.end, day)
    } else {
        placed
    }
}

/// Projects the ledger onto the billing cycle containing `reference`.
///
/// A recurring item is skipped only when its start date is after the cycle
/// end; an item starting mid-cycle counts for the whole cycle.
pub fn resolve_cycle(ledger: &Ledger, reference: NaiveDate) -> Result<CycleResult> {
    let window = cycle_window(reference)?;
    let parsed = ParsedLedger::parse(ledger)?;
    let mut items = Vec::new();

    for entry in &parsed.recurring {
        if entry.start_date > window.end {
            continue;
        }
        let date = occurrence_in_cycle(&window, entry.item.day);
        items.push(CycleItem {
            id: entry.item.id.clone(),
            date,
            name: entry.item.name.clone(),
            amount: parsed.resolved_amount(entry.item, date),
            kind: EntryKind::Recurring,
        });
    }

    for entry in &parsed.one_offs {
        if window.contains(entry.date) {
            items.push(CycleItem {
                id: entry.item.id.clone(),
                date: entry.date,
                name: entry.item.name.clone(),
                amount: entry.item.amount,
                kind: EntryKind::OneOff,
            });
        }
    }

    // stable: ties keep recurring-then-one-off encounter order
    items.sort_by_key(|item| item.date);
    let start_balance = 0.0;
    let total = items.iter().fold(start_balance, |acc, item| acc + item.amount);

    tracing::debug!(
        start = %window.start,
        end = %window.end,
        items = items.len(),
        "resolved cycle"
    );

    Ok(CycleResult {
        label: window.label(),
        start_date: window.start,
        end_date: window.end,
        items,
        start_balance,
        end_balance: total,
    })
}
