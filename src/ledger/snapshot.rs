//! Validated view over a [`Ledger`] shared by the cycle resolver and the
//! monthly aggregator.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::{dates::parse_date, Ledger, OneOffItem, RecurringItem};
use crate::errors::{LedgerError, Result};

pub(crate) struct DatedRecurring<'a> {
    pub item: &'a RecurringItem,
    pub start_date: NaiveDate,
}

pub(crate) struct DatedOneOff<'a> {
    pub item: &'a OneOffItem,
    pub date: NaiveDate,
}

pub(crate) struct ParsedLedger<'a> {
    pub recurring: Vec<DatedRecurring<'a>>,
    pub one_offs: Vec<DatedOneOff<'a>>,
    /// First override per key; `None` keeps the base amount.
    overrides: HashMap<(&'a str, NaiveDate), Option<f64>>,
}

impl<'a> ParsedLedger<'a> {
    pub fn parse(ledger: &'a Ledger) -> Result<Self> {
        let mut recurring = Vec::with_capacity(ledger.recurring.len());
        for item in &ledger.recurring {
            check_amount(&item.id, item.amount)?;
            let start_date = parse_date(&item.start_date, &item.id, "startDate")?;
            if !(1..=31).contains(&item.day) {
                return Err(LedgerError::validation(
                    &item.id,
                    "day",
                    format!("{} is outside 1..=31", item.day),
                ));
            }
            recurring.push(DatedRecurring { item, start_date });
        }

        let mut one_offs = Vec::with_capacity(ledger.one_offs.len());
        for item in &ledger.one_offs {
            check_amount(&item.id, item.amount)?;
            let date = parse_date(&item.date, &item.id, "date")?;
            one_offs.push(DatedOneOff { item, date });
        }

        let known: HashSet<&str> = ledger.recurring.iter().map(|r| r.id.as_str()).collect();
        let mut overrides = HashMap::new();
        let mut orphaned = 0usize;
        for entry in &ledger.overrides {
            let original = parse_date(&entry.original_date, &entry.id, "originalDate")?;
            if entry.new_amount.is_some_and(|amount| !amount.is_finite()) {
                return Err(LedgerError::validation(
                    &entry.id,
                    "newAmount",
                    "amount must be a finite number",
                ));
            }
            if !known.contains(entry.recurring_item_id.as_str()) {
                orphaned += 1;
                continue;
            }
            overrides
                .entry((entry.recurring_item_id.as_str(), original))
                .or_insert(entry.new_amount);
        }
        if orphaned > 0 {
            tracing::debug!(orphaned, "ignoring overrides for unknown recurring items");
        }

        Ok(Self {
            recurring,
            one_offs,
            overrides,
        })
    }

    /// Override amount for the occurrence of `item` on `date`, else the base amount.
    pub fn resolved_amount(&self, item: &'a RecurringItem, date: NaiveDate) -> f64 {
        self.overrides
            .get(&(item.id.as_str(), date))
            .copied()
            .flatten()
            .unwrap_or(item.amount)
    }
}

fn check_amount(id: &str, amount: f64) -> Result<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(LedgerError::validation(
            id,
            "amount",
            "amount must be a finite number",
        ))
    }
}
