//! Validated edits applied by the store side before a snapshot is saved.

use chrono::Datelike;
use uuid::Uuid;

use crate::errors::{LedgerError, Result};
use crate::ledger::{
    format_date, parse_date, EntryKind, Ledger, MonthlyOverride, OneOffItem, RecurringItem,
};

/// User-supplied fields for a new or edited item. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDraft {
    Recurring {
        name: String,
        amount: f64,
        start_date: String,
    },
    OneOff {
        name: String,
        amount: f64,
        date: String,
    },
}

impl EntryDraft {
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryDraft::Recurring { .. } => EntryKind::Recurring,
            EntryDraft::OneOff { .. } => EntryKind::OneOff,
        }
    }
}

enum Entry {
    Recurring(RecurringItem),
    OneOff(OneOffItem),
}

pub struct EntryService;

impl EntryService {
    /// Adds a new item under a fresh id and returns that id.
    pub fn add(ledger: &mut Ledger, draft: EntryDraft) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        match build_entry(&id, draft)? {
            Entry::Recurring(item) => {
                ledger.upsert_recurring(item);
            }
            Entry::OneOff(item) => {
                ledger.upsert_one_off(item);
            }
        }
        tracing::info!(%id, "added ledger item");
        Ok(id)
    }

    /// Replaces the item with `id`. When the draft's kind differs from the
    /// stored one the item moves collections and keeps its id.
    pub fn update(ledger: &mut Ledger, id: &str, draft: EntryDraft) -> Result<()> {
        let current = ledger
            .kind_of(id)
            .ok_or_else(|| LedgerError::NotFound(format!("item `{id}`")))?;
        let entry = build_entry(id, draft)?;
        match current {
            EntryKind::Recurring if !matches!(entry, Entry::Recurring(_)) => {
                ledger.remove_recurring(id);
            }
            EntryKind::OneOff if !matches!(entry, Entry::OneOff(_)) => {
                ledger.remove_one_off(id);
            }
            _ => {}
        }
        match entry {
            Entry::Recurring(item) => {
                ledger.upsert_recurring(item);
            }
            Entry::OneOff(item) => {
                ledger.upsert_one_off(item);
            }
        }
        tracing::info!(%id, from = current.label(), "updated ledger item");
        Ok(())
    }

    /// Removes an item. Overrides pointing at a removed recurring item stay
    /// in the ledger and are ignored by the engine.
    pub fn delete(ledger: &mut Ledger, kind: EntryKind, id: &str) -> Result<()> {
        let removed = match kind {
            EntryKind::Recurring => ledger.remove_recurring(id).is_some(),
            EntryKind::OneOff => ledger.remove_one_off(id).is_some(),
        };
        if !removed {
            return Err(LedgerError::NotFound(format!("{} item `{id}`", kind.label())));
        }
        tracing::info!(%id, kind = kind.label(), "deleted ledger item");
        Ok(())
    }

    /// Sets the amount of one occurrence, replacing any override already
    /// keyed by `(recurring_item_id, original_date)`. Returns the override id.
    pub fn upsert_override(
        ledger: &mut Ledger,
        recurring_item_id: &str,
        original_date: &str,
        new_amount: f64,
    ) -> Result<String> {
        if ledger.recurring_item(recurring_item_id).is_none() {
            return Err(LedgerError::NotFound(format!(
                "recurring item `{recurring_item_id}`"
            )));
        }
        let date = parse_date(original_date, recurring_item_id, "originalDate")?;
        check_amount(recurring_item_id, new_amount)?;
        let entry = MonthlyOverride::new(
            Uuid::new_v4().to_string(),
            recurring_item_id,
            format_date(date),
            new_amount,
        );
        let id = ledger.upsert_override(entry);
        tracing::info!(%id, recurring_item_id, original_date, "stored override");
        Ok(id)
    }

    pub fn remove_override(
        ledger: &mut Ledger,
        recurring_item_id: &str,
        original_date: &str,
    ) -> Result<bool> {
        let date = parse_date(original_date, recurring_item_id, "originalDate")?;
        Ok(ledger.remove_override(recurring_item_id, &format_date(date)))
    }
}

fn build_entry(id: &str, draft: EntryDraft) -> Result<Entry> {
    match draft {
        EntryDraft::Recurring {
            name,
            amount,
            start_date,
        } => {
            let name = check_name(id, name)?;
            check_amount(id, amount)?;
            let start = parse_date(&start_date, id, "startDate")?;
            Ok(Entry::Recurring(RecurringItem {
                id: id.to_string(),
                name,
                amount,
                day: start.day(),
                start_date: format_date(start),
            }))
        }
        EntryDraft::OneOff { name, amount, date } => {
            let name = check_name(id, name)?;
            check_amount(id, amount)?;
            let date = parse_date(&date, id, "date")?;
            Ok(Entry::OneOff(OneOffItem {
                id: id.to_string(),
                name,
                amount,
                date: format_date(date),
            }))
        }
    }
}

fn check_name(id: &str, name: String) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::validation(id, "name", "name must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn check_amount(id: &str, amount: f64) -> Result<()> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(LedgerError::validation(id, "amount", "amount must be a finite number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rent() -> EntryDraft {
        EntryDraft::Recurring {
            name: "Rent".into(),
            amount: -1200.0,
            start_date: "2025-01-05".into(),
        }
    }

    #[test]
    fn add_derives_day_from_start_date() {
        let mut ledger = Ledger::new();
        let id = EntryService::add(&mut ledger, rent()).expect("add");
        let item = ledger.recurring_item(&id).expect("stored");
        assert_eq!(item.day, 5);
        assert_eq!(item.start_date, "2025-01-05");
    }

    #[test]
    fn add_rejects_blank_name_and_bad_date() {
        let mut ledger = Ledger::new();
        let blank = EntryDraft::OneOff {
            name: "  ".into(),
            amount: 1.0,
            date: "2025-01-05".into(),
        };
        assert!(EntryService::add(&mut ledger, blank).unwrap_err().is_validation());

        let bad_date = EntryDraft::OneOff {
            name: "Gift".into(),
            amount: 1.0,
            date: "05/01/2025".into(),
        };
        assert!(EntryService::add(&mut ledger, bad_date).unwrap_err().is_validation());
        assert!(ledger.is_empty());
    }

    #[test]
    fn update_moves_item_between_collections() {
        let mut ledger = Ledger::new();
        let id = EntryService::add(&mut ledger, rent()).expect("add");
        let draft = EntryDraft::OneOff {
            name: "Deposit".into(),
            amount: -2400.0,
            date: "2025-01-03".into(),
        };
        EntryService::update(&mut ledger, &id, draft).expect("update");
        assert!(ledger.recurring.is_empty());
        assert_eq!(ledger.one_off(&id).map(|o| o.amount), Some(-2400.0));
        assert_eq!(ledger.kind_of(&id), Some(EntryKind::OneOff));
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut ledger = Ledger::new();
        let err = EntryService::update(&mut ledger, "nope", rent()).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[test]
    fn delete_checks_kind() {
        let mut ledger = Ledger::new();
        let id = EntryService::add(&mut ledger, rent()).expect("add");
        assert!(EntryService::delete(&mut ledger, EntryKind::OneOff, &id).is_err());
        EntryService::delete(&mut ledger, EntryKind::Recurring, &id).expect("delete");
        assert!(ledger.recurring.is_empty());
    }

    #[test]
    fn override_requires_existing_item_and_replaces() {
        let mut ledger = Ledger::new();
        let err = EntryService::upsert_override(&mut ledger, "ghost", "2025-03-05", 1.0)
            .unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(_)));

        let id = EntryService::add(&mut ledger, rent()).expect("add");
        let first =
            EntryService::upsert_override(&mut ledger, &id, "2025-03-05", -1000.0).expect("set");
        let second =
            EntryService::upsert_override(&mut ledger, &id, "2025-03-05", -900.0).expect("reset");
        assert_eq!(first, second);
        assert_eq!(ledger.overrides.len(), 1);
        assert_eq!(ledger.overrides[0].new_amount, Some(-900.0));

        assert!(EntryService::remove_override(&mut ledger, &id, "2025-03-05").expect("remove"));
        assert!(ledger.overrides.is_empty());
    }
}
