use serde::{Deserialize, Serialize};

use super::items::{EntryKind, MonthlyOverride, OneOffItem, RecurringItem};

/// Read-only snapshot handed to the engine; mutated only by the store side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    pub recurring: Vec<RecurringItem>,
    #[serde(default)]
    pub one_offs: Vec<OneOffItem>,
    #[serde(default)]
    pub overrides: Vec<MonthlyOverride>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.recurring.is_empty() && self.one_offs.is_empty() && self.overrides.is_empty()
    }

    pub fn recurring_item(&self, id: &str) -> Option<&RecurringItem> {
        self.recurring.iter().find(|item| item.id == id)
    }

    pub fn one_off(&self, id: &str) -> Option<&OneOffItem> {
        self.one_offs.iter().find(|item| item.id == id)
    }

    pub fn kind_of(&self, id: &str) -> Option<EntryKind> {
        if self.recurring_item(id).is_some() {
            Some(EntryKind::Recurring)
        } else if self.one_off(id).is_some() {
            Some(EntryKind::OneOff)
        } else {
            None
        }
    }

    /// Inserts or replaces by `id`, returning whether an item was replaced.
    pub fn upsert_recurring(&mut self, item: RecurringItem) -> bool {
        match self.recurring.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => {
                self.recurring.push(item);
                false
            }
        }
    }

    pub fn upsert_one_off(&mut self, item: OneOffItem) -> bool {
        match self.one_offs.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => {
                *existing = item;
                true
            }
            None => {
                self.one_offs.push(item);
                false
            }
        }
    }

    /// Upserts keyed by `(recurring_item_id, original_date)`. A replaced
    /// override keeps its original id. Returns the id now stored.
    pub fn upsert_override(&mut self, mut entry: MonthlyOverride) -> String {
        let existing = self
            .overrides
            .iter_mut()
            .find(|o| o.matches(&entry.recurring_item_id, &entry.original_date));
        match existing {
            Some(slot) => {
                entry.id = slot.id.clone();
                *slot = entry;
                slot.id.clone()
            }
            None => {
                let id = entry.id.clone();
                self.overrides.push(entry);
                id
            }
        }
    }

    pub fn remove_recurring(&mut self, id: &str) -> Option<RecurringItem> {
        let idx = self.recurring.iter().position(|item| item.id == id)?;
        Some(self.recurring.remove(idx))
    }

    pub fn remove_one_off(&mut self, id: &str) -> Option<OneOffItem> {
        let idx = self.one_offs.iter().position(|item| item.id == id)?;
        Some(self.one_offs.remove(idx))
    }

    pub fn remove_override(&mut self, recurring_item_id: &str, original_date: &str) -> bool {
        let before = self.overrides.len();
        self.overrides
            .retain(|o| !o.matches(recurring_item_id, original_date));
        self.overrides.len() != before
    }
}
