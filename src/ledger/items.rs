use serde::{Deserialize, Serialize};

/// Origin of a resolved occurrence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    Recurring,
    OneOff,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Recurring => "recurring",
            EntryKind::OneOff => "one-off",
        }
    }

    pub fn parse(raw: &str) -> Option<EntryKind> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "recurring" => Some(EntryKind::Recurring),
            "one-off" | "oneoff" | "one_off" => Some(EntryKind::OneOff),
            _ => None,
        }
    }
}

/// Monthly item such as rent or salary. Positive amounts are income.
///
/// `day` is authoritative for placement; the store keeps it equal to the
/// day-of-month of `start_date`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub day: u32,
    pub start_date: String,
}

impl RecurringItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        day: u32,
        start_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            day,
            start_date: start_date.into(),
        }
    }
}

/// Single dated item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OneOffItem {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub date: String,
}

impl OneOffItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            date: date.into(),
        }
    }
}

/// Amount replacement for one occurrence of a recurring item.
///
/// `original_date` is the resolved occurrence date, not the item's nominal
/// day. `new_date` is carried for the store but never consulted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyOverride {
    pub id: String,
    pub recurring_item_id: String,
    pub original_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_date: Option<String>,
}

impl MonthlyOverride {
    pub fn new(
        id: impl Into<String>,
        recurring_item_id: impl Into<String>,
        original_date: impl Into<String>,
        new_amount: f64,
    ) -> Self {
        Self {
            id: id.into(),
            recurring_item_id: recurring_item_id.into(),
            original_date: original_date.into(),
            new_amount: Some(new_amount),
            new_date: None,
        }
    }

    pub fn matches(&self, recurring_item_id: &str, original_date: &str) -> bool {
        self.recurring_item_id == recurring_item_id && self.original_date == original_date
    }
}
