use colored::Colorize;

use crate::core::services::MonthlyOverview;
use crate::ledger::{CycleResult, Ledger};

/// `-$1200.00` / `$500.00`.
pub fn format_amount(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{:.2}", amount.abs())
}

fn colored_amount(amount: f64, symbol: &str) -> String {
    let text = format_amount(amount, symbol);
    if amount < 0.0 {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

pub fn section(title: &str) -> String {
    format!("=== {} ===", title.trim()).bold().to_string()
}

pub fn render_cycle(cycle: &CycleResult, symbol: &str) -> String {
    let mut lines = vec![section(&format!("Cycle {}", cycle.label))];
    if cycle.items.is_empty() {
        lines.push("No items in this cycle.".to_string());
    }
    for item in &cycle.items {
        lines.push(format!(
            "{}  {:<24} {:>14}  [{}] {}",
            item.date,
            item.name,
            colored_amount(item.amount, symbol),
            item.kind.label(),
            item.id.dimmed()
        ));
    }
    lines.push(format!(
        "Balance: {}",
        colored_amount(cycle.end_balance, symbol)
    ));
    lines.join("\n")
}

pub fn render_overview(overview: &MonthlyOverview, symbol: &str) -> String {
    let mut lines = vec![section(&format!("Monthly overview {}", overview.year))];
    for month in &overview.months {
        lines.push(format!(
            "{:<16} income {:>14}  expenses {:>14}  net {:>14}",
            month.month_label,
            colored_amount(month.total_income, symbol),
            colored_amount(month.total_expenses, symbol),
            colored_amount(month.net_balance, symbol)
        ));
    }
    lines.push(format!(
        "Year net: {}",
        colored_amount(overview.net_total(), symbol)
    ));
    lines.join("\n")
}

pub fn render_ledger(ledger: &Ledger, symbol: &str) -> String {
    let mut lines = vec![section("Recurring")];
    for item in &ledger.recurring {
        lines.push(format!(
            "{}  {:<24} {:>14}  day {:>2}, from {}",
            item.id,
            item.name,
            colored_amount(item.amount, symbol),
            item.day,
            item.start_date
        ));
    }
    lines.push(section("One-off"));
    for item in &ledger.one_offs {
        lines.push(format!(
            "{}  {:<24} {:>14}  on {}",
            item.id,
            item.name,
            colored_amount(item.amount, symbol),
            item.date
        ));
    }
    if !ledger.overrides.is_empty() {
        lines.push(section("Overrides"));
        for entry in &ledger.overrides {
            let amount = entry
                .new_amount
                .map(|amount| colored_amount(amount, symbol))
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!(
                "{} on {} -> {}",
                entry.recurring_item_id, entry.original_date, amount
            ));
        }
    }
    lines.join("\n")
}
