use chrono::NaiveDate;

use crate::errors::{LedgerError, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

/// Strict `YYYY-MM-DD` parse; errors carry the owning item id and field.
pub fn parse_date(raw: &str, id: &str, field: &'static str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.len() != 10 {
        return Err(LedgerError::validation(
            id,
            field,
            format!("`{raw}` is not a YYYY-MM-DD date"),
        ));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|err| {
        LedgerError::validation(id, field, format!("`{raw}` is not a valid date: {err}"))
    })
}

pub fn parse_reference_date(raw: &str) -> Result<NaiveDate> {
    parse_date(raw, "request", "referenceDate")
}

pub fn parse_year(raw: &str) -> Result<i32> {
    let year: i32 = raw.trim().parse().map_err(|_| {
        LedgerError::validation("request", "year", format!("`{raw}` is not an integer year"))
    })?;
    check_year(year)?;
    Ok(year)
}

pub fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(LedgerError::validation(
            "request",
            "year",
            format!("{year} is outside {MIN_YEAR}..={MAX_YEAR}"),
        ))
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
