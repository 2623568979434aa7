use chrono::{DateTime, Datelike, NaiveDate};
use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use tracing::debug;

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Formats an amount for display using the dossier's currency code.
/// Unknown codes fall back to EUR rather than failing a render.
pub fn format_currency(value: Decimal, currency_code: &str) -> String {
    let currency = iso::find(currency_code).unwrap_or_else(|| {
        debug!(code = currency_code, "unknown currency code, using EUR");
        iso::EUR
    });
    Money::from_decimal(value, currency).to_string()
}

/// Formats a stored `YYYY-MM-DD` date as a long French date
/// ("05 avril 2024"). Empty or unparsable input renders "-".
pub fn format_date_fr(value: &str) -> String {
    match parse_date(value) {
        Some(date) => format!(
            "{:02} {} {}",
            date.day(),
            MONTHS_FR[date.month0() as usize],
            date.year()
        ),
        None => "-".to_string(),
    }
}

/// Formats a stored `YYYY-MM-DD` date as the short numeric form used in
/// tables ("05/04/24"). Empty or unparsable input renders "-".
pub fn format_date_numeric(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%d/%m/%y").to_string(),
        None => "-".to_string(),
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
