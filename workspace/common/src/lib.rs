//! Shared leaf utilities used by the model, compute and application crates:
//! lenient numeric parsing (persisted blobs may carry numbers, numeric
//! strings or garbage) and currency/date display formatting.

pub mod format;
pub mod num;

pub use format::{format_currency, format_date_fr, format_date_numeric};
pub use num::{parse_decimal, parse_decimal_str};
