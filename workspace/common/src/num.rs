use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Leniently parses a JSON value into a `Decimal`.
///
/// Persisted and imported dossiers are not trusted to carry well-typed
/// numbers: amounts show up as JSON numbers, as strings ("12.50"), or as
/// garbage. Anything that does not parse is zero, so callers can assume a
/// usable amount without error handling.
pub fn parse_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => parse_decimal_str(&n.to_string()),
        Value::String(s) => parse_decimal_str(s),
        Value::Bool(true) => Decimal::ONE,
        _ => Decimal::ZERO,
    }
}

/// Leniently parses a string into a `Decimal`; empty or non-numeric input
/// is zero. Scientific notation is accepted since JSON floats may be
/// rendered that way.
pub fn parse_decimal_str(value: &str) -> Decimal {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_decimal_number() {
        assert_eq!(parse_decimal(&json!(120.5)), Decimal::new(1205, 1));
        assert_eq!(parse_decimal(&json!(0)), Decimal::ZERO);
        assert_eq!(parse_decimal(&json!(-42)), Decimal::new(-42, 0));
    }

    #[test]
    fn test_parse_decimal_string() {
        assert_eq!(parse_decimal(&json!("19.60")), Decimal::new(1960, 2));
        assert_eq!(parse_decimal(&json!("  7 ")), Decimal::new(7, 0));
        assert_eq!(parse_decimal(&json!("")), Decimal::ZERO);
        assert_eq!(parse_decimal(&json!("abc")), Decimal::ZERO);
    }

    #[test]
    fn test_parse_decimal_other_shapes() {
        assert_eq!(parse_decimal(&json!(null)), Decimal::ZERO);
        assert_eq!(parse_decimal(&json!([1, 2])), Decimal::ZERO);
        assert_eq!(parse_decimal(&json!({"amount": 3})), Decimal::ZERO);
        assert_eq!(parse_decimal(&json!(true)), Decimal::ONE);
        assert_eq!(parse_decimal(&json!(false)), Decimal::ZERO);
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(parse_decimal_str("1e3"), Decimal::new(1000, 0));
    }
}
