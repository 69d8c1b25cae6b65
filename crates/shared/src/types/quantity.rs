//! Lenient decimal normalization for loosely-typed API payloads.
//!
//! Order and note records arrive with quantities and amounts as JSON numbers,
//! numeric strings, empty strings, or `null` interchangeably. Everything is
//! normalized here, once, into `Decimal`. Malformed input degrades to zero
//! instead of failing: a single corrupt historical record must not block
//! reconciliation for a whole order.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Normalizer for signed monetary amounts (unit prices, totals, charges).
pub struct Amount;

impl Amount {
    /// Parses a decimal from text. Blank or non-numeric text yields zero.
    #[must_use]
    pub fn parse_str(raw: &str) -> Decimal {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Decimal::ZERO;
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .unwrap_or(Decimal::ZERO)
    }

    /// Converts any JSON value to a decimal.
    ///
    /// Numbers are converted through their textual form so no binary
    /// floating-point rounding leaks in. `null`, booleans, arrays and
    /// objects yield zero.
    #[must_use]
    pub fn from_json(value: &Value) -> Decimal {
        match value {
            Value::Number(n) => Self::parse_str(&n.to_string()),
            Value::String(s) => Self::parse_str(s),
            _ => Decimal::ZERO,
        }
    }
}

/// Normalizer for quantities, which are never negative.
pub struct Quantity;

impl Quantity {
    /// Parses a quantity from text, clamping negatives to zero.
    #[must_use]
    pub fn parse_str(raw: &str) -> Decimal {
        Amount::parse_str(raw).max(Decimal::ZERO)
    }

    /// Converts any JSON value to a quantity, clamping negatives to zero.
    #[must_use]
    pub fn from_json(value: &Value) -> Decimal {
        Amount::from_json(value).max(Decimal::ZERO)
    }
}

/// Serde adapter: deserialize a signed amount leniently.
///
/// Use with `#[serde(default, deserialize_with = "lenient_amount")]`.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(Decimal::ZERO, Amount::from_json))
}

/// Serde adapter: deserialize a quantity leniently.
///
/// Use with `#[serde(default, deserialize_with = "lenient_quantity")]`.
pub fn lenient_quantity<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map_or(Decimal::ZERO, Quantity::from_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[rstest]
    #[case(json!(12), dec!(12))]
    #[case(json!(12.5), dec!(12.5))]
    #[case(json!("7.25"), dec!(7.25))]
    #[case(json!("  3 "), dec!(3))]
    #[case(json!(""), dec!(0))]
    #[case(json!("abc"), dec!(0))]
    #[case(json!(null), dec!(0))]
    #[case(json!(true), dec!(0))]
    #[case(json!([1, 2]), dec!(0))]
    #[case(json!("1e3"), dec!(1000))]
    fn test_quantity_from_json(#[case] value: Value, #[case] expected: Decimal) {
        assert_eq!(Quantity::from_json(&value), expected);
    }

    #[test]
    fn test_quantity_clamps_negative() {
        assert_eq!(Quantity::from_json(&json!(-4)), Decimal::ZERO);
        assert_eq!(Quantity::parse_str("-0.5"), Decimal::ZERO);
    }

    #[test]
    fn test_amount_keeps_sign() {
        assert_eq!(Amount::from_json(&json!(-4.5)), dec!(-4.5));
        assert_eq!(Amount::parse_str("-10"), dec!(-10));
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "lenient_quantity")]
        qty: Decimal,
        #[serde(default, deserialize_with = "lenient_amount")]
        price: Decimal,
    }

    #[test]
    fn test_serde_adapters() {
        let row: Row = serde_json::from_value(json!({"qty": "5", "price": -2})).unwrap();
        assert_eq!(row.qty, dec!(5));
        assert_eq!(row.price, dec!(-2));

        let row: Row = serde_json::from_value(json!({"qty": null})).unwrap();
        assert_eq!(row.qty, Decimal::ZERO);
        assert_eq!(row.price, Decimal::ZERO);

        let row: Row = serde_json::from_value(json!({"qty": "n/a", "price": ""})).unwrap();
        assert_eq!(row.qty, Decimal::ZERO);
        assert_eq!(row.price, Decimal::ZERO);
    }
}
