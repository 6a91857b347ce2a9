//! Lenient numeric parsing for wire amounts.
//!
//! The backend serializes decimals as JSON strings, but some payloads (market
//! data, nested detail records) carry plain numbers. Anything that does not
//! parse to a finite value becomes zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A numeric wire field: JSON number or JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Number(f64),
    Text(String),
}

impl From<&str> for WireNumber {
    fn from(s: &str) -> Self {
        WireNumber::Text(s.to_string())
    }
}

impl From<f64> for WireNumber {
    fn from(n: f64) -> Self {
        WireNumber::Number(n)
    }
}

impl WireNumber {
    /// Parse to a decimal, `None` if not a finite number.
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            // Display gives the shortest decimal that round-trips, so 0.1 stays 0.1.
            WireNumber::Number(n) if n.is_finite() => Decimal::from_str(&n.to_string())
                .ok()
                .or_else(|| Decimal::try_from(*n).ok()),
            WireNumber::Number(_) => None,
            WireNumber::Text(s) => parse_decimal_str(s),
        }
    }
}

/// Parse an optional wire amount; missing or malformed values become zero.
pub fn parse_amount(value: Option<&WireNumber>) -> Decimal {
    value.and_then(WireNumber::to_decimal).unwrap_or(Decimal::ZERO)
}

/// Parse a nullable wire amount: `null` stays `None`, malformed becomes zero.
pub fn parse_optional_amount(value: Option<&WireNumber>) -> Option<Decimal> {
    value.map(|v| v.to_decimal().unwrap_or(Decimal::ZERO))
}

/// Parse a quantity typed by the user. Blank or malformed input is zero.
pub fn parse_quantity_input(input: &str) -> Decimal {
    parse_decimal_str(input).unwrap_or(Decimal::ZERO)
}

/// Round to cents with banker's rounding, the same rule the server applies
/// when it quantizes fees and debits.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

fn parse_decimal_str(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_text_is_zero() {
        assert_eq!(parse_amount(Some(&WireNumber::from("abc"))), Decimal::ZERO);
    }

    #[test]
    fn missing_is_zero() {
        assert_eq!(parse_amount(None), Decimal::ZERO);
    }

    #[test]
    fn non_finite_number_is_zero() {
        assert_eq!(parse_amount(Some(&WireNumber::Number(f64::NAN))), Decimal::ZERO);
        assert_eq!(
            parse_amount(Some(&WireNumber::Number(f64::INFINITY))),
            Decimal::ZERO
        );
    }

    #[test]
    fn parses_strings_and_numbers() {
        assert_eq!(
            parse_amount(Some(&WireNumber::from("1250.75"))),
            Decimal::new(125075, 2)
        );
        assert_eq!(
            parse_amount(Some(&WireNumber::from(" 1e3 "))),
            Decimal::new(1000, 0)
        );
        assert_eq!(parse_amount(Some(&WireNumber::Number(0.5))), Decimal::new(5, 1));
    }

    #[test]
    fn optional_amount_keeps_null() {
        assert_eq!(parse_optional_amount(None), None);
        assert_eq!(
            parse_optional_amount(Some(&WireNumber::from("x"))),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn wire_number_deserializes_both_shapes() {
        let n: WireNumber = serde_json::from_str("12.5").unwrap();
        let s: WireNumber = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(n.to_decimal(), s.to_decimal());
    }

    #[test]
    fn quantity_input_blank_is_zero() {
        assert_eq!(parse_quantity_input(""), Decimal::ZERO);
        assert_eq!(parse_quantity_input("abc"), Decimal::ZERO);
        assert_eq!(parse_quantity_input("0.25"), Decimal::new(25, 2));
    }

    #[test]
    fn round_cents_half_to_even() {
        assert_eq!(round_cents(Decimal::new(12345, 3)), Decimal::new(1234, 2));
        assert_eq!(round_cents(Decimal::new(12355, 3)), Decimal::new(1236, 2));
        assert_eq!(round_cents(Decimal::new(5, 3)), Decimal::ZERO);
    }
}
