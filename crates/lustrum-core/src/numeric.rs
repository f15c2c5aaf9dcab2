//! The numeric gate.
//!
//! Every externally sourced numeric value passes through [`parse_numeric`]
//! exactly once, so downstream code never re-validates numeric-ness. The
//! gate never fails: unparsable input becomes a missing value (`None`),
//! which is kept distinct from a legitimate zero everywhere downstream.

use serde::{Deserialize, Serialize};

/// A provider field value before numeric parsing.
///
/// Providers disagree on representation: FMP sends JSON numbers (or null),
/// Alpha Vantage sends strings such as `"1234567"` or `"None"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A JSON number.
    Number(f64),
    /// A string-encoded value, possibly with thousands separators.
    Text(String),
    /// Absent or JSON null.
    #[default]
    Null,
}

impl From<Option<f64>> for RawValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Null, Self::Number)
    }
}

impl From<Option<String>> for RawValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Null, Self::Text)
    }
}

/// Parse a raw provider value into a finite number, or `None`.
#[must_use]
pub fn parse_numeric(value: &RawValue) -> Option<f64> {
    match value {
        RawValue::Number(n) => n.is_finite().then_some(*n),
        RawValue::Text(s) => parse_numeric_str(s),
        RawValue::Null => None,
    }
}

/// Parse a string-encoded number, or `None`.
///
/// Strips comma thousands separators and surrounding whitespace before
/// parsing as a decimal. `"N/A"`, `"None"`, `""`, and other non-numeric
/// text all yield `None`, never zero.
#[must_use]
pub fn parse_numeric_str(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_thousands_separators() {
        assert_relative_eq!(parse_numeric_str("1,234.5").unwrap(), 1234.5);
        assert_relative_eq!(parse_numeric_str("12,345,678").unwrap(), 12_345_678.0);
    }

    #[test]
    fn test_whitespace() {
        assert_relative_eq!(parse_numeric_str("  42.0  ").unwrap(), 42.0);
    }

    #[test]
    fn test_negative_values() {
        assert_relative_eq!(parse_numeric_str("-9,876").unwrap(), -9876.0);
    }

    #[test]
    fn test_non_numeric_is_missing_not_zero() {
        assert_eq!(parse_numeric_str("N/A"), None);
        assert_eq!(parse_numeric_str("None"), None);
        assert_eq!(parse_numeric_str(""), None);
        assert_eq!(parse_numeric_str("   "), None);
        assert_eq!(parse_numeric_str("abc"), None);
    }

    #[test]
    fn test_raw_value_number() {
        assert_relative_eq!(parse_numeric(&RawValue::Number(12.0)).unwrap(), 12.0);
        assert_eq!(parse_numeric(&RawValue::Number(f64::NAN)), None);
        assert_eq!(parse_numeric(&RawValue::Number(f64::INFINITY)), None);
    }

    #[test]
    fn test_raw_value_null() {
        assert_eq!(parse_numeric(&RawValue::Null), None);
    }

    #[test]
    fn test_raw_value_from_options() {
        assert_eq!(RawValue::from(Some(5.0)), RawValue::Number(5.0));
        assert_eq!(RawValue::from(None::<f64>), RawValue::Null);
        assert_eq!(
            RawValue::from(Some("7".to_string())),
            RawValue::Text("7".to_string())
        );
        assert_eq!(RawValue::from(None::<String>), RawValue::Null);
    }

    #[test]
    fn test_deserializes_untagged() {
        let n: RawValue = serde_json::from_str("123.5").unwrap();
        assert_eq!(n, RawValue::Number(123.5));

        let t: RawValue = serde_json::from_str("\"1,000\"").unwrap();
        assert_eq!(t, RawValue::Text("1,000".to_string()));

        let null: RawValue = serde_json::from_str("null").unwrap();
        assert_eq!(null, RawValue::Null);
    }

    #[test]
    fn test_zero_is_a_valid_number() {
        assert_relative_eq!(parse_numeric_str("0").unwrap(), 0.0);
        assert_relative_eq!(parse_numeric(&RawValue::Number(0.0)).unwrap(), 0.0);
    }
}
