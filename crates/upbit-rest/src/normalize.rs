//! Wire-number coercion
//!
//! Upbit quotation payloads carry decimals as JSON numbers on some
//! endpoints and as comma-formatted strings ("50,000,000") on others.
//! Every normalizer funnels numeric fields through the single coercion
//! here so the fallback behavior is uniform: required fields default to
//! `0.0` on unparsable input, nullable fields to `None`. NaN never leaks.

use serde::Deserialize;

/// A decimal as it appears on the wire: number or formatted string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    /// Plain JSON number
    Number(f64),
    /// String form, possibly comma-grouped ("50,000,000")
    Text(String),
}

/// Coerce a required wire number, defaulting to 0.0 on parse failure
pub fn to_number(value: &WireNumber) -> f64 {
    let parsed = match value {
        WireNumber::Number(n) => *n,
        WireNumber::Text(s) => s.replace(',', "").trim().parse().unwrap_or(f64::NAN),
    };

    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Coerce a nullable wire number, preserving absence
pub fn to_nullable_number(value: Option<&WireNumber>) -> Option<f64> {
    value.map(to_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_grouped_string() {
        let value = WireNumber::Text("50,000,000".to_string());
        assert_eq!(to_number(&value), 50_000_000.0);
    }

    #[test]
    fn test_plain_number_passthrough() {
        assert_eq!(to_number(&WireNumber::Number(0.015)), 0.015);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let value = WireNumber::Text(" 123.45 ".to_string());
        assert_eq!(to_number(&value), 123.45);
    }

    #[test]
    fn test_unparsable_defaults_to_zero() {
        assert_eq!(to_number(&WireNumber::Text("abc".to_string())), 0.0);
        assert_eq!(to_number(&WireNumber::Text(String::new())), 0.0);
    }

    #[test]
    fn test_non_finite_defaults_to_zero() {
        assert_eq!(to_number(&WireNumber::Number(f64::INFINITY)), 0.0);
        assert_eq!(to_number(&WireNumber::Number(f64::NAN)), 0.0);
    }

    #[test]
    fn test_nullable() {
        assert_eq!(to_nullable_number(None), None);

        let value = WireNumber::Text("1.5".to_string());
        assert_eq!(to_nullable_number(Some(&value)), Some(1.5));
    }

    #[test]
    fn test_deserialize_either_form() {
        let n: WireNumber = serde_json::from_str("42.5").unwrap();
        assert_eq!(to_number(&n), 42.5);

        let s: WireNumber = serde_json::from_str("\"42.5\"").unwrap();
        assert_eq!(to_number(&s), 42.5);
    }
}
