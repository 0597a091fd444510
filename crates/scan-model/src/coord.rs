//! Numeric coercion for detection payload fields.
//!
//! Scanning engines deliver bounds with loosely typed numeric fields: a
//! coordinate may arrive as a JSON number, a numeric string, or not at all.
//! [`Coord`] is the typed result of coercing one such field. Values that
//! cannot be coerced become NaN, which fails every containment comparison.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A coerced numeric field. NaN marks an uncoercible or missing value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord(f64);

impl Coord {
    /// Sentinel for values that could not be coerced.
    pub const INVALID: Coord = Coord(f64::NAN);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Used as the serde default for absent fields.
    pub fn missing() -> Self {
        Self::INVALID
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the value is a finite number.
    pub fn is_valid(self) -> bool {
        self.0.is_finite()
    }

    /// Coerce a JSON value.
    ///
    /// Numbers pass through, strings go through [`Coord::parse`], booleans
    /// become 1/0 and `null` becomes 0. Arrays and objects are invalid.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map(Self).unwrap_or(Self::INVALID),
            Value::String(s) => Self::parse(s),
            Value::Bool(b) => Self(if *b { 1.0 } else { 0.0 }),
            Value::Null => Self(0.0),
            Value::Array(_) | Value::Object(_) => Self::INVALID,
        }
    }

    /// Coerce a string field.
    ///
    /// Surrounding whitespace is ignored and an empty string is 0. Accepts
    /// decimal literals, `Infinity` with an optional sign, and unsigned
    /// `0x`/`0o`/`0b` integers. Anything else (`"12px"`, `"inf"`, `"NaN"`)
    /// is invalid.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
        if trimmed.is_empty() {
            return Self(0.0);
        }

        match trimmed {
            "Infinity" | "+Infinity" => return Self(f64::INFINITY),
            "-Infinity" => return Self(f64::NEG_INFINITY),
            _ => {}
        }

        if let Some(value) = parse_prefixed_integer(trimmed) {
            return Self(value);
        }

        let decimal = trimmed
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
        if !decimal {
            return Self::INVALID;
        }

        trimmed.parse::<f64>().map(Self).unwrap_or(Self::INVALID)
    }
}

/// `Some` when the text carries a radix prefix, NaN if the digits are bad.
fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    Some(
        u64::from_str_radix(digits, radix)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN),
    )
}

impl From<f64> for Coord {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Serialize for Coord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Non-finite values are written as strings so they coerce back to
        // themselves instead of collapsing to `null` (which reads as 0).
        if self.0.is_finite() {
            serializer.serialize_f64(self.0)
        } else if self.0.is_nan() {
            serializer.serialize_str("NaN")
        } else if self.0 > 0.0 {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_pass_through() {
        assert_eq!(Coord::from_json(&json!(12.5)).value(), 12.5);
        assert_eq!(Coord::from_json(&json!(-3)).value(), -3.0);
    }

    #[test]
    fn numeric_strings_coerce() {
        assert_eq!(Coord::parse("42").value(), 42.0);
        assert_eq!(Coord::parse("  1.5e2\n").value(), 150.0);
        assert_eq!(Coord::parse(".5").value(), 0.5);
        assert_eq!(Coord::parse("-3").value(), -3.0);
        assert_eq!(Coord::parse("+7.").value(), 7.0);
    }

    #[test]
    fn blank_strings_are_zero() {
        assert_eq!(Coord::parse("").value(), 0.0);
        assert_eq!(Coord::parse("   ").value(), 0.0);
    }

    #[test]
    fn radix_prefixes() {
        assert_eq!(Coord::parse("0x1A").value(), 26.0);
        assert_eq!(Coord::parse("0o17").value(), 15.0);
        assert_eq!(Coord::parse("0b101").value(), 5.0);
        assert!(Coord::parse("0x").value().is_nan());
        assert!(Coord::parse("0xZZ").value().is_nan());
        assert!(Coord::parse("-0x10").value().is_nan());
    }

    #[test]
    fn infinity_spellings() {
        assert_eq!(Coord::parse("Infinity").value(), f64::INFINITY);
        assert_eq!(Coord::parse("-Infinity").value(), f64::NEG_INFINITY);
        assert!(!Coord::parse("Infinity").is_valid());
        // Rust float syntax that the wire format does not accept.
        assert!(Coord::parse("inf").value().is_nan());
        assert!(Coord::parse("infinity").value().is_nan());
        assert!(Coord::parse("NaN").value().is_nan());
    }

    #[test]
    fn garbage_is_invalid() {
        for text in ["abc", "12px", "1,5", "--1", "1e", "."] {
            let coord = Coord::parse(text);
            assert!(coord.value().is_nan(), "{text:?} should not coerce");
            assert!(!coord.is_valid());
        }
    }

    #[test]
    fn non_string_json_values() {
        assert_eq!(Coord::from_json(&json!(true)).value(), 1.0);
        assert_eq!(Coord::from_json(&json!(false)).value(), 0.0);
        assert_eq!(Coord::from_json(&Value::Null).value(), 0.0);
        assert!(Coord::from_json(&json!([1])).value().is_nan());
        assert!(Coord::from_json(&json!({"x": 1})).value().is_nan());
    }

    #[test]
    fn invalid_values_survive_serialization() {
        let json = serde_json::to_string(&Coord::INVALID).unwrap();
        assert_eq!(json, "\"NaN\"");
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert!(back.value().is_nan());

        let json = serde_json::to_string(&Coord::new(f64::NEG_INFINITY)).unwrap();
        let back: Coord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value(), f64::NEG_INFINITY);
    }
}
