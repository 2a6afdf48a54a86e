//! Tagged JSON value model
//!
//! `serde_json::Value` (without `arbitrary_precision`) stores every number as
//! an `f64`, `i64` or `u64`. Solana RPC payloads carry lamport balances, slots
//! and timestamps that do not always fit those, so this crate uses its own
//! value tree in which every number is explicitly one of two classes:
//!
//! - **SafeNumber**: anything a double represents exactly (fractions,
//!   exponents, and integers up to 2^53 in magnitude)
//! - **BigInt**: an integer literal beyond that range, kept as its exact
//!   decimal digits
//!
//! Call sites have to match on both variants, so precision is never dropped
//! by accident.
//!
//! # Examples
//!
//! ```rust
//! use exactrpc_core::{BigInt, Value};
//!
//! let slot = Value::from(9_007_199_254_740_993u64);
//! assert!(matches!(slot, Value::BigInt(_)));
//!
//! let small = Value::from(42u64);
//! assert_eq!(small, Value::SafeNumber(42.0));
//!
//! let big = BigInt::parse("-18446744073709551616").unwrap();
//! assert_eq!(big.to_string(), "-18446744073709551616");
//! ```

use crate::error::EncodeError;
use indexmap::IndexMap;
use std::fmt;

/// Ordered object map
///
/// Keys keep the position of their first insertion. Inserting an existing key
/// replaces the value in place, which gives JSON's last-write-wins semantics
/// without reordering.
pub type Map = IndexMap<String, Value>;

/// Largest integer magnitude a double holds exactly, as decimal digits.
///
/// 2^53 itself is exactly representable (it is a power of two); 2^53 + 1 is
/// the first integer that is not.
pub(crate) const EXACT_INTEGER_LIMIT: &str = "9007199254740992";

/// Same limit as a number, for the integer conversions.
pub(crate) const EXACT_INTEGER_LIMIT_U128: u128 = 1 << 53;

/// Arbitrary-precision integer literal
///
/// Stores the sign separately from the digit string. The digit string has no
/// leading zeros (except the literal `"0"`) so that formatting reproduces the
/// source literal exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    negative: bool,
    digits: String,
}

impl BigInt {
    /// Parse a decimal integer literal (`-?(0|[1-9][0-9]*)`).
    ///
    /// Returns `None` for anything else, including leading zeros, a `+`
    /// sign and `-0`.
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }
        if negative && digits == "0" {
            return None;
        }
        Some(Self {
            negative,
            digits: digits.to_string(),
        })
    }

    /// Build from pre-validated parts. The decoder has already checked the
    /// grammar, so this skips re-validation.
    pub(crate) fn from_parts(negative: bool, digits: &str) -> Self {
        Self {
            negative,
            digits: digits.to_string(),
        }
    }

    /// Whether the integer is below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Magnitude as decimal digits, without sign
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Convert to `i128` if it fits
    pub fn to_i128(&self) -> Option<i128> {
        // Parsing with the sign attached lets i128::MIN through.
        self.to_string().parse().ok()
    }

    /// Convert to `u64` if it is non-negative and fits
    pub fn to_u64(&self) -> Option<u64> {
        if self.negative {
            return None;
        }
        self.digits.parse().ok()
    }

    /// Convert to `i64` if it fits
    pub fn to_i64(&self) -> Option<i64> {
        self.to_string().parse().ok()
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.digits)
    }
}

/// Returns true when an unsigned decimal digit string (no leading zeros) is
/// larger than `EXACT_INTEGER_LIMIT`.
///
/// Compares by length first, then lexicographically, so no numeric
/// conversion happens before the precision class is known.
pub(crate) fn exceeds_exact_limit(digits: &str) -> bool {
    match digits.len().cmp(&EXACT_INTEGER_LIMIT.len()) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => digits > EXACT_INTEGER_LIMIT,
    }
}

/// Precision-aware JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON `null`
    Null,
    /// JSON `true` / `false`
    Bool(bool),
    /// JSON string
    String(String),
    /// Number a double represents exactly
    SafeNumber(f64),
    /// Integer literal too large for a double
    BigInt(BigInt),
    /// JSON array
    Array(Vec<Value>),
    /// JSON object, in insertion order
    Object(Map),
}

impl Value {
    /// Whether this is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String contents, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean contents, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The double, if this is a `SafeNumber`
    ///
    /// A `BigInt` returns `None`: converting it would lose precision, which
    /// is exactly what this type exists to avoid.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::SafeNumber(n) => Some(*n),
            _ => None,
        }
    }

    /// Integer value of either numeric class, if it is integral and fits
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::SafeNumber(n) if n.fract() == 0.0 && n.abs() <= EXACT_INTEGER_LIMIT_U128 as f64 => {
                Some(*n as i128)
            }
            Value::BigInt(b) => b.to_i128(),
            _ => None,
        }
    }

    /// Non-negative integer value of either numeric class, if it fits a `u64`
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i128().and_then(|n| u64::try_from(n).ok())
    }

    /// Array elements, if this is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Object entries, if this is an object
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Look up an object member by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Look up an array element by position
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Convert a `serde_json::Value` into the tagged model
    ///
    /// Integers that `serde_json` stored as `i64`/`u64` are classified by
    /// magnitude, so a `u64` slot number above 2^53 becomes a `BigInt`
    /// rather than a rounded double.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else if let Some(i) = n.as_i64() {
                    Value::from(i)
                } else {
                    Value::SafeNumber(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert into a `serde_json::Value`
    ///
    /// # Errors
    ///
    /// - `EncodeError::BigIntOutOfRange` for a `BigInt` outside `i64`/`u64`
    /// - `EncodeError::NonFiniteNumber` for NaN or an infinity
    pub fn to_json(&self) -> Result<serde_json::Value, EncodeError> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::SafeNumber(n) => {
                if n.fract() == 0.0 && n.abs() <= EXACT_INTEGER_LIMIT_U128 as f64 {
                    // Keep integral doubles as JSON integers ("5", not "5.0").
                    serde_json::Value::from(*n as i64)
                } else {
                    serde_json::Number::from_f64(*n)
                        .map(serde_json::Value::Number)
                        .ok_or(EncodeError::NonFiniteNumber)?
                }
            }
            Value::BigInt(b) => {
                if let Some(u) = b.to_u64() {
                    serde_json::Value::from(u)
                } else if let Some(i) = b.to_i64() {
                    serde_json::Value::from(i)
                } else {
                    return Err(EncodeError::BigIntOutOfRange(b.to_string()));
                }
            }
            Value::Array(items) => serde_json::Value::Array(
                items.iter().map(Value::to_json).collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), v.to_json()?);
                }
                serde_json::Value::Object(out)
            }
        })
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::SafeNumber(n)
    }
}

impl From<u128> for Value {
    fn from(n: u128) -> Self {
        if n > EXACT_INTEGER_LIMIT_U128 {
            Value::BigInt(BigInt::from_parts(false, &n.to_string()))
        } else {
            Value::SafeNumber(n as f64)
        }
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        let magnitude = n.unsigned_abs();
        if magnitude > EXACT_INTEGER_LIMIT_U128 {
            Value::BigInt(BigInt::from_parts(n < 0, &magnitude.to_string()))
        } else {
            Value::SafeNumber(n as f64)
        }
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::from(n as u128)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::from(n as i128)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::SafeNumber(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::SafeNumber(n as f64)
    }
}

impl From<BigInt> for Value {
    fn from(b: BigInt) -> Self {
        Value::BigInt(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k.into(), v.into());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigint_parse_rejects_non_canonical() {
        assert!(BigInt::parse("").is_none());
        assert!(BigInt::parse("-").is_none());
        assert!(BigInt::parse("007").is_none());
        assert!(BigInt::parse("+7").is_none());
        assert!(BigInt::parse("-0").is_none());
        assert!(BigInt::parse("1.5").is_none());
        assert!(BigInt::parse("12a").is_none());
    }

    #[test]
    fn test_bigint_parse_and_display() {
        let big = BigInt::parse("-123456789012345678901234567890").unwrap();
        assert!(big.is_negative());
        assert_eq!(big.digits(), "123456789012345678901234567890");
        assert_eq!(big.to_string(), "-123456789012345678901234567890");
        assert_eq!(BigInt::parse("0").unwrap().to_string(), "0");
    }

    #[test]
    fn test_bigint_conversions() {
        let max = BigInt::parse("18446744073709551615").unwrap();
        assert_eq!(max.to_u64(), Some(u64::MAX));
        assert_eq!(max.to_i64(), None);
        assert_eq!(max.to_i128(), Some(u64::MAX as i128));

        let min = BigInt::parse("-170141183460469231731687303715884105728").unwrap();
        assert_eq!(min.to_i128(), Some(i128::MIN));
        assert_eq!(min.to_u64(), None);
    }

    #[test]
    fn test_exceeds_exact_limit() {
        assert!(!exceeds_exact_limit("9007199254740991"));
        assert!(!exceeds_exact_limit("9007199254740992"));
        assert!(exceeds_exact_limit("9007199254740993"));
        assert!(exceeds_exact_limit("10000000000000000"));
        assert!(!exceeds_exact_limit("999999999999999"));
    }

    #[test]
    fn test_integer_conversions_pick_class() {
        assert_eq!(Value::from(9_007_199_254_740_992u64), Value::SafeNumber(9_007_199_254_740_992.0));
        assert_eq!(
            Value::from(9_007_199_254_740_993u64),
            Value::BigInt(BigInt::parse("9007199254740993").unwrap())
        );
        assert_eq!(
            Value::from(-9_007_199_254_740_993i64),
            Value::BigInt(BigInt::parse("-9007199254740993").unwrap())
        );
        match Value::from(i128::MIN) {
            Value::BigInt(b) => assert_eq!(b.to_string(), i128::MIN.to_string()),
            other => panic!("Expected BigInt, got {:?}", other),
        }
    }

    #[test]
    fn test_accessors() {
        let value: Value = vec![("name", Value::from("slot")), ("n", Value::from(7u64))]
            .into_iter()
            .collect();
        assert_eq!(value.get("name").and_then(Value::as_str), Some("slot"));
        assert_eq!(value.get("n").and_then(Value::as_u64), Some(7));
        assert!(value.get("missing").is_none());
        assert!(Value::Null.is_null());
        assert_eq!(Value::from(vec![Value::Bool(true)]).get_index(0), Some(&Value::Bool(true)));
        assert_eq!(Value::SafeNumber(1.5).as_i128(), None);
    }

    #[test]
    fn test_from_json_classifies_u64() {
        let json = serde_json::json!({"lamports": 18_446_744_073_709_551_615u64, "slot": 12});
        let value = Value::from_json(json);
        assert!(matches!(value.get("lamports"), Some(Value::BigInt(_))));
        assert_eq!(value.get("slot"), Some(&Value::SafeNumber(12.0)));
    }

    #[test]
    fn test_to_json_round_trip_within_u64() {
        let value: Value = vec![
            ("big", Value::from(u64::MAX)),
            ("frac", Value::SafeNumber(0.25)),
            ("int", Value::SafeNumber(3.0)),
        ]
        .into_iter()
        .collect();
        let json = value.to_json().unwrap();
        assert_eq!(json, serde_json::json!({"big": u64::MAX, "frac": 0.25, "int": 3}));
        assert_eq!(Value::from_json(json), value);
    }

    #[test]
    fn test_to_json_rejects_unrepresentable() {
        let huge = Value::BigInt(BigInt::parse("123456789012345678901234567890").unwrap());
        assert!(matches!(huge.to_json(), Err(EncodeError::BigIntOutOfRange(_))));
        assert!(matches!(
            Value::SafeNumber(f64::NAN).to_json(),
            Err(EncodeError::NonFiniteNumber)
        ));
    }
}
