//! Standard double-based JSON codec
//!
//! Behaves the way an ordinary JSON library does: every number decodes to a
//! double, so integers past 2^53 are rounded. Used for methods outside the
//! known protocol surface, where callers expect plain JSON semantics.

use crate::codec::decoder;
use crate::error::{CodecError, EncodeError};
use crate::value::{BigInt, Value};

/// Decode JSON text, converting every number to `SafeNumber`
///
/// Grammar, error offsets and overflow behaviour (`1e400` is an infinity)
/// are those of the precision decoder; only integers past 2^53 differ, and
/// they are rounded to the nearest double.
///
/// # Errors
///
/// Same taxonomy as the precision decoder: `EmptyInput` for blank text,
/// `MalformedJson` with a byte offset otherwise.
///
/// # Examples
///
/// ```rust
/// use exactrpc_core::{codec, Value};
///
/// let value = codec::generic::decode("9007199254740993").unwrap();
/// assert_eq!(value, Value::SafeNumber(9007199254740992.0));
/// ```
pub fn decode(text: &str) -> Result<Value, CodecError> {
    decoder::decode(text).map(lossy)
}

/// Encode through `serde_json`
///
/// # Errors
///
/// - `EncodeError::BigIntOutOfRange` for a `BigInt` outside `i64`/`u64`
/// - `EncodeError::NonFiniteNumber` for NaN or an infinity
pub fn encode(value: &Value) -> Result<String, EncodeError> {
    Ok(value.to_json()?.to_string())
}

fn lossy(value: Value) -> Value {
    match value {
        Value::BigInt(big) => Value::SafeNumber(nearest_double(&big)),
        Value::Array(items) => Value::Array(items.into_iter().map(lossy).collect()),
        Value::Object(map) => Value::Object(map.into_iter().map(|(k, v)| (k, lossy(v))).collect()),
        other => other,
    }
}

/// Correctly rounded double for a big integer; overflow gives an infinity.
fn nearest_double(big: &BigInt) -> f64 {
    // A digit string is always valid float syntax, so the error arm is dead;
    // `parse` itself saturates to an infinity on overflow.
    let magnitude = big.digits().parse::<f64>().map_or(f64::INFINITY, |d| d);
    if big.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_decode_loses_precision() {
        let value = decode(r#"{"slot":9007199254740993,"fee":5000}"#).unwrap();
        assert_eq!(value.get("slot"), Some(&Value::SafeNumber(9_007_199_254_740_992.0)));
        assert_eq!(value.get("fee"), Some(&Value::SafeNumber(5000.0)));
    }

    #[test]
    fn test_generic_decode_errors() {
        assert_eq!(decode(""), Err(CodecError::EmptyInput));
        assert_eq!(decode("  \n"), Err(CodecError::EmptyInput));
        match decode("{\"a\":}") {
            Err(CodecError::MalformedJson { offset, .. }) => assert_eq!(offset, 5),
            other => panic!("Expected MalformedJson, got {:?}", other),
        }
    }

    #[test]
    fn test_generic_decode_overflowing_exponent() {
        assert_eq!(decode("1e400"), Ok(Value::SafeNumber(f64::INFINITY)));
        let value = decode(r#"{"x":-1e400,"y":[1e400]}"#).unwrap();
        assert_eq!(value.get("x"), Some(&Value::SafeNumber(f64::NEG_INFINITY)));
        assert_eq!(
            value.get("y").and_then(|y| y.get_index(0)),
            Some(&Value::SafeNumber(f64::INFINITY))
        );
    }

    #[test]
    fn test_generic_decode_rounds_big_integers() {
        let value = decode("[-18446744073709551617,9007199254740995]").unwrap();
        assert_eq!(value.get_index(0), Some(&Value::SafeNumber(-18_446_744_073_709_551_616.0)));
        assert_eq!(value.get_index(1), Some(&Value::SafeNumber(9_007_199_254_740_996.0)));
        assert_eq!(decode(&"1".repeat(400)), Ok(Value::SafeNumber(f64::INFINITY)));
    }

    #[test]
    fn test_generic_decode_matches_precision_offsets() {
        for text in [r#"{"a":1,}"#, "[1 2]", "01", "\"\\x\"", "[1]x"] {
            assert_eq!(decode(text), crate::codec::decode(text).map(lossy), "{}", text);
            assert!(decode(text).is_err(), "{} should be rejected", text);
        }
    }

    #[test]
    fn test_generic_encode() {
        let value: Value = vec![("ok", Value::Bool(true)), ("n", Value::from(u64::MAX))]
            .into_iter()
            .collect();
        assert_eq!(encode(&value).unwrap(), r#"{"ok":true,"n":18446744073709551615}"#);

        let huge = Value::BigInt(BigInt::parse("99999999999999999999999").unwrap());
        assert_eq!(
            encode(&huge),
            Err(EncodeError::BigIntOutOfRange("99999999999999999999999".to_string()))
        );
    }
}
