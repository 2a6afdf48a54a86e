//! JSON encoder for precision-tagged values

use crate::value::{Value, EXACT_INTEGER_LIMIT_U128};
use std::fmt::Write as _;

/// Smallest magnitude written in plain decimal notation
const MIN_PLAIN_MAGNITUDE: f64 = 1e-6;

/// Encode a `Value` as compact JSON text
///
/// `BigInt` digits are written verbatim and unquoted. Object members keep
/// their stored order. Encoding is total: non-finite doubles become `null`.
pub fn encode(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::String(s) => write_str(out, s),
        Value::SafeNumber(n) => write_number(out, *n),
        Value::BigInt(b) => {
            let _ = write!(out, "{}", b);
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_str(out, key);
                out.push(':');
                write_value(out, item);
            }
            out.push('}');
        }
    }
}

/// Shortest round-trippable form of a double.
///
/// An integral double written as a bare integer literal would decode as a
/// `BigInt` once it is past the exact range, so those (and very small
/// magnitudes) use exponent notation.
fn write_number(out: &mut String, n: f64) {
    if !n.is_finite() {
        out.push_str("null");
        return;
    }

    let magnitude = n.abs();
    let integral_beyond_exact = n.fract() == 0.0 && magnitude > EXACT_INTEGER_LIMIT_U128 as f64;
    let tiny = magnitude != 0.0 && magnitude < MIN_PLAIN_MAGNITUDE;

    if integral_beyond_exact || tiny {
        let _ = write!(out, "{:e}", n);
    } else {
        let _ = write!(out, "{}", n);
    }
}

fn write_str(out: &mut String, s: &str) {
    out.push('"');
    let mut run_start = 0;
    for (i, c) in s.char_indices() {
        let escaped = match c {
            '"' => "\\\"",
            '\\' => "\\\\",
            '\n' => "\\n",
            '\r' => "\\r",
            '\t' => "\\t",
            '\u{8}' => "\\b",
            '\u{c}' => "\\f",
            c if (c as u32) < 0x20 => "",
            _ => continue,
        };
        out.push_str(&s[run_start..i]);
        if escaped.is_empty() {
            let _ = write!(out, "\\u{:04x}", c as u32);
        } else {
            out.push_str(escaped);
        }
        run_start = i + c.len_utf8();
    }
    out.push_str(&s[run_start..]);
    out.push('"');
}
