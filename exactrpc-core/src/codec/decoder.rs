//! Single-pass JSON decoder producing precision-tagged values
//!
//! Numeric tokens are captured as raw text and classified before any numeric
//! conversion: a bare integer whose magnitude a double cannot hold exactly
//! becomes a `BigInt` with its digits copied verbatim. Fractions and
//! exponents always go through `f64` parsing.

use super::MAX_DEPTH;
use crate::error::CodecError;
use crate::value::{exceeds_exact_limit, BigInt, Map, Value};

/// Decode JSON text into a precision-tagged `Value`
///
/// # Errors
///
/// - `CodecError::EmptyInput` if the text is empty or only whitespace
/// - `CodecError::MalformedJson` with the byte offset of the offending token
///   for anything that is not a single well-formed JSON value
///
/// # Examples
///
/// ```rust
/// use exactrpc_core::{codec, Value};
///
/// let value = codec::decode(r#"{"lamports":18446744073709551615}"#).unwrap();
/// assert!(matches!(value.get("lamports"), Some(Value::BigInt(_))));
/// assert_eq!(codec::encode(&value), r#"{"lamports":18446744073709551615}"#);
/// ```
pub fn decode(text: &str) -> Result<Value, CodecError> {
    if text.bytes().all(is_whitespace) {
        return Err(CodecError::EmptyInput);
    }

    let mut decoder = Decoder::new(text);
    decoder.skip_whitespace();
    let value = decoder.read_value()?;
    decoder.skip_whitespace();
    if decoder.pos < decoder.bytes.len() {
        return Err(CodecError::malformed(decoder.pos, "unexpected trailing content"));
    }
    Ok(value)
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

struct Decoder<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Decoder<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }

    fn read_value(&mut self) -> Result<Value, CodecError> {
        match self.peek() {
            None => Err(CodecError::malformed(self.pos, "unexpected end of input")),
            Some(b'{') => self.read_object(),
            Some(b'[') => self.read_array(),
            Some(b'"') => self.read_string().map(Value::String),
            Some(b't') => self.read_literal("true", Value::Bool(true)),
            Some(b'f') => self.read_literal("false", Value::Bool(false)),
            Some(b'n') => self.read_literal("null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.read_number(),
            Some(_) => Err(CodecError::malformed(self.pos, "expected a value")),
        }
    }

    fn read_literal(&mut self, literal: &'static str, value: Value) -> Result<Value, CodecError> {
        if self.bytes[self.pos..].starts_with(literal.as_bytes()) {
            self.pos += literal.len();
            Ok(value)
        } else {
            Err(CodecError::malformed(self.pos, "invalid literal"))
        }
    }

    fn enter(&mut self) -> Result<(), CodecError> {
        if self.depth >= MAX_DEPTH {
            return Err(CodecError::malformed(self.pos, "nesting too deep"));
        }
        self.depth += 1;
        Ok(())
    }

    fn read_object(&mut self) -> Result<Value, CodecError> {
        self.enter()?;
        self.pos += 1; // '{'
        let mut map = Map::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(CodecError::malformed(self.pos, "expected a string key"));
            }
            let key = self.read_string()?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(CodecError::malformed(self.pos, "expected ':' after object key"));
            }
            self.pos += 1;

            self.skip_whitespace();
            let value = self.read_value()?;
            // A repeated key keeps its first position and takes the new value.
            map.insert(key, value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(CodecError::malformed(self.pos, "unterminated object")),
                Some(_) => return Err(CodecError::malformed(self.pos, "expected ',' or '}' in object")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn read_array(&mut self) -> Result<Value, CodecError> {
        self.enter()?;
        self.pos += 1; // '['
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            self.skip_whitespace();
            items.push(self.read_value()?);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(CodecError::malformed(self.pos, "unterminated array")),
                Some(_) => return Err(CodecError::malformed(self.pos, "expected ',' or ']' in array")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }

    fn read_string(&mut self) -> Result<String, CodecError> {
        let open = self.pos;
        self.pos += 1; // '"'
        let mut out = String::new();
        // Unescaped runs are copied as whole slices. Every boundary sits on an
        // ASCII byte, so slicing `text` here never splits a character.
        let mut run_start = self.pos;

        loop {
            match self.peek() {
                None => return Err(CodecError::malformed(open, "unterminated string")),
                Some(b'"') => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.pos += 1;
                    return Ok(out);
                }
                Some(b'\\') => {
                    out.push_str(&self.text[run_start..self.pos]);
                    self.read_escape(&mut out)?;
                    run_start = self.pos;
                }
                Some(0x00..=0x1f) => {
                    return Err(CodecError::malformed(self.pos, "control character in string"))
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn read_escape(&mut self, out: &mut String) -> Result<(), CodecError> {
        let escape_at = self.pos;
        self.pos += 1; // '\\'
        let Some(c) = self.peek() else {
            return Err(CodecError::malformed(escape_at, "unterminated string"));
        };
        self.pos += 1;

        match c {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{8}'),
            b'f' => out.push('\u{c}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let ch = self.read_unicode_escape(escape_at)?;
                out.push(ch);
            }
            _ => return Err(CodecError::malformed(escape_at, "invalid escape sequence")),
        }
        Ok(())
    }

    /// Reads the `XXXX` of `\uXXXX`, composing a surrogate pair when a high
    /// surrogate is followed by `\u` and a low surrogate.
    fn read_unicode_escape(&mut self, escape_at: usize) -> Result<char, CodecError> {
        let first = self.read_hex4(escape_at)?;
        let code = match first {
            0xD800..=0xDBFF => {
                if !self.bytes[self.pos..].starts_with(b"\\u") {
                    return Err(CodecError::malformed(escape_at, "unpaired surrogate"));
                }
                let low_at = self.pos;
                self.pos += 2;
                let second = self.read_hex4(low_at)?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(CodecError::malformed(low_at, "invalid low surrogate"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(CodecError::malformed(escape_at, "unpaired surrogate")),
            _ => first,
        };
        char::from_u32(code).ok_or_else(|| CodecError::malformed(escape_at, "invalid unicode escape"))
    }

    fn read_hex4(&mut self, escape_at: usize) -> Result<u32, CodecError> {
        let end = self.pos + 4;
        let hex = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| CodecError::malformed(escape_at, "truncated unicode escape"))?;
        let mut code = 0u32;
        for &b in hex {
            let digit = (b as char)
                .to_digit(16)
                .ok_or_else(|| CodecError::malformed(escape_at, "invalid unicode escape"))?;
            code = code * 16 + digit;
        }
        self.pos = end;
        Ok(code)
    }

    /// Captures `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?` and
    /// classifies it.
    fn read_number(&mut self) -> Result<Value, CodecError> {
        let start = self.pos;
        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }

        let int_start = self.pos;
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if matches!(self.peek(), Some(b'0'..=b'9')) {
                    return Err(CodecError::malformed(int_start, "leading zeros in number"));
                }
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(CodecError::malformed(self.pos, "expected digit")),
        }
        let int_end = self.pos;

        let mut integral = true;
        if self.peek() == Some(b'.') {
            integral = false;
            self.pos += 1;
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(CodecError::malformed(self.pos, "expected digit after decimal point"));
            }
            self.skip_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            integral = false;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if !matches!(self.peek(), Some(b'0'..=b'9')) {
                return Err(CodecError::malformed(self.pos, "expected digit in exponent"));
            }
            self.skip_digits();
        }

        if integral {
            let digits = &self.text[int_start..int_end];
            if exceeds_exact_limit(digits) {
                return Ok(Value::BigInt(BigInt::from_parts(negative, digits)));
            }
        }

        // Overflowing exponents parse to an infinity, which is still a double.
        self.text[start..self.pos]
            .parse::<f64>()
            .map(Value::SafeNumber)
            .map_err(|_| CodecError::malformed(start, "invalid number"))
    }
}
