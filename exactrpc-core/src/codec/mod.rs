//! Precision-preserving JSON codec
//!
//! The default `decode`/`encode` pair keeps every integer literal exact:
//! numbers a double can hold become `Value::SafeNumber`, larger integer
//! literals become `Value::BigInt` with their digits untouched, and encoding
//! writes those digits back verbatim. Decoding to doubles first and fixing
//! things up afterwards cannot work, since the digits are gone by then.
//!
//! [`generic`] holds the ordinary double-based codec for payloads that are
//! expected to follow standard JSON semantics.
//!
//! # Examples
//!
//! ```rust
//! use exactrpc_core::codec;
//!
//! let text = r#"{"slot":9007199254740993,"fee":0.5}"#;
//! let value = codec::decode(text).unwrap();
//! assert_eq!(codec::encode(&value), text);
//! ```

mod decoder;
mod encoder;
pub mod generic;

pub use decoder::decode;
pub use encoder::encode;

/// Maximum array/object nesting accepted by the decoder
pub const MAX_DEPTH: usize = 256;
