//! Error types for exactrpc
//!
//! This module provides the error taxonomy shared by the codec and the
//! transport. It defines three error types:
//!
//! - **CodecError**: decoding failures (local, never partially mutates output)
//! - **EncodeError**: values a standard JSON serializer cannot represent
//! - **Error**: everything a transport call can resolve to besides a value
//!
//! # Error Categories
//!
//! `Error` keeps each failure stage distinguishable so callers can act on it:
//!
//! - **Before I/O**: `HeaderForbidden`, `Encode`, `Config`
//! - **During I/O**: `NetworkFailure`, `Cancelled`
//! - **After I/O**: `HttpError` (non-success status), `DecodeFailure`
//!
//! Nothing is retried or recovered internally.
//!
//! # Examples
//!
//! ```rust
//! use exactrpc_core::{CodecError, Error};
//!
//! let error = Error::from(CodecError::EmptyInput);
//! assert!(matches!(error, Error::DecodeFailure(CodecError::EmptyInput)));
//! assert_eq!(error.code().map(|c| c.as_u32()), Some(8_078_000));
//! ```

use crate::error_codes::ErrorCode;
use thiserror::Error;

/// Boxed error used for causes supplied by hooks and the network layer
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for exactrpc operations
///
/// Convenience alias using the exactrpc `Error` type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to decode JSON text
///
/// Always a local, recoverable signal. The offset is a byte offset into the
/// decoded text, pointing at the token where decoding stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The input was empty or whitespace only
    #[error("Cannot decode empty input")]
    EmptyInput,

    /// The input is not valid JSON
    #[error("Malformed JSON at byte {offset}: {reason}")]
    MalformedJson {
        /// Byte offset of the offending token
        offset: usize,
        /// Short description of what was expected
        reason: &'static str,
    },
}

impl CodecError {
    pub(crate) fn malformed(offset: usize, reason: &'static str) -> Self {
        CodecError::MalformedJson { offset, reason }
    }
}

/// A value that a standard JSON serializer cannot represent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A big integer outside the 64-bit range `serde_json` can write exactly
    #[error("Integer {0} does not fit a 64-bit JSON number")]
    BigIntOutOfRange(String),

    /// NaN or an infinity
    #[error("Non-finite number has no JSON representation")]
    NonFiniteNumber,
}

/// Outcome of a failed transport call
///
/// Every stage of a call maps to exactly one variant, carrying the context
/// needed to act on it (header names, status and body, underlying cause).
#[derive(Debug, Error)]
pub enum Error {
    /// Caller-configured headers include names the transport controls
    ///
    /// Raised before any network activity.
    #[error("HTTP header(s) forbidden: {}", .headers.join(", "))]
    HeaderForbidden {
        /// Offending header names, lower-cased and sorted
        headers: Vec<String>,
    },

    /// The encode hook failed; its error is passed through unchanged
    #[error("Failed to encode request: {0}")]
    Encode(#[source] BoxError),

    /// No response was obtained (DNS, connection refused, TLS, timeout)
    #[error("Network failure: {0}")]
    NetworkFailure(#[source] BoxError),

    /// A response arrived with a non-success status
    ///
    /// The body is the raw response text; it is not decoded since it may
    /// not even be JSON.
    #[error("HTTP error ({status}): {body}")]
    HttpError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// The decode hook rejected the response body
    #[error("Failed to decode response: {0}")]
    DecodeFailure(#[from] CodecError),

    /// The caller cancelled the call before it completed
    #[error("Request cancelled")]
    Cancelled,

    /// Invalid transport configuration (URL, timeout, environment)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Stable catalog code for this failure, where one exists
    ///
    /// Codes are suitable for cross-process reporting and log aggregation.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::HeaderForbidden { .. } => Some(ErrorCode::RPC_TRANSPORT_HEADER_FORBIDDEN),
            Error::HttpError { .. } => Some(ErrorCode::RPC_TRANSPORT_HTTP_ERROR),
            Error::DecodeFailure(CodecError::EmptyInput) => {
                Some(ErrorCode::CODECS_CANNOT_DECODE_EMPTY_BYTE_ARRAY)
            }
            _ => None,
        }
    }

    /// Short, stable label for the failure kind (used as a metrics attribute)
    pub fn kind(&self) -> &'static str {
        match self {
            Error::HeaderForbidden { .. } => "header_forbidden",
            Error::Encode(_) => "encode",
            Error::NetworkFailure(_) => "network",
            Error::HttpError { .. } => "http",
            Error::DecodeFailure(_) => "decode",
            Error::Cancelled => "cancelled",
            Error::Config(_) => "config",
        }
    }
}
