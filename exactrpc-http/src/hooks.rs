//! Encode/decode hooks
//!
//! The transport never serializes or parses JSON itself. It hands the
//! envelope to [`JsonHooks::encode`] and the response body to
//! [`JsonHooks::decode`], passing the caller's original [`RpcRequest`] to
//! both so a hook can choose its behaviour per method.
//!
//! Three implementations ship with the crate:
//!
//! | hooks | encode | decode |
//! |---|---|---|
//! | [`PrecisionHooks`] (default) | precision codec | precision codec |
//! | [`GenericHooks`] | `serde_json` | `serde_json`, numbers as doubles |
//! | [`ProtocolAwareHooks`] | per method | per method |
//!
//! # Examples
//!
//! ```rust
//! use exactrpc_core::{Envelope, RpcRequest, Value};
//! use exactrpc_http::{JsonHooks, ProtocolAwareHooks};
//!
//! let hooks = ProtocolAwareHooks;
//! let request = RpcRequest::new("getBalance", Value::Null);
//!
//! let balance = hooks.decode(r#"{"value":9007199254740993}"#, &request).unwrap();
//! assert!(matches!(balance.get("value"), Some(Value::BigInt(_))));
//!
//! let foreign = RpcRequest::new("getAssetsByAuthority", Value::Null);
//! let asset = hooks.decode(r#"{"value":9007199254740993}"#, &foreign).unwrap();
//! assert!(matches!(asset.get("value"), Some(Value::SafeNumber(_))));
//! ```

use exactrpc_core::codec;
use exactrpc_core::{is_known_request, BoxError, CodecError, Envelope, RpcRequest, Value};

/// Error returned by an encode hook; surfaced unchanged as `Error::Encode`
pub type HookError = BoxError;

/// Serialization capability injected into the transport
///
/// Implementations must be shareable across tasks; the transport calls them
/// concurrently.
pub trait JsonHooks: Send + Sync {
    /// Produce the exact POST body for an envelope
    fn encode(&self, envelope: &Envelope, request: &RpcRequest) -> Result<String, HookError>;

    /// Parse a successful response body
    fn decode(&self, body: &str, request: &RpcRequest) -> Result<Value, CodecError>;
}

/// Precision codec in both directions
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecisionHooks;

impl JsonHooks for PrecisionHooks {
    fn encode(&self, envelope: &Envelope, _request: &RpcRequest) -> Result<String, HookError> {
        Ok(envelope.encode())
    }

    fn decode(&self, body: &str, _request: &RpcRequest) -> Result<Value, CodecError> {
        codec::decode(body)
    }
}

/// Standard double-based JSON in both directions
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericHooks;

impl JsonHooks for GenericHooks {
    fn encode(&self, envelope: &Envelope, _request: &RpcRequest) -> Result<String, HookError> {
        Ok(codec::generic::encode(&envelope.to_value())?)
    }

    fn decode(&self, body: &str, _request: &RpcRequest) -> Result<Value, CodecError> {
        codec::generic::decode(body)
    }
}

/// Precision codec for known Solana methods, generic JSON for the rest
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtocolAwareHooks;

impl JsonHooks for ProtocolAwareHooks {
    fn encode(&self, envelope: &Envelope, request: &RpcRequest) -> Result<String, HookError> {
        if is_known_request(request) {
            PrecisionHooks.encode(envelope, request)
        } else {
            GenericHooks.encode(envelope, request)
        }
    }

    fn decode(&self, body: &str, request: &RpcRequest) -> Result<Value, CodecError> {
        if is_known_request(request) {
            PrecisionHooks.decode(body, request)
        } else {
            GenericHooks.decode(body, request)
        }
    }
}
