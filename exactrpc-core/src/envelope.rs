//! JSON-RPC 2.0 request envelope
//!
//! Every outgoing call is wrapped in the standard envelope:
//!
//! ```text
//! {"jsonrpc":"2.0","id":<int>,"method":<string>,"params":<value>}
//! ```
//!
//! The caller hands the transport an [`RpcRequest`] (method name plus
//! parameters). The transport assigns an id from its own [`IdGenerator`] and
//! builds the [`Envelope`]. Both are handed to the encode hook, so a hook can
//! make decisions based on the original request while serializing the
//! envelope.
//!
//! # Examples
//!
//! ```rust
//! use exactrpc_core::{Envelope, IdGenerator, RpcRequest, Value};
//!
//! let ids = IdGenerator::new();
//! let request = RpcRequest::new("getBalance", vec![Value::from("83astBRguLMdt2h5U1Tpdq5tjFoJ6noeGwaY3mDLVcri")]);
//! let envelope = Envelope::build(&request.method_name, request.params.clone(), ids.next());
//!
//! assert_eq!(envelope.id, 0);
//! assert!(envelope.encode().starts_with(r#"{"jsonrpc":"2.0","id":0,"method":"getBalance""#));
//! ```

use crate::codec;
use crate::value::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Protocol version carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// A call as issued by the caller, before it is wrapped
///
/// Passed unchanged to both hooks alongside the envelope or response body.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcRequest {
    /// Name of the remote method
    pub method_name: String,
    /// Method parameters, sent exactly as given
    pub params: Value,
}

impl RpcRequest {
    /// Create a request
    pub fn new(method_name: impl Into<String>, params: impl Into<Value>) -> Self {
        Self {
            method_name: method_name.into(),
            params: params.into(),
        }
    }
}

/// The wire-level request object
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Always `"2.0"`
    pub jsonrpc: &'static str,
    /// Per-call identifier
    pub id: u64,
    /// Remote method name
    pub method: String,
    /// Parameters; `Null` is kept and written as `"params":null`
    pub params: Value,
}

impl Envelope {
    /// Wrap a method call
    pub fn build(method_name: impl Into<String>, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method: method_name.into(),
            params,
        }
    }

    /// The envelope as a `Value::Object` with keys `jsonrpc, id, method, params`
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(4);
        map.insert("jsonrpc".to_string(), Value::from(self.jsonrpc));
        map.insert("id".to_string(), Value::from(self.id));
        map.insert("method".to_string(), Value::from(self.method.as_str()));
        map.insert("params".to_string(), self.params.clone());
        Value::Object(map)
    }

    /// Serialize with the precision codec
    pub fn encode(&self) -> String {
        codec::encode(&self.to_value())
    }
}

/// Monotonic request-id source
///
/// One generator belongs to one transport. Ids start at zero and are never
/// repeated for the lifetime of the generator, even when `next` is called
/// from many tasks at once.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next id
    pub fn next(&self) -> u64 {
        // Uniqueness only needs atomicity, not ordering with other memory.
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}
