//! Precision-preserving JSON and JSON-RPC building blocks for exactrpc
//!
//! Solana RPC responses carry slot numbers, lamport balances and timestamps
//! that can exceed the 2^53 range a double represents exactly. A standard
//! JSON decoder silently rounds them. This crate provides:
//!
//! - **Value**: a JSON tree in which every number is either a `SafeNumber`
//!   (an exact double) or a `BigInt` (exact decimal digits)
//! - **Codec**: a single-pass decoder and encoder that keep big integer
//!   literals digit-for-digit, plus a plain double-based codec
//! - **Envelope**: the JSON-RPC 2.0 request object and a per-transport id
//!   generator
//! - **Classifier**: whether a method belongs to the Solana RPC surface
//! - **Errors**: the error taxonomy shared with the HTTP transport, and the
//!   stable numeric error-code catalog
//! - **Observability**: tracing subscriber and OpenTelemetry setup
//!
//! The crate does no I/O of its own; `exactrpc-http` builds the transport
//! on top of it.
//!
//! # Example
//!
//! ```rust
//! use exactrpc_core::{codec, Value};
//!
//! let body = r#"{"jsonrpc":"2.0","result":{"value":18446744073709551615},"id":1}"#;
//! let response = codec::decode(body).unwrap();
//!
//! let lamports = response.get("result").and_then(|r| r.get("value")).unwrap();
//! assert_eq!(lamports.as_u64(), Some(u64::MAX));
//! assert_eq!(codec::encode(&response), body);
//! ```

pub mod classifier;
pub mod codec;
pub mod envelope;
pub mod error;
pub mod error_codes;
pub mod observability;
pub mod value;

pub use classifier::{is_known_method, is_known_request};
pub use envelope::{Envelope, IdGenerator, RpcRequest};
pub use error::{BoxError, CodecError, EncodeError, Error, Result};
pub use error_codes::{ErrorCode, ErrorNamespace};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use value::{BigInt, Map, Value};
