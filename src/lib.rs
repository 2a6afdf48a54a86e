//! exactrpc - precision-preserving JSON-RPC over HTTP
//!
//! This is the main convenience crate that re-exports the exactrpc sub-crates.
//! Use it if you want a single dependency for the value model, the codecs and
//! the HTTP transport.
//!
//! # Architecture
//!
//! exactrpc is organized into two crates:
//!
//! - **exactrpc-core**: value model, precision codec, JSON-RPC envelope,
//!   method classifier, errors, observability
//! - **exactrpc-http**: HTTP transport, encode/decode hooks, header policy,
//!   network exchange
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use exactrpc::{HttpTransport, RpcRequest, Value};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::builder("https://api.mainnet-beta.solana.com")
//!         .header("x-api-key", "secret")
//!         .build()?;
//!
//!     let response = transport.send(RpcRequest::new("getSlot", Value::Null)).await?;
//!     // Slots above 2^53 come back as `Value::BigInt`, digit for digit.
//!     println!("{}", exactrpc::codec::encode(&response));
//!     Ok(())
//! }
//! ```
//!
//! # Codec only
//!
//! ```rust
//! use exactrpc::{codec, Value};
//!
//! let value = codec::decode(r#"{"lamports":18446744073709551615}"#).unwrap();
//! assert!(matches!(value.get("lamports"), Some(Value::BigInt(_))));
//! assert_eq!(codec::encode(&value), r#"{"lamports":18446744073709551615}"#);
//! ```

pub use exactrpc_core as core;
pub use exactrpc_http as http;

pub use exactrpc_core::{
    codec, is_known_method, is_known_request, BigInt, CodecError, Envelope, Error, Map,
    ObservabilityConfig, Result, RpcRequest, Value,
};
pub use exactrpc_http::{
    GenericHooks, HttpExchange, HttpRequest, HttpResponse, HttpTransport, JsonHooks,
    PrecisionHooks, ProtocolAwareHooks, ReqwestExchange, TransportBuilder,
};
