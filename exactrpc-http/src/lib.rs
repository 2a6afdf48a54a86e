//! JSON-RPC over HTTP with pluggable, precision-preserving JSON hooks
//!
//! This crate sends JSON-RPC 2.0 calls as HTTP POSTs. Serialization is
//! delegated to hooks, so big integers in Solana RPC payloads (slots,
//! lamport balances) can survive the round trip exactly.
//!
//! # Core Features
//!
//! - **Transport**: one call, one POST, one classified outcome
//! - **Hooks**: precision codec by default, plain JSON or per-method choice
//!   on request
//! - **Header policy**: caller headers checked against the forbidden set
//!   before anything is sent
//! - **Pluggable network**: `reqwest` by default, any `HttpExchange` in tests
//! - **Cancellation**: `send_cancellable` with a `CancellationToken`
//! - **Observability**: tracing spans per call and OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use exactrpc_core::{RpcRequest, Value};
//! use exactrpc_http::HttpTransport;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HttpTransport::builder("https://api.mainnet-beta.solana.com").build()?;
//!
//!     let params = vec![Value::from("83astBRguLMdt2h5U1Tpdq5tjFoJ6noeGwaY3mDLVcri")];
//!     let response = transport.send(RpcRequest::new("getBalance", params)).await?;
//!
//!     if let Some(lamports) = response.get("result").and_then(|r| r.get("value")) {
//!         println!("Balance: {:?}", lamports);
//!     }
//!     Ok(())
//! }
//! ```

mod exchange;
pub mod headers;
mod hooks;
mod metrics;
mod transport;
mod transport_builder;

pub use exchange::{HttpExchange, HttpRequest, HttpResponse, ReqwestExchange};
pub use hooks::{GenericHooks, HookError, JsonHooks, PrecisionHooks, ProtocolAwareHooks};
pub use metrics::TransportMetrics;
pub use transport::HttpTransport;
pub use transport_builder::{TransportBuilder, TIMEOUT_ENV, URL_ENV};
