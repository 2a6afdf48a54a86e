//! Header policy for outgoing RPC requests
//!
//! Callers may attach their own headers (API keys, tracing ids), but some
//! names belong to the transport or to the HTTP layer and are refused:
//!
//! - **Disallowed**: framing headers the transport sets itself (`accept`,
//!   `content-length`, `content-type`, `solana-client`)
//! - **Forbidden**: hop-by-hop and browser-controlled headers (`host`,
//!   `connection`, `cookie`, ...) plus anything starting with `proxy-` or
//!   `sec-`
//!
//! Names are compared case-insensitively.

use exactrpc_core::{Error, Result};
use std::collections::BTreeMap;

/// Value of the `accept` header on every request
pub const ACCEPT: &str = "application/json";

/// Value of the `content-type` header on every request
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Headers the transport sets itself. Sorted.
static DISALLOWED_HEADERS: &[&str] = &["accept", "content-length", "content-type", "solana-client"];

/// Headers an HTTP client must control. Sorted.
static FORBIDDEN_HEADERS: &[&str] = &[
    "accept-charset",
    "access-control-request-headers",
    "access-control-request-method",
    "connection",
    "content-length",
    "cookie",
    "date",
    "dnt",
    "expect",
    "host",
    "keep-alive",
    "origin",
    "permissions-policy",
    "referer",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "via",
];

static FORBIDDEN_PREFIXES: &[&str] = &["proxy-", "sec-"];

/// `solana-client` header value identifying this library
pub fn solana_client() -> String {
    format!("rust/{}", env!("CARGO_PKG_VERSION"))
}

/// Whether a caller may set a header with this name
pub fn is_allowed(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    DISALLOWED_HEADERS.binary_search(&name.as_str()).is_err()
        && FORBIDDEN_HEADERS.binary_search(&name.as_str()).is_err()
        && !FORBIDDEN_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Reject configured headers the caller may not set
///
/// # Errors
///
/// `Error::HeaderForbidden` listing every offending name, lower-cased,
/// sorted and de-duplicated.
pub fn validate(headers: &[(String, String)]) -> Result<()> {
    let mut offending: Vec<String> = headers
        .iter()
        .filter(|(name, _)| !is_allowed(name))
        .map(|(name, _)| name.to_ascii_lowercase())
        .collect();

    if offending.is_empty() {
        return Ok(());
    }

    offending.sort();
    offending.dedup();
    Err(Error::HeaderForbidden { headers: offending })
}

/// Configured headers with lower-cased names, plus the required framing
/// headers. On a name clash the required value wins; among configured
/// headers the last one does.
pub fn with_required(headers: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged: BTreeMap<String, String> = headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect();

    merged.insert("accept".to_string(), ACCEPT.to_string());
    merged.insert("content-type".to_string(), CONTENT_TYPE.to_string());
    merged.insert("solana-client".to_string(), solana_client());

    merged.into_iter().collect()
}
