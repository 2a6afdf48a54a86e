//! Network exchange capability
//!
//! The transport needs exactly one network operation: POST a body with some
//! headers and get back a status and a body. [`HttpExchange`] is that
//! operation as a trait, so tests (or callers with their own HTTP stack) can
//! supply it. [`ReqwestExchange`] is the default, backed by `reqwest`.

use async_trait::async_trait;
use exactrpc_core::{BoxError, Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

/// An outgoing POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Target URL
    pub url: String,
    /// Header names (lower-cased) and values
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: String,
}

/// A response, successful or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// "Send bytes, receive status and body"
///
/// An `Err` means no complete response was obtained (DNS, refused
/// connection, TLS, timeout, or a failure while reading the body). A
/// non-2xx status is still an `Ok` response.
#[async_trait]
pub trait HttpExchange: Send + Sync {
    /// Perform one POST
    async fn post(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError>;
}

/// `HttpExchange` over a shared `reqwest::Client`
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestExchange {
    client: reqwest::Client,
}

impl ReqwestExchange {
    /// Client with rustls TLS and no request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Client with rustls TLS and an optional whole-request timeout
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn header_map(headers: &[(String, String)]) -> std::result::Result<HeaderMap, BoxError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        map.insert(
            HeaderName::from_bytes(name.as_bytes())?,
            HeaderValue::from_str(value)?,
        );
    }
    Ok(map)
}

#[async_trait]
impl HttpExchange for ReqwestExchange {
    async fn post(&self, request: HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
        let headers = header_map(&request.headers)?;

        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(HttpResponse { status: 200, body: String::new() }.is_success());
        assert!(HttpResponse { status: 204, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 301, body: String::new() }.is_success());
        assert!(!HttpResponse { status: 500, body: String::new() }.is_success());
    }

    #[test]
    fn test_header_map_rejects_invalid_names() {
        let ok = header_map(&[("x-api-key".to_string(), "abc".to_string())]).unwrap();
        assert_eq!(ok.get("x-api-key").and_then(|v| v.to_str().ok()), Some("abc"));

        assert!(header_map(&[("bad name".to_string(), "v".to_string())]).is_err());
        assert!(header_map(&[("x-ok".to_string(), "line\nbreak".to_string())]).is_err());
    }

    #[test]
    fn test_build_clients() {
        assert!(ReqwestExchange::new().is_ok());
        assert!(ReqwestExchange::with_timeout(Some(Duration::from_secs(5))).is_ok());
        let _ = ReqwestExchange::from_client(reqwest::Client::new());
    }
}
