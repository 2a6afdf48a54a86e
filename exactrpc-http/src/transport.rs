//! JSON-RPC over HTTP transport
//!
//! [`HttpTransport`] turns an [`RpcRequest`] into one HTTP POST and the
//! response into a [`Value`]. Each call goes through the same stages:
//!
//! 1. Check the configured headers against the header policy
//! 2. Take a fresh id and build the envelope
//! 3. Encode with the configured hooks
//! 4. POST the body with the configured and required headers
//! 5. Classify the outcome: no response, non-2xx status, or a body to decode
//!
//! Each stage fails with its own `Error` variant and nothing is retried.
//!
//! # Cloning
//!
//! `HttpTransport` is an `Arc` handle. Clones share the hooks, the exchange
//! and the id generator, so ids stay unique across every clone.

use crate::exchange::{HttpExchange, HttpRequest};
use crate::headers;
use crate::hooks::JsonHooks;
use crate::metrics::TransportMetrics;
use crate::transport_builder::TransportBuilder;
use exactrpc_core::{BoxError, Envelope, Error, IdGenerator, Result, RpcRequest, Value};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// JSON-RPC client over HTTP POST
#[derive(Clone)]
pub struct HttpTransport {
    inner: Arc<Inner>,
}

struct Inner {
    url: String,
    headers: Vec<(String, String)>,
    hooks: Arc<dyn JsonHooks>,
    exchange: Arc<dyn HttpExchange>,
    timeout: Option<Duration>,
    ids: IdGenerator,
    metrics: Option<Arc<TransportMetrics>>,
}

impl HttpTransport {
    /// Start configuring a transport for `url`
    pub fn builder(url: impl Into<String>) -> TransportBuilder {
        TransportBuilder::new(url)
    }

    pub(crate) fn from_parts(
        url: String,
        headers: Vec<(String, String)>,
        hooks: Arc<dyn JsonHooks>,
        exchange: Arc<dyn HttpExchange>,
        timeout: Option<Duration>,
        metrics: Option<Arc<TransportMetrics>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                url,
                headers,
                hooks,
                exchange,
                timeout,
                ids: IdGenerator::new(),
                metrics,
            }),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Caller-configured headers, as given
    pub fn headers(&self) -> &[(String, String)] {
        &self.inner.headers
    }

    /// Issue one call
    ///
    /// # Errors
    ///
    /// - `HeaderForbidden` before any network activity if the configured
    ///   headers break the header policy
    /// - `Encode` if the encode hook fails
    /// - `NetworkFailure` if no response arrived (including the timeout)
    /// - `HttpError` for a non-2xx status; the decode hook is not called
    /// - `DecodeFailure` if the decode hook rejects the body
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use exactrpc_core::{RpcRequest, Value};
    /// use exactrpc_http::HttpTransport;
    ///
    /// # async fn example() -> exactrpc_core::Result<()> {
    /// let transport = HttpTransport::builder("https://api.mainnet-beta.solana.com").build()?;
    /// let response = transport
    ///     .send(RpcRequest::new("getSlot", Value::Null))
    ///     .await?;
    /// println!("{:?}", response.get("result"));
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send(&self, request: RpcRequest) -> Result<Value> {
        let start = Instant::now();
        let method = request.method_name.clone();

        let result = self.call(request).await;

        if let Some(ref m) = self.inner.metrics {
            let duration = start.elapsed().as_secs_f64();
            match &result {
                Ok(_) => m.record_request(&method, "success", duration),
                Err(e) => {
                    m.record_request(&method, "error", duration);
                    m.record_error(e.kind());
                }
            }
        }

        result
    }

    /// Issue one call that stops when `token` is cancelled
    ///
    /// Resolves to `Error::Cancelled` if the token fires first, or was
    /// already cancelled (in which case nothing is sent). The in-flight
    /// exchange is dropped, which aborts the HTTP request.
    pub async fn send_cancellable(
        &self,
        request: RpcRequest,
        token: &CancellationToken,
    ) -> Result<Value> {
        if token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let start = Instant::now();
        let method = request.method_name.clone();
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(method = %method, "Request cancelled");
                // The dropped `send` future never reaches its own metrics.
                if let Some(ref m) = self.inner.metrics {
                    m.record_request(&method, "cancelled", start.elapsed().as_secs_f64());
                    m.record_error(Error::Cancelled.kind());
                }
                Err(Error::Cancelled)
            }
            result = self.send(request) => result,
        }
    }

    #[tracing::instrument(skip(self, request), fields(method = %request.method_name, id = tracing::field::Empty))]
    async fn call(&self, request: RpcRequest) -> Result<Value> {
        let inner = &*self.inner;

        headers::validate(&inner.headers)?;

        let id = inner.ids.next();
        tracing::Span::current().record("id", id);
        let envelope = Envelope::build(request.method_name.as_str(), request.params.clone(), id);

        let body = inner
            .hooks
            .encode(&envelope, &request)
            .map_err(Error::Encode)?;

        if let Some(ref m) = inner.metrics {
            m.record_request_bytes(&request.method_name, body.len());
        }
        tracing::debug!(bytes = body.len(), "Sending request");

        let http_request = HttpRequest {
            url: inner.url.clone(),
            headers: headers::with_required(&inner.headers),
            body,
        };

        let exchange = inner.exchange.post(http_request);
        let outcome = match inner.timeout {
            Some(timeout) => tokio::time::timeout(timeout, exchange)
                .await
                .unwrap_or_else(|elapsed| Err(Box::new(elapsed) as BoxError)),
            None => exchange.await,
        };

        let response = outcome.map_err(|e| {
            tracing::warn!(error = %e, "Request failed before a response arrived");
            Error::NetworkFailure(e)
        })?;

        if let Some(ref m) = inner.metrics {
            m.record_response_bytes(&request.method_name, response.body.len());
        }

        if !response.is_success() {
            tracing::warn!(status = response.status, "Server returned an error status");
            return Err(Error::HttpError {
                status: response.status,
                body: response.body,
            });
        }

        tracing::debug!(bytes = response.body.len(), "Response received");

        inner.hooks.decode(&response.body, &request).map_err(|e| {
            tracing::warn!(error = %e, "Failed to decode response");
            Error::DecodeFailure(e)
        })
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("url", &self.inner.url)
            .field(
                "headers",
                &self.inner.headers.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            )
            .field("timeout", &self.inner.timeout)
            .field("metrics", &self.inner.metrics.is_some())
            .finish()
    }
}
