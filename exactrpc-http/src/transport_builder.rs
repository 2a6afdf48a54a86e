//! Transport builder
//!
//! `TransportBuilder` collects everything an `HttpTransport` needs before
//! the first call:
//!
//! - Endpoint URL and extra headers
//! - Encode/decode hooks (default: `PrecisionHooks`)
//! - Network exchange (default: `ReqwestExchange`)
//! - Request timeout
//! - Observability (OpenTelemetry) and the service name reported with it
//!
//! # Examples
//!
//! ```rust,no_run
//! use exactrpc_http::{ProtocolAwareHooks, TransportBuilder};
//! use std::time::Duration;
//!
//! # fn example() -> exactrpc_core::Result<()> {
//! let transport = TransportBuilder::new("https://api.devnet.solana.com")
//!     .header("x-api-key", "secret")
//!     .hooks(ProtocolAwareHooks)
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! // Or from EXACTRPC_URL / EXACTRPC_TIMEOUT_SECS
//! let from_env = TransportBuilder::from_env()?.build()?;
//! # Ok(())
//! # }
//! ```

use crate::exchange::{HttpExchange, ReqwestExchange};
use crate::hooks::{JsonHooks, PrecisionHooks};
use crate::metrics::TransportMetrics;
use crate::transport::HttpTransport;
use exactrpc_core::{Error, ObservabilityConfig, Result};
use std::sync::Arc;
use std::time::Duration;

/// Environment variable holding the endpoint URL
pub const URL_ENV: &str = "EXACTRPC_URL";

/// Environment variable holding the request timeout in whole seconds
pub const TIMEOUT_ENV: &str = "EXACTRPC_TIMEOUT_SECS";

/// Builder for configuring and creating an `HttpTransport`
pub struct TransportBuilder {
    url: String,
    headers: Vec<(String, String)>,
    hooks: Option<Arc<dyn JsonHooks>>,
    exchange: Option<Arc<dyn HttpExchange>>,
    timeout: Option<Duration>,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
}

impl TransportBuilder {
    /// Create a new transport builder
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            hooks: None,
            exchange: None,
            timeout: None,
            observability_config: None,
            service_name: None,
        }
    }

    /// Builder seeded from `EXACTRPC_URL` (required) and
    /// `EXACTRPC_TIMEOUT_SECS` (optional)
    ///
    /// # Errors
    ///
    /// `Error::Config` if the URL is unset, or the timeout is set but is not
    /// a whole number of seconds.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = lookup(URL_ENV)
            .ok_or_else(|| Error::Config(format!("{} environment variable is required", URL_ENV)))?;

        let mut builder = Self::new(url);
        if let Some(val) = lookup(TIMEOUT_ENV) {
            let secs: u64 = val.trim().parse().map_err(|_| {
                Error::Config(format!("{} must be a valid integer, got: '{}'", TIMEOUT_ENV, val))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder)
    }

    /// Add a header sent with every request
    ///
    /// Names are checked against the header policy when a call is made.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several headers
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Use custom encode/decode hooks
    pub fn hooks(self, hooks: impl JsonHooks + 'static) -> Self {
        self.shared_hooks(Arc::new(hooks))
    }

    /// Use hooks already behind an `Arc`
    pub fn shared_hooks(mut self, hooks: Arc<dyn JsonHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Use a custom network exchange instead of `ReqwestExchange`
    pub fn exchange(self, exchange: impl HttpExchange + 'static) -> Self {
        self.shared_exchange(Arc::new(exchange))
    }

    /// Use an exchange already behind an `Arc`
    pub fn shared_exchange(mut self, exchange: Arc<dyn HttpExchange>) -> Self {
        self.exchange = Some(exchange);
        self
    }

    /// Fail calls with `NetworkFailure` when no response arrives in time
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the transport
    ///
    /// Does no network activity. Installs the global observability pipeline
    /// if one was configured.
    ///
    /// # Errors
    ///
    /// `Error::Config` if the URL is not an absolute `http`/`https` URL, the
    /// default HTTP client cannot be built, or observability fails to start.
    pub fn build(self) -> Result<HttpTransport> {
        validate_url(&self.url)?;

        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }
            exactrpc_core::init_observability(config.clone())?;
            Some(Arc::new(TransportMetrics::new(config.service_name)))
        } else {
            None
        };

        let hooks = self.hooks.unwrap_or_else(|| Arc::new(PrecisionHooks));
        let exchange = match self.exchange {
            Some(exchange) => exchange,
            None => Arc::new(ReqwestExchange::new()?),
        };

        tracing::debug!(url = %self.url, headers = self.headers.len(), "Transport configured");

        Ok(HttpTransport::from_parts(
            self.url,
            self.headers,
            hooks,
            exchange,
            self.timeout,
            metrics,
        ))
    }
}

fn validate_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| Error::Config(format!("Invalid URL '{}': {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::Config(format!(
            "Unsupported URL scheme '{}': expected http or https",
            other
        ))),
    }
}
