//! Transport metrics
//!
//! OpenTelemetry instruments recorded by `HttpTransport` when observability
//! is enabled through `TransportBuilder::with_observability()`:
//!
//! - **requests_total**: calls completed, by method and outcome (counter)
//! - **request_duration**: call latency in seconds (histogram)
//! - **errors_total**: failed calls, by error kind (counter)
//! - **request_bytes** / **response_bytes**: body sizes (histograms)

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Instruments for one transport
pub struct TransportMetrics {
    /// Completed calls
    pub requests_total: Counter<u64>,
    /// Call duration in seconds
    pub request_duration: Histogram<f64>,
    /// Failed calls
    pub errors_total: Counter<u64>,
    /// Encoded request body size
    pub request_bytes: Histogram<u64>,
    /// Raw response body size
    pub response_bytes: Histogram<u64>,
}

impl TransportMetrics {
    /// Instruments from the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let meter = global::meter_with_scope(
            opentelemetry::InstrumentationScope::builder(service_name.into()).build(),
        );
        Self::new_with_meter(&meter)
    }

    /// Instruments from a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("exactrpc.http.requests.total")
                .with_description("Total number of RPC calls completed")
                .build(),
            request_duration: meter
                .f64_histogram("exactrpc.http.request.duration")
                .with_description("RPC call duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("exactrpc.http.errors.total")
                .with_description("Total number of failed RPC calls")
                .build(),
            request_bytes: meter
                .u64_histogram("exactrpc.http.request.bytes")
                .with_description("Encoded request body size")
                .with_unit("By")
                .build(),
            response_bytes: meter
                .u64_histogram("exactrpc.http.response.bytes")
                .with_description("Response body size")
                .with_unit("By")
                .build(),
        }
    }

    /// Record a finished call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failure by kind (see `Error::kind`)
    pub fn record_error(&self, kind: &'static str) {
        self.errors_total.add(1, &[KeyValue::new("error_kind", kind)]);
    }

    /// Record encoded request body size
    pub fn record_request_bytes(&self, method: &str, bytes: usize) {
        self.request_bytes
            .record(bytes as u64, &[KeyValue::new("method", method.to_string())]);
    }

    /// Record response body size
    pub fn record_response_bytes(&self, method: &str, bytes: usize) {
        self.response_bytes
            .record(bytes as u64, &[KeyValue::new("method", method.to_string())]);
    }
}
