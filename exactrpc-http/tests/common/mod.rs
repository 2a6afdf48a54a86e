//! Common test utilities for exactrpc-http integration tests
//!
//! Provides a stub network exchange, recording hooks and a minimal HTTP/1.1
//! server so the transport can be exercised without a real RPC node.

#![allow(dead_code)]

use async_trait::async_trait;
use exactrpc_core::{BoxError, CodecError, Envelope, RpcRequest, Value};
use exactrpc_http::{HookError, HttpExchange, HttpRequest, HttpResponse, JsonHooks, PrecisionHooks};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// Exchange that answers every POST with a fixed status and body and
/// records what it was asked to send
pub struct StubExchange {
    status: u16,
    body: String,
    calls: Mutex<Vec<HttpRequest>>,
}

impl StubExchange {
    pub fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            status,
            body: body.into(),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Requests received so far
    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpExchange for StubExchange {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        self.calls.lock().unwrap().push(request);
        Ok(HttpResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Exchange that never completes
pub struct PendingExchange;

#[async_trait]
impl HttpExchange for PendingExchange {
    async fn post(&self, _request: HttpRequest) -> Result<HttpResponse, BoxError> {
        futures::future::pending().await
    }
}

/// Exchange that never completes and records whether its in-flight request
/// was started and later released
#[derive(Default)]
pub struct TrackedPendingExchange {
    started: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

impl TrackedPendingExchange {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

/// Sets its flag when the owning future is dropped
struct ReleaseGuard(Arc<AtomicBool>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpExchange for TrackedPendingExchange {
    async fn post(&self, _request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let _guard = ReleaseGuard(self.released.clone());
        self.started.store(true, Ordering::SeqCst);
        futures::future::pending().await
    }
}

/// Exchange that fails as if the connection was refused
pub struct RefusedExchange;

#[async_trait]
impl HttpExchange for RefusedExchange {
    async fn post(&self, _request: HttpRequest) -> Result<HttpResponse, BoxError> {
        Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )))
    }
}

/// Hooks that delegate to `PrecisionHooks` and record their inputs
#[derive(Default)]
pub struct RecordingHooks {
    pub encoded: Mutex<Vec<(Envelope, RpcRequest)>>,
    pub decoded: Mutex<Vec<(String, RpcRequest)>>,
    pub fail_encode: bool,
}

impl RecordingHooks {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_encode() -> Arc<Self> {
        Arc::new(Self {
            fail_encode: true,
            ..Self::default()
        })
    }

    pub fn decode_count(&self) -> usize {
        self.decoded.lock().unwrap().len()
    }
}

impl JsonHooks for RecordingHooks {
    fn encode(&self, envelope: &Envelope, request: &RpcRequest) -> Result<String, HookError> {
        self.encoded
            .lock()
            .unwrap()
            .push((envelope.clone(), request.clone()));
        if self.fail_encode {
            return Err("encode hook failed".into());
        }
        PrecisionHooks.encode(envelope, request)
    }

    fn decode(&self, body: &str, request: &RpcRequest) -> Result<Value, CodecError> {
        self.decoded
            .lock()
            .unwrap()
            .push((body.to_string(), request.clone()));
        PrecisionHooks.decode(body, request)
    }
}

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    /// Lower-cased header names
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Minimal HTTP/1.1 server answering every request with one canned response
pub struct MockHttpServer {
    addr: SocketAddr,
    shutdown_tx: mpsc::Sender<()>,
    request_rx: mpsc::Receiver<CapturedRequest>,
}

impl MockHttpServer {
    /// Start a server that replies with `status` and `body`
    pub async fn start(status: u16, body: impl Into<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = body.into();

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let (request_tx, request_rx) = mpsc::channel::<CapturedRequest>(100);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            let request_tx = request_tx.clone();
                            let body = body.clone();
                            tokio::spawn(async move {
                                if let Some(captured) = serve_one(stream, status, &body).await {
                                    let _ = request_tx.send(captured).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Self {
            addr,
            shutdown_tx,
            request_rx,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Next request the server received, or `None` after 5 seconds
    pub async fn next_request(&mut self) -> Option<CapturedRequest> {
        tokio::time::timeout(tokio::time::Duration::from_secs(5), self.request_rx.recv())
            .await
            .ok()
            .flatten()
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

async fn serve_one(mut stream: TcpStream, status: u16, body: &str) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut request_body = buf[head_end + 4..].to_vec();
    while request_body.len() < content_length {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        request_body.extend_from_slice(&chunk[..n]);
    }

    let reason = if (200..300).contains(&status) { "OK" } else { "Error" };
    let response = format!(
        "HTTP/1.1 {} {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await.ok()?;
    let _ = stream.shutdown().await;

    Some(CapturedRequest {
        method,
        path,
        headers,
        body: String::from_utf8_lossy(&request_body).to_string(),
    })
}

/// A JSON-RPC success response
pub fn mock_response(id: u64, result: serde_json::Value) -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": id
    })
    .to_string()
}

/// Address of a port nothing listens on
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
