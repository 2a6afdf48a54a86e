//! Round trips through the top-level re-exports against an in-process node
//! that echoes the first param back as the result.

use async_trait::async_trait;
use exactrpc::core::BoxError;
use exactrpc::{
    codec, BigInt, Error, HttpExchange, HttpRequest, HttpResponse, HttpTransport,
    ProtocolAwareHooks, RpcRequest, Value,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

struct EchoNode {
    delay: Option<Duration>,
    released: Arc<AtomicBool>,
}

impl EchoNode {
    fn new(delay: Option<Duration>) -> Self {
        Self {
            delay,
            released: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Marks the node's in-flight request as released when dropped
struct Inflight(Arc<AtomicBool>);

impl Drop for Inflight {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpExchange for EchoNode {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let _inflight = Inflight(self.released.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let envelope = codec::decode(&request.body)?;
        let result = envelope
            .get("params")
            .and_then(|p| p.get_index(0))
            .cloned()
            .unwrap_or(Value::Null);
        let id = envelope.get("id").cloned().unwrap_or(Value::Null);
        let response: Value = vec![
            ("jsonrpc", Value::from("2.0")),
            ("result", result),
            ("id", id),
        ]
        .into_iter()
        .collect();
        Ok(HttpResponse {
            status: 200,
            body: codec::encode(&response),
        })
    }
}

fn transport() -> HttpTransport {
    HttpTransport::builder("http://echo.local")
        .exchange(EchoNode::new(None))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_big_integers_round_trip_exactly() {
    let transport = transport();
    let big = BigInt::parse("-170141183460469231731687303715884105728").unwrap();

    let response = transport
        .send(RpcRequest::new("getBalance", vec![Value::BigInt(big.clone())]))
        .await
        .unwrap();

    assert_eq!(response.get("result"), Some(&Value::BigInt(big)));
    assert_eq!(response.get("id").and_then(Value::as_u64), Some(0));
}

#[tokio::test]
async fn test_threshold_boundary_through_transport() {
    let transport = transport();

    let at_limit = transport
        .send(RpcRequest::new("getSlot", vec![Value::from(9_007_199_254_740_992u64)]))
        .await
        .unwrap();
    assert_eq!(
        at_limit.get("result"),
        Some(&Value::SafeNumber(9_007_199_254_740_992.0))
    );

    let above = transport
        .send(RpcRequest::new("getSlot", vec![Value::from(9_007_199_254_740_993u64)]))
        .await
        .unwrap();
    assert_eq!(
        above.get("result").and_then(Value::as_u64),
        Some(9_007_199_254_740_993)
    );
    assert!(matches!(above.get("result"), Some(Value::BigInt(_))));
}

#[tokio::test]
async fn test_protocol_aware_hooks_through_root_crate() {
    let transport = HttpTransport::builder("http://echo.local")
        .exchange(EchoNode::new(None))
        .hooks(ProtocolAwareHooks)
        .build()
        .unwrap();
    let params = vec![Value::from(18_446_744_073_709_551_615u64)];

    let known = transport
        .send(RpcRequest::new("getBalance", params.clone()))
        .await
        .unwrap();
    assert!(matches!(known.get("result"), Some(Value::BigInt(_))));

    let foreign = transport
        .send(RpcRequest::new("searchAssets", params))
        .await
        .unwrap();
    assert!(matches!(foreign.get("result"), Some(Value::SafeNumber(_))));
}

#[tokio::test]
async fn test_cancel_slow_node() {
    let node = EchoNode::new(Some(Duration::from_secs(30)));
    let released = node.released.clone();
    let transport = HttpTransport::builder("http://echo.local")
        .exchange(node)
        .build()
        .unwrap();

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = transport
        .send_cancellable(RpcRequest::new("getSlot", Value::Null), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert!(released.load(Ordering::SeqCst));
}
