use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use capture_engine::{
    CaptureClient, CaptureEngine, CaptureInvocation, CaptureReply, CaptureResult, TransportError,
    BUSY_MESSAGE,
};
use pretty_assertions::assert_eq;

struct ScriptedEngine {
    reply: Result<CaptureReply, TransportError>,
    delay: Duration,
    calls: Mutex<Vec<String>>,
}

impl ScriptedEngine {
    fn new(reply: Result<CaptureReply, TransportError>) -> Self {
        Self {
            reply,
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CaptureEngine for ScriptedEngine {
    async fn invoke(
        &self,
        invocation: &CaptureInvocation,
    ) -> Result<CaptureReply, TransportError> {
        self.calls.lock().unwrap().push(invocation.url.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.reply.clone()
    }
}

fn invocation() -> CaptureInvocation {
    CaptureInvocation {
        url: "https://example.com".to_string(),
        hidden_elements: String::new(),
        browser: "Chrome".to_string(),
        auth: None,
    }
}

#[tokio::test]
async fn success_reply_resolves_to_path() {
    let engine = Arc::new(ScriptedEngine::new(Ok(CaptureReply::success("/tmp/shot.png"))));
    let client = CaptureClient::new(engine.clone());

    let result = client.submit(&invocation()).await;
    assert_eq!(
        result,
        CaptureResult::Success {
            path: "/tmp/shot.png".to_string()
        }
    );
    assert_eq!(engine.call_count(), 1);
    assert!(!client.is_busy());
}

#[tokio::test]
async fn engine_failure_is_reported_verbatim() {
    let engine = Arc::new(ScriptedEngine::new(Ok(CaptureReply::failure("navigation timeout"))));
    let client = CaptureClient::new(engine);

    let result = client.submit(&invocation()).await;
    assert_eq!(
        result,
        CaptureResult::Failure {
            message: "navigation timeout".to_string()
        }
    );
}

#[tokio::test]
async fn transport_fault_becomes_failure_without_retry() {
    let engine = Arc::new(ScriptedEngine::new(Err(TransportError::Unreachable(
        "connection refused".to_string(),
    ))));
    let client = CaptureClient::new(engine.clone());

    let result = client.submit(&invocation()).await;
    assert_eq!(
        result,
        CaptureResult::Failure {
            message: "capture engine unreachable: connection refused".to_string()
        }
    );
    assert_eq!(engine.call_count(), 1);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_rejected() {
    let engine = Arc::new(ScriptedEngine {
        delay: Duration::from_millis(100),
        ..ScriptedEngine::new(Ok(CaptureReply::success("/tmp/shot.png")))
    });
    let client = CaptureClient::new(engine.clone());
    let request = invocation();

    let (first, second) = tokio::join!(client.submit(&request), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        client.submit(&request).await
    });

    assert!(matches!(first, CaptureResult::Success { .. }));
    assert_eq!(
        second,
        CaptureResult::Failure {
            message: BUSY_MESSAGE.to_string()
        }
    );
    assert_eq!(engine.call_count(), 1);

    // The slot frees once the first call completes.
    let third = client.submit(&request).await;
    assert!(matches!(third, CaptureResult::Success { .. }));
}
