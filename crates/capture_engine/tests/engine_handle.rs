use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use capture_engine::{
    CaptureEngine, CaptureInvocation, CaptureReply, CaptureResult, EngineEvent, EngineHandle,
    TransportError,
};

struct EchoEngine;

#[async_trait]
impl CaptureEngine for EchoEngine {
    async fn invoke(
        &self,
        invocation: &CaptureInvocation,
    ) -> Result<CaptureReply, TransportError> {
        Ok(CaptureReply::success(format!("/shots/{}.png", invocation.browser)))
    }
}

fn wait_for_event(handle: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = handle.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "no engine event within deadline");
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn completed_capture_is_tagged_with_its_generation() {
    let handle = EngineHandle::with_engine(Arc::new(EchoEngine));
    assert!(handle.try_recv().is_none());

    handle.capture(
        3,
        CaptureInvocation {
            url: "https://example.com".to_string(),
            hidden_elements: String::new(),
            browser: "Edge".to_string(),
            auth: None,
        },
    );

    assert_eq!(
        wait_for_event(&handle),
        EngineEvent::CaptureCompleted {
            generation: 3,
            result: CaptureResult::Success {
                path: "/shots/Edge.png".to_string()
            },
        }
    );
}
