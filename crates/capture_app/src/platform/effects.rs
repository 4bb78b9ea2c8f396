use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use capture_core::{CaptureRequest, Effect, Msg};
use capture_engine::{
    CaptureEngine, CaptureInvocation, CaptureSettings, EngineEvent, EngineHandle,
    HttpCaptureEngine, WireCredentials,
};
use capture_logging::capture_info;

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: CaptureSettings, event_tx: mpsc::Sender<AppEvent>) -> Self {
        capture_info!("Capture engine endpoint {}", settings.endpoint);
        Self::with_engine(Arc::new(HttpCaptureEngine::new(settings)), event_tx)
    }

    pub fn with_engine(engine: Arc<dyn CaptureEngine>, event_tx: mpsc::Sender<AppEvent>) -> Self {
        let runner = Self {
            engine: EngineHandle::with_engine(engine),
        };
        runner.spawn_event_loop(event_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Capture {
                    generation,
                    request,
                } => {
                    self.engine.capture(generation, to_invocation(request));
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    EngineEvent::CaptureCompleted { generation, result } => {
                        Msg::CaptureFinished {
                            generation,
                            result: map_result(result),
                        }
                    }
                };
                if event_tx.send(AppEvent::Msg(msg)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn to_invocation(request: CaptureRequest) -> CaptureInvocation {
    CaptureInvocation {
        url: request.target_url,
        hidden_elements: request.hidden_elements_text,
        browser: request.browser.as_str().to_string(),
        auth: request.auth.map(|creds| WireCredentials {
            username: creds.username,
            password: creds.password,
        }),
    }
}

fn map_result(result: capture_engine::CaptureResult) -> capture_core::CaptureResult {
    match result {
        capture_engine::CaptureResult::Success { path } => {
            capture_core::CaptureResult::Success { path }
        }
        capture_engine::CaptureResult::Failure { message } => {
            capture_core::CaptureResult::Failure { message }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use capture_core::{Browser, Credentials};
    use capture_engine::{CaptureReply, TransportError};

    struct ScriptedEngine {
        reply: Result<CaptureReply, TransportError>,
    }

    #[async_trait::async_trait]
    impl CaptureEngine for ScriptedEngine {
        async fn invoke(
            &self,
            _invocation: &CaptureInvocation,
        ) -> Result<CaptureReply, TransportError> {
            self.reply.clone()
        }
    }

    fn run_one(reply: Result<CaptureReply, TransportError>, generation: u64) -> Msg {
        let (event_tx, event_rx) = mpsc::channel();
        let runner = EffectRunner::with_engine(Arc::new(ScriptedEngine { reply }), event_tx);
        runner.enqueue(vec![Effect::Capture {
            generation,
            request: request(None),
        }]);

        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match event_rx.recv_timeout(remaining) {
                Ok(AppEvent::Msg(msg)) => return msg,
                Ok(_) => continue,
                Err(err) => panic!("no capture reply delivered: {err}"),
            }
        }
    }

    #[test]
    fn engine_success_reaches_the_app_with_its_generation() {
        assert_eq!(
            run_one(Ok(CaptureReply::success("/tmp/shot.png")), 4),
            Msg::CaptureFinished {
                generation: 4,
                result: capture_core::CaptureResult::Success {
                    path: "/tmp/shot.png".to_string()
                },
            }
        );
    }

    #[test]
    fn transport_fault_reaches_the_app_as_failure() {
        let msg = run_one(
            Err(TransportError::Unreachable("connection refused".to_string())),
            9,
        );
        assert_eq!(
            msg,
            Msg::CaptureFinished {
                generation: 9,
                result: capture_core::CaptureResult::Failure {
                    message: "capture engine unreachable: connection refused".to_string()
                },
            }
        );
    }

    fn request(auth: Option<Credentials>) -> CaptureRequest {
        CaptureRequest {
            target_url: "https://example.com".to_string(),
            auth,
            hidden_selectors: vec![".header".to_string(), ".ads".to_string()],
            hidden_elements_text: " .header , , .ads".to_string(),
            browser: Browser::Safari,
        }
    }

    #[test]
    fn invocation_carries_raw_selector_text() {
        let invocation = to_invocation(request(None));
        assert_eq!(invocation.url, "https://example.com");
        assert_eq!(invocation.hidden_elements, " .header , , .ads");
        assert_eq!(invocation.browser, "Safari");
        assert_eq!(invocation.auth, None);
    }

    #[test]
    fn invocation_carries_credentials_when_enabled() {
        let invocation = to_invocation(request(Some(Credentials {
            username: "alice".to_string(),
            password: "secret".to_string(),
        })));
        assert_eq!(
            invocation.auth,
            Some(WireCredentials {
                username: "alice".to_string(),
                password: "secret".to_string(),
            })
        );
    }
}
