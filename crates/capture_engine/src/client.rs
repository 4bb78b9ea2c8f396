use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use capture_logging::{capture_info, capture_warn, redact_url};

use crate::{CaptureEngine, CaptureInvocation, CaptureReply, CaptureResult};

pub const BUSY_MESSAGE: &str = "a capture is already in progress";

/// Owns the single in-flight call to a capture engine and folds every reply
/// or transport fault into a [`CaptureResult`].
pub struct CaptureClient {
    engine: Arc<dyn CaptureEngine>,
    in_flight: AtomicBool,
}

impl CaptureClient {
    pub fn new(engine: Arc<dyn CaptureEngine>) -> Self {
        Self {
            engine,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Runs one capture. No retries; a failure is terminal for this call.
    pub async fn submit(&self, invocation: &CaptureInvocation) -> CaptureResult {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            capture_warn!(
                "Rejecting capture of {}: {}",
                redact_url(&invocation.url),
                BUSY_MESSAGE
            );
            return CaptureResult::Failure {
                message: BUSY_MESSAGE.to_string(),
            };
        };

        match self.engine.invoke(invocation).await {
            Ok(reply) => map_reply(reply),
            Err(err) => {
                capture_warn!(
                    "Transport fault capturing {}: {}",
                    redact_url(&invocation.url),
                    err
                );
                CaptureResult::Failure {
                    message: err.to_string(),
                }
            }
        }
    }
}

fn map_reply(reply: CaptureReply) -> CaptureResult {
    match reply {
        CaptureReply {
            success: true,
            path: Some(path),
            ..
        } if !path.is_empty() => {
            capture_info!("Engine saved screenshot to {}", path);
            CaptureResult::Success { path }
        }
        CaptureReply { success: true, .. } => CaptureResult::Failure {
            message: "capture engine reported success without a file path".to_string(),
        },
        CaptureReply {
            success: false,
            error: Some(message),
            ..
        } if !message.is_empty() => CaptureResult::Failure { message },
        CaptureReply { success: false, .. } => CaptureResult::Failure {
            message: "capture engine reported an unspecified error".to_string(),
        },
    }
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
