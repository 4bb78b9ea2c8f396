use std::time::Duration;

use capture_logging::{capture_debug, capture_warn, redact_url};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{CaptureInvocation, CaptureReply, TransportError};

#[derive(Debug, Clone)]
pub struct CaptureSettings {
    /// Full URL of the engine's capture endpoint.
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Covers the whole capture; page loads and scrolling are slow.
    pub request_timeout: Duration,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:4780/take_screenshot".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// One request/response exchange with a capture engine.
#[async_trait::async_trait]
pub trait CaptureEngine: Send + Sync {
    async fn invoke(&self, invocation: &CaptureInvocation)
        -> Result<CaptureReply, TransportError>;
}

#[derive(Debug, Clone)]
pub struct HttpCaptureEngine {
    settings: CaptureSettings,
}

impl HttpCaptureEngine {
    pub fn new(settings: CaptureSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, TransportError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| TransportError::Client(err.to_string()))
    }
}

#[async_trait::async_trait]
impl CaptureEngine for HttpCaptureEngine {
    async fn invoke(
        &self,
        invocation: &CaptureInvocation,
    ) -> Result<CaptureReply, TransportError> {
        let body = serde_json::to_vec(invocation)
            .map_err(|err| TransportError::Encode(err.to_string()))?;
        let client = self.build_client()?;

        capture_debug!(
            "POST {} url={} browser={}",
            self.settings.endpoint,
            redact_url(&invocation.url),
            invocation.browser
        );
        let response = client
            .post(&self.settings.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        match serde_json::from_slice::<CaptureReply>(&bytes) {
            Ok(reply) => {
                if !status.is_success() {
                    capture_debug!("Engine replied with status {} and a valid body", status);
                }
                Ok(reply)
            }
            Err(_) if !status.is_success() => Err(TransportError::HttpStatus {
                status: status.as_u16(),
            }),
            Err(err) => {
                capture_warn!("Engine reply could not be decoded: {}", err);
                Err(TransportError::MalformedReply(err.to_string()))
            }
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::Timeout(err.to_string());
    }
    TransportError::Unreachable(err.to_string())
}
