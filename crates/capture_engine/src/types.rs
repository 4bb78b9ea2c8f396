pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureResult {
    Success { path: String },
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CaptureCompleted {
        generation: Generation,
        result: CaptureResult,
    },
}

/// Failure to talk to the capture engine, as opposed to the engine reporting
/// a failed capture.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("could not build http client: {0}")]
    Client(String),
    #[error("capture engine unreachable: {0}")]
    Unreachable(String),
    #[error("capture engine timed out: {0}")]
    Timeout(String),
    #[error("capture engine returned http status {status}")]
    HttpStatus { status: u16 },
    #[error("malformed engine reply: {0}")]
    MalformedReply(String),
    #[error("could not encode capture request: {0}")]
    Encode(String),
    #[error("capture runtime unavailable: {0}")]
    RuntimeUnavailable(String),
}
