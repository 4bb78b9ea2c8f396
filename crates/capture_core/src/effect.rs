use crate::{CaptureRequest, Generation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Dispatch one capture to the engine; the reply must come back tagged
    /// with the same generation.
    Capture {
        generation: Generation,
        request: CaptureRequest,
    },
}
