//! Capture engine client: wire contract, transport and the background handle.
mod client;
mod engine;
mod http;
mod types;
mod wire;

pub use client::{CaptureClient, BUSY_MESSAGE};
pub use engine::EngineHandle;
pub use http::{CaptureEngine, CaptureSettings, HttpCaptureEngine};
pub use types::{CaptureResult, EngineEvent, Generation, TransportError};
pub use wire::{CaptureInvocation, CaptureReply, WireCredentials};
