//! Capture core: field model, request builder and the pure status state machine.
mod effect;
mod fields;
mod msg;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use fields::{Browser, FieldModel, FormDefaults, Protocol, UnknownBrowser, UnknownProtocol};
pub use msg::Msg;
pub use request::{build_request, split_selectors, CaptureRequest, Credentials, ValidationError};
pub use state::{AppState, CaptureResult, Generation, Status};
pub use update::update;
pub use view_model::{status_text, AppViewModel};
