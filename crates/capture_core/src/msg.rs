use crate::{CaptureResult, Generation, Protocol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the host/path part of the URL.
    UrlChanged(String),
    /// User picked a protocol from the selector.
    ProtocolChanged(Protocol),
    /// User flipped the basic-auth checkbox.
    AuthToggled(bool),
    UsernameChanged(String),
    PasswordChanged(String),
    /// Raw comma-separated selector text.
    HiddenElementsChanged(String),
    /// User picked a browser by name. Unknown names are ignored.
    BrowserSelected(String),
    /// User pressed the capture button.
    SubmitClicked,
    /// Engine reply (or transport fault) for a dispatched capture.
    CaptureFinished {
        generation: Generation,
        result: CaptureResult,
    },
}
