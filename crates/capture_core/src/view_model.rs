use crate::{Browser, FieldModel, Protocol, Status};

/// Render-ready snapshot of the form and its status line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub protocol: Protocol,
    pub url: String,
    pub use_auth: bool,
    pub username: String,
    pub password_len: usize,
    pub hidden_elements_text: String,
    pub browser: Browser,
    pub status: Status,
    pub status_text: String,
    pub submit_enabled: bool,
    /// Credential inputs are greyed out unless auth is on.
    pub auth_inputs_enabled: bool,
}

impl AppViewModel {
    pub(crate) fn from_state(fields: &FieldModel, status: &Status) -> Self {
        Self {
            protocol: fields.protocol(),
            url: fields.url().to_string(),
            use_auth: fields.use_auth(),
            username: fields.username().to_string(),
            password_len: fields.password().chars().count(),
            hidden_elements_text: fields.hidden_elements_text().to_string(),
            browser: fields.browser(),
            status: status.clone(),
            status_text: status_text(status),
            submit_enabled: !status.is_pending(),
            auth_inputs_enabled: fields.use_auth(),
        }
    }
}

pub fn status_text(status: &Status) -> String {
    match status {
        Status::Idle => "Ready".to_string(),
        Status::Pending => "Capturing screenshot...".to_string(),
        Status::Succeeded(path) => format!("Screenshot saved: {path}"),
        Status::Failed(message) => format!("Error: {message}"),
    }
}
