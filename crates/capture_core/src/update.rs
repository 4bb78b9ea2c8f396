use capture_logging::{capture_debug, capture_info, capture_warn, redact_url};

use crate::{build_request, AppState, CaptureResult, Effect, Msg, Status};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(value) => {
            state.fields_mut().set_url(value);
            Vec::new()
        }
        Msg::ProtocolChanged(protocol) => {
            state.fields_mut().set_protocol(protocol);
            Vec::new()
        }
        Msg::AuthToggled(enabled) => {
            state.fields_mut().set_auth_enabled(enabled);
            Vec::new()
        }
        Msg::UsernameChanged(value) => {
            state.fields_mut().set_username(value);
            Vec::new()
        }
        Msg::PasswordChanged(value) => {
            state.fields_mut().set_password(value);
            Vec::new()
        }
        Msg::HiddenElementsChanged(text) => {
            state.fields_mut().set_hidden_elements_text(text);
            Vec::new()
        }
        Msg::BrowserSelected(name) => {
            let mut fields = state.fields().clone();
            if fields.set_browser_name(&name) {
                *state.fields_mut() = fields;
            }
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::CaptureFinished { generation, result } => {
            if generation != state.generation() || !state.status().is_pending() {
                capture_debug!(
                    "Dropping stale capture result generation={} current={}",
                    generation,
                    state.generation()
                );
                return (state, Vec::new());
            }
            let status = match result {
                CaptureResult::Success { path } => {
                    capture_info!("Capture {} saved to {}", generation, path);
                    Status::Succeeded(path)
                }
                CaptureResult::Failure { message } => {
                    capture_warn!("Capture {} failed: {}", generation, message);
                    Status::Failed(message)
                }
            };
            state.set_status(status);
            Vec::new()
        }
    };

    (state, effects)
}

fn submit(state: &mut AppState) -> Vec<Effect> {
    // One capture at a time: the submit control is disabled while pending.
    if state.status().is_pending() {
        capture_debug!("Submit ignored; capture {} still pending", state.generation());
        return Vec::new();
    }

    match build_request(state.fields()) {
        Ok(request) => {
            let generation = state.begin_capture();
            capture_info!(
                "Submitting capture {} url={} browser={} selectors={} auth={}",
                generation,
                redact_url(&request.target_url),
                request.browser,
                request.hidden_selectors.len(),
                request.auth.is_some()
            );
            vec![Effect::Capture {
                generation,
                request,
            }]
        }
        Err(err) => {
            capture_info!("Submission rejected: {}", err);
            state.set_status(Status::Failed(err.to_string()));
            Vec::new()
        }
    }
}
