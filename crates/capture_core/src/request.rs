use std::fmt;

use crate::{Browser, FieldModel, Protocol};

/// Basic-auth credentials forwarded to the capture engine as entered.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One fully validated capture submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Always starts with exactly one of `http://` or `https://`.
    pub target_url: String,
    /// Present iff auth was enabled when the request was built.
    pub auth: Option<Credentials>,
    pub hidden_selectors: Vec<String>,
    /// Raw selector text as typed; this is what the engine receives.
    pub hidden_elements_text: String,
    pub browser: Browser,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("URL required")]
    EmptyUrl,
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Builds a request from the current field values. Pure and deterministic.
pub fn build_request(fields: &FieldModel) -> Result<CaptureRequest, ValidationError> {
    let target_url = compose_target_url(fields.protocol(), fields.url())?;

    let auth = fields.use_auth().then(|| Credentials {
        username: fields.username().to_string(),
        password: fields.password().to_string(),
    });

    Ok(CaptureRequest {
        target_url,
        auth,
        hidden_selectors: split_selectors(fields.hidden_elements_text()),
        hidden_elements_text: fields.hidden_elements_text().to_string(),
        browser: fields.browser(),
    })
}

/// Splits comma-separated selector text, trimming pieces and dropping empty
/// ones. Order and duplicates are kept.
pub fn split_selectors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn compose_target_url(protocol: Protocol, raw: &str) -> Result<String, ValidationError> {
    let rest = strip_schemes(raw.trim());
    if rest.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let target = format!("{}{}", protocol.as_str(), rest);
    let parsed =
        url::Url::parse(&target).map_err(|err| ValidationError::InvalidUrl(err.to_string()))?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidUrl("missing host".to_string()));
    }
    Ok(target)
}

/// Removes every pasted `http://` or `https://` prefix, and any leading
/// slashes, so the selected protocol is the only scheme in the composed URL.
fn strip_schemes(raw: &str) -> &str {
    let mut rest = raw;
    loop {
        let stripped = strip_scheme(rest).trim_start().trim_start_matches('/');
        if stripped.len() == rest.len() {
            return rest;
        }
        rest = stripped;
    }
}

fn strip_scheme(raw: &str) -> &str {
    for protocol in Protocol::ALL {
        let prefix = protocol.as_str();
        if raw.len() >= prefix.len()
            && raw.is_char_boundary(prefix.len())
            && raw[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return &raw[prefix.len()..];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_scheme_handles_mixed_case() {
        assert_eq!(strip_scheme("HTTPS://example.com"), "example.com");
        assert_eq!(strip_scheme("http://example.com"), "example.com");
        assert_eq!(strip_scheme("example.com"), "example.com");
        assert_eq!(strip_scheme("ht"), "ht");
    }

    #[test]
    fn strip_schemes_removes_stacked_prefixes() {
        assert_eq!(strip_schemes("http://https://example.com"), "example.com");
        assert_eq!(strip_schemes("https:// HTTP://x/y"), "x/y");
        assert_eq!(strip_schemes("//example.com"), "example.com");
        assert_eq!(strip_schemes("example.com//a"), "example.com//a");
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }
}
