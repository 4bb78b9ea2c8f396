use std::fmt;

use serde::{Deserialize, Serialize};

/// Body sent to the capture engine. `hiddenElements` carries the raw
/// comma-separated text; the engine does its own splitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureInvocation {
    pub url: String,
    pub hidden_elements: String,
    pub browser: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<WireCredentials>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for WireCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureReply {
    pub success: bool,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl CaptureReply {
    pub fn success(path: impl Into<String>) -> Self {
        Self {
            success: true,
            path: Some(path.into()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            path: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invocation(auth: Option<WireCredentials>) -> CaptureInvocation {
        CaptureInvocation {
            url: "https://example.com".to_string(),
            hidden_elements: ".a, .b".to_string(),
            browser: "Chrome".to_string(),
            auth,
        }
    }

    #[test]
    fn auth_is_absent_from_wire_when_none() {
        let value = serde_json::to_value(invocation(None)).unwrap();
        assert_eq!(
            value,
            json!({
                "url": "https://example.com",
                "hiddenElements": ".a, .b",
                "browser": "Chrome",
            })
        );
    }

    #[test]
    fn auth_is_nested_when_present() {
        let value = serde_json::to_value(invocation(Some(WireCredentials {
            username: "u".to_string(),
            password: "p".to_string(),
        })))
        .unwrap();
        assert_eq!(value["auth"], json!({"username": "u", "password": "p"}));
    }

    #[test]
    fn reply_fields_are_optional() {
        let reply: CaptureReply = serde_json::from_str(r#"{"success": true, "path": "/x.png"}"#).unwrap();
        assert_eq!(reply, CaptureReply::success("/x.png"));
        let reply: CaptureReply = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(reply.error, None);
    }
}
