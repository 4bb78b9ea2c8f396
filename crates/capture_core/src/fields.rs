use std::fmt;
use std::str::FromStr;

use capture_logging::capture_debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl Protocol {
    pub const ALL: [Protocol; 2] = [Protocol::Https, Protocol::Http];

    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "http://",
            Protocol::Https => "https://",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown protocol {0:?} (expected http:// or https://)")]
pub struct UnknownProtocol(pub String);

impl FromStr for Protocol {
    type Err = UnknownProtocol;

    /// Accepts `http`, `https`, with or without the `://` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_suffix("://").unwrap_or(trimmed);
        if bare.eq_ignore_ascii_case("http") {
            Ok(Protocol::Http)
        } else if bare.eq_ignore_ascii_case("https") {
            Ok(Protocol::Https)
        } else {
            Err(UnknownProtocol(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
    Edge,
    Safari,
}

impl Browser {
    pub const ALL: [Browser; 4] = [
        Browser::Chrome,
        Browser::Firefox,
        Browser::Edge,
        Browser::Safari,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
            Browser::Edge => "Edge",
            Browser::Safari => "Safari",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown browser {0:?} (expected one of Chrome, Firefox, Edge, Safari)")]
pub struct UnknownBrowser(pub String);

impl FromStr for Browser {
    type Err = UnknownBrowser;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Browser::ALL
            .into_iter()
            .find(|browser| browser.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownBrowser(s.to_string()))
    }
}

/// Initial values for a fresh form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormDefaults {
    pub protocol: Protocol,
    pub browser: Browser,
}

/// Current value of every form input. Nothing is validated here; the request
/// builder decides what is acceptable at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldModel {
    protocol: Protocol,
    url: String,
    use_auth: bool,
    username: String,
    password: String,
    hidden_elements_text: String,
    browser: Browser,
}

impl FieldModel {
    pub fn new(defaults: FormDefaults) -> Self {
        Self {
            protocol: defaults.protocol,
            browser: defaults.browser,
            ..Self::default()
        }
    }

    pub fn set_url(&mut self, value: impl Into<String>) {
        self.url = value.into();
    }

    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.protocol = protocol;
    }

    /// Disabling auth keeps the typed credentials so re-enabling restores them.
    pub fn set_auth_enabled(&mut self, enabled: bool) {
        self.use_auth = enabled;
    }

    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    pub fn set_hidden_elements_text(&mut self, text: impl Into<String>) {
        self.hidden_elements_text = text.into();
    }

    pub fn set_browser(&mut self, browser: Browser) {
        self.browser = browser;
    }

    /// Selects a browser by name. Unknown names leave the current choice in
    /// place and return `false`.
    pub fn set_browser_name(&mut self, name: &str) -> bool {
        match name.parse::<Browser>() {
            Ok(browser) => {
                self.browser = browser;
                true
            }
            Err(err) => {
                capture_debug!("Ignoring browser selection: {}", err);
                false
            }
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn use_auth(&self) -> bool {
        self.use_auth
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn hidden_elements_text(&self) -> &str {
        &self.hidden_elements_text
    }

    pub fn browser(&self) -> Browser {
        self.browser
    }
}
