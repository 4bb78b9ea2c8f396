use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use capture_core::{Browser, FormDefaults, Protocol, UnknownBrowser, UnknownProtocol};
use capture_engine::CaptureSettings;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const CONFIG_FILENAME: &str = "capture_app.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error(transparent)]
    Protocol(#[from] UnknownProtocol),
    #[error(transparent)]
    Browser(#[from] UnknownBrowser),
}

/// Settings read from `capture_app.ron`. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub default_protocol: String,
    pub default_browser: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = CaptureSettings::default();
        Self {
            endpoint: settings.endpoint,
            default_protocol: Protocol::default().as_str().to_string(),
            default_browser: Browser::default().as_str().to_string(),
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub fn form_defaults(&self) -> Result<FormDefaults, ConfigError> {
        Ok(FormDefaults {
            protocol: self.default_protocol.parse()?,
            browser: self.default_browser.parse()?,
        })
    }

    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

/// Config path: first CLI argument, else `capture_app.ron` in the working dir.
pub fn config_path(arg: Option<String>) -> PathBuf {
    arg.map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

/// Loads the config file. A missing file is not an error.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
