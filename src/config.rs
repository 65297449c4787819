//! Backend connection configuration

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

/// Default pause between an archive toggle and the inbox reload.
pub const DEFAULT_ARCHIVE_DELAY: Duration = Duration::from_millis(1000);

/// Connection and behaviour settings for the webmail backend
#[derive(Debug, Clone)]
pub struct WebmailConfig {
    pub base_url: String,
    pub archive_delay: Duration,
    pub accept_invalid_certs: bool,
}

impl WebmailConfig {
    /// Configuration for `base_url` with default settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            archive_delay: DEFAULT_ARCHIVE_DELAY,
            accept_invalid_certs: false,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads from `.env` file if present. All variables are optional:
    /// - `WEBMAIL_URL` (default: `http://127.0.0.1:8000`)
    /// - `WEBMAIL_ARCHIVE_DELAY_MS` (default: `1000`)
    /// - `WEBMAIL_ACCEPT_INVALID_CERTS` (default: `false`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let archive_delay_ms: u64 = env::var("WEBMAIL_ARCHIVE_DELAY_MS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .map_err(|e| Error::Config(format!("Invalid WEBMAIL_ARCHIVE_DELAY_MS: {e}")))?;

        let accept_invalid_certs = match env::var("WEBMAIL_ACCEPT_INVALID_CERTS") {
            Ok(value) => parse_flag(&value).ok_or_else(|| {
                Error::Config(format!("Invalid WEBMAIL_ACCEPT_INVALID_CERTS: {value}"))
            })?,
            Err(_) => false,
        };

        Ok(Self {
            base_url: env::var("WEBMAIL_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
            archive_delay: Duration::from_millis(archive_delay_ms),
            accept_invalid_certs,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
