//! Error types for webmail-client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered with an `{"error": ...}` payload.
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Form not ready: {0}")]
    FormNotReady(String),
}

pub type Result<T> = std::result::Result<T, Error>;
