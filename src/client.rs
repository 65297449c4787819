//! HTTP client for the email backend

use crate::config::WebmailConfig;
use crate::email::{Email, EmailReply, EmailUpdate, ErrorReply, MailboxReply, NewEmail, SendOutcome, SendReply};
use crate::error::{Error, Result};
use crate::mailbox::Mailbox;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Client for the backend's `/emails` endpoints
///
/// Cheap to clone: clones share the same connection pool. Requests
/// carry no timeout and are never retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the backend at `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or cannot carry
    /// a path, or if the HTTP client cannot be built.
    pub fn new(config: &WebmailConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { http, base })
    }

    /// Fetch the emails of a mailbox, in the order the backend lists
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] if the backend answers with an error
    /// payload (e.g. an unknown mailbox), [`Error::Malformed`] if the
    /// answer is neither an error nor a list of emails, or
    /// [`Error::Http`] on transport failure.
    pub async fn list_mailbox(&self, mailbox: &Mailbox) -> Result<Vec<Email>> {
        let url = self.endpoint(&["emails", mailbox.as_str()])?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        match parse_body::<MailboxReply>(response, "mailbox listing").await? {
            MailboxReply::Emails(emails) => {
                info!("Loaded {} emails from {}", emails.len(), mailbox);
                Ok(emails)
            }
            MailboxReply::Failure(ErrorReply { error }) => Err(Error::Backend(error)),
        }
    }

    /// Fetch one email by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] if the backend reports an error (e.g.
    /// the email does not exist), [`Error::Malformed`] for any other
    /// unexpected shape, or [`Error::Http`] on transport failure.
    pub async fn get_email(&self, id: u64) -> Result<Email> {
        let url = self.endpoint(&["emails", &id.to_string()])?;
        debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        match parse_body::<EmailReply>(response, "email").await? {
            EmailReply::Email(email) => Ok(*email),
            EmailReply::Failure(ErrorReply { error }) => Err(Error::Backend(error)),
        }
    }

    /// Update the read and/or archived flags of an email.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] on a non-success status, or
    /// [`Error::Http`] on transport failure.
    pub async fn update_email(&self, id: u64, update: &EmailUpdate) -> Result<()> {
        let url = self.endpoint(&["emails", &id.to_string()])?;
        debug!("PUT {} {:?}", url, update);

        let response = self.http.put(url).json(update).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.bytes().await?;
        let message = serde_json::from_slice::<ErrorReply>(&body)
            .map_or_else(|_| format!("PUT failed with status {status}"), |e| e.error);
        Err(Error::Backend(message))
    }

    /// Create a new email.
    ///
    /// The HTTP status is not consulted: a `message` field means the
    /// email was sent, an `error` field means it was rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if the answer carries neither
    /// field, or [`Error::Http`] on transport failure.
    pub async fn send_email(&self, email: &NewEmail) -> Result<SendOutcome> {
        let url = self.endpoint(&["emails"])?;
        debug!("POST {} to {:?}", url, email.recipients);

        let response = self.http.post(url).json(email).send().await?;
        parse_body::<SendReply>(response, "send result")
            .await?
            .into_outcome()
            .ok_or_else(|| {
                Error::Malformed("send result has neither message nor error".to_string())
            })
    }

    // -- private helpers --

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("Base URL cannot carry a path: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Read a response body as JSON, whatever its status.
async fn parse_body<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;
    serde_json::from_slice(&body)
        .map_err(|e| Error::Malformed(format!("unexpected {what} (status {status}): {e}")))
}
