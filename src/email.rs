//! Wire types exchanged with the email backend

use serde::{Deserialize, Serialize};

/// An email as returned by the backend.
///
/// The backend owns every field; the client only ever holds
/// short-lived copies fetched for a single view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: u64,
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    /// Already formatted for display by the backend.
    pub timestamp: String,
    pub read: bool,
    pub archived: bool,
}

impl Email {
    /// Recipients joined with `,`, the way the listing shows them.
    #[must_use]
    pub fn recipients_display(&self) -> String {
        self.recipients.join(",")
    }
}

/// Body of an email-creation request.
///
/// `recipients` is sent as typed; splitting and validating addresses
/// is the backend's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmail {
    pub recipients: String,
    pub subject: String,
    pub body: String,
}

/// Partial update of an email's flags. Unset fields are not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

impl EmailUpdate {
    #[must_use]
    pub const fn mark_read() -> Self {
        Self {
            read: Some(true),
            archived: None,
        }
    }

    #[must_use]
    pub const fn archived(archived: bool) -> Self {
        Self {
            read: None,
            archived: Some(archived),
        }
    }
}

/// How the backend answered an email-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SendOutcome {
    /// `{"message": ...}`
    Sent(String),
    /// `{"error": ...}`
    Rejected(String),
}

/// `{"error": ...}` payload shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

/// Either shape `GET /emails/{mailbox}` may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MailboxReply {
    Failure(ErrorReply),
    Emails(Vec<Email>),
}

/// Either shape `GET /emails/{id}` may answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EmailReply {
    Failure(ErrorReply),
    Email(Box<Email>),
}

/// Answer to `POST /emails`. `message` takes precedence when both are
/// present.
#[derive(Debug, Deserialize)]
pub struct SendReply {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl SendReply {
    pub fn into_outcome(self) -> Option<SendOutcome> {
        match (self.message, self.error) {
            (Some(message), _) => Some(SendOutcome::Sent(message)),
            (None, Some(error)) => Some(SendOutcome::Rejected(error)),
            (None, None) => None,
        }
    }
}
