//! Mailbox names
//!
//! Provides a strongly-typed enum for the backend's mailboxes instead
//! of raw strings. The three mailboxes the backend knows about have
//! dedicated variants; anything else is carried verbatim in `Other`
//! and left for the backend to reject.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, backend-filtered collection of emails.
///
/// # Examples
///
/// ```
/// use webmail_client::Mailbox;
///
/// let inbox = Mailbox::Inbox;
/// assert_eq!(inbox.as_str(), "inbox");
/// assert_eq!(inbox.heading(), "Inbox");
///
/// let other = Mailbox::from("drafts");
/// assert_eq!(other.as_str(), "drafts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mailbox {
    /// Emails received by the user and not archived.
    Inbox,
    /// Emails sent by the user.
    Sent,
    /// Emails received by the user and archived.
    Archive,
    /// Any other name. Not validated client-side.
    Other(String),
}

impl Mailbox {
    /// The mailbox name as used in backend paths and history URLs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
            Self::Archive => "archive",
            Self::Other(name) => name,
        }
    }

    /// Listing heading: the name with its first character upper-cased.
    #[must_use]
    pub fn heading(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Whether this is the sent mailbox. Sent listings show recipients
    /// instead of the sender and sent emails offer no reply/archive.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Mailbox {
    fn from(s: &str) -> Self {
        match s {
            "inbox" => Self::Inbox,
            "sent" => Self::Sent,
            "archive" => Self::Archive,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Mailbox {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Mailbox> for String {
    fn from(mailbox: Mailbox) -> Self {
        match mailbox {
            Mailbox::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}
