//! Navigation history
//!
//! A browser-like session history: every user-initiated panel change
//! pushes one entry carrying a serializable [`NavState`] and a display
//! URL. Moving back or forward hands the restored state to the caller,
//! which only ever uses it to reload a mailbox listing.

use crate::mailbox::Mailbox;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a history entry points at: a mailbox name or an email id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MailRef {
    Id(u64),
    Mailbox(Mailbox),
}

impl MailRef {
    /// The mailbox a restored entry reloads.
    ///
    /// Ids are handed over verbatim as a mailbox name; back navigation
    /// only supports mailbox context.
    #[must_use]
    pub fn restore_target(&self) -> Mailbox {
        match self {
            Self::Mailbox(mailbox) => mailbox.clone(),
            Self::Id(id) => Mailbox::Other(id.to_string()),
        }
    }
}

impl fmt::Display for MailRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Mailbox(mailbox) => f.write_str(mailbox.as_str()),
        }
    }
}

/// State object stored with each history entry: `{"mail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    pub mail: MailRef,
}

impl NavState {
    #[must_use]
    pub const fn mailbox(mailbox: Mailbox) -> Self {
        Self {
            mail: MailRef::Mailbox(mailbox),
        }
    }

    #[must_use]
    pub const fn email(id: u64) -> Self {
        Self {
            mail: MailRef::Id(id),
        }
    }
}

/// Visible URL fragments. These are never routed, only displayed.
pub mod route {
    use crate::mailbox::Mailbox;

    #[must_use]
    pub fn mailbox(mailbox: &Mailbox) -> String {
        mailbox.as_str().to_string()
    }

    #[must_use]
    pub fn email(id: u64) -> String {
        format!("email={id}")
    }

    #[must_use]
    pub fn reply(id: u64) -> String {
        format!("reply={id}")
    }

    pub const COMPOSE: &str = "compose";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub state: NavState,
    pub url: String,
}

/// Session history with a cursor.
#[derive(Debug, Clone, Default, Serialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
        }
    }

    /// Push a new entry after the current one, dropping any entries
    /// that were ahead of the cursor.
    pub fn push(&mut self, state: NavState, url: impl Into<String>) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.entries.truncate(keep);
        self.entries.push(HistoryEntry {
            state,
            url: url.into(),
        });
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Step back one entry and return its state, if there is one.
    pub fn back(&mut self) -> Option<&NavState> {
        let cursor = self.cursor.filter(|&c| c > 0)? - 1;
        self.cursor = Some(cursor);
        Some(&self.entries[cursor].state)
    }

    /// Step forward one entry and return its state, if there is one.
    pub fn forward(&mut self) -> Option<&NavState> {
        let cursor = self.cursor? + 1;
        let entry = self.entries.get(cursor)?;
        self.cursor = Some(cursor);
        Some(&entry.state)
    }

    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor?)
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
