//! Test data model for the fake backend
//!
//! Provides a builder-style API for constructing backend state:
//!
//! ```ignore
//! let store = StoreBuilder::new("me@example.com")
//!     .user("alice@example.com")
//!     .email(TestEmail::new(1, "alice@example.com", &["me@example.com"], "Hello"))
//!     .email(TestEmail::new(2, "me@example.com", &["alice@example.com"], "Hi").read())
//!     .build();
//! ```
//!
//! The store is seen from a single signed-in user: every mailbox is
//! filtered by that user's address, the way the real backend filters
//! by the session user.

use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Every stored email carries the same display timestamp.
pub const TIMESTAMP: &str = "Jan 01 2024, 12:00 PM";

/// An email as the backend serializes it.
#[derive(Debug, Clone, Serialize)]
pub struct TestEmail {
    pub id: u64,
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub timestamp: String,
    pub read: bool,
    pub archived: bool,
}

impl TestEmail {
    /// An unread, unarchived email with a generated body.
    pub fn new(id: u64, sender: &str, recipients: &[&str], subject: &str) -> Self {
        Self {
            id,
            sender: sender.to_string(),
            recipients: recipients.iter().map(ToString::to_string).collect(),
            subject: subject.to_string(),
            body: format!("Body of {subject}"),
            timestamp: TIMESTAMP.to_string(),
            read: false,
            archived: false,
        }
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    pub const fn read(mut self) -> Self {
        self.read = true;
        self
    }

    pub const fn archived(mut self) -> Self {
        self.archived = true;
        self
    }
}

/// Backend state: the user directory, the signed-in user's emails,
/// and knobs for misbehaving.
#[derive(Debug, Clone)]
pub struct Store {
    pub user: String,
    pub users: Vec<String>,
    pub emails: Vec<TestEmail>,
    /// Per-email delay applied to `GET /emails/{id}`.
    pub delays: HashMap<u64, Duration>,
    /// Answer every PUT with a non-JSON 500.
    pub fail_updates: bool,
}

impl Store {
    pub fn get(&self, id: u64) -> Option<&TestEmail> {
        self.emails.iter().find(|e| e.id == id && self.visible(e))
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut TestEmail> {
        let user = self.user.clone();
        self.emails
            .iter_mut()
            .find(|e| e.id == id && (e.sender == user || e.recipients.contains(&user)))
    }

    /// Emails of a mailbox, newest first. `None` for an unknown name.
    pub fn mailbox(&self, name: &str) -> Option<Vec<TestEmail>> {
        let received = |e: &&TestEmail| e.recipients.contains(&self.user);
        let mut emails: Vec<TestEmail> = match name {
            "inbox" => self
                .emails
                .iter()
                .filter(received)
                .filter(|e| !e.archived)
                .cloned()
                .collect(),
            "sent" => self
                .emails
                .iter()
                .filter(|e| e.sender == self.user)
                .cloned()
                .collect(),
            "archive" => self
                .emails
                .iter()
                .filter(received)
                .filter(|e| e.archived)
                .cloned()
                .collect(),
            _ => return None,
        };
        emails.sort_by(|a, b| b.id.cmp(&a.id));
        Some(emails)
    }

    pub fn next_id(&self) -> u64 {
        self.emails.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }

    fn visible(&self, email: &TestEmail) -> bool {
        email.sender == self.user || email.recipients.contains(&self.user)
    }
}

/// Builder for constructing a `Store` step by step.
pub struct StoreBuilder {
    store: Store,
}

impl StoreBuilder {
    /// Start a store signed in as `user`.
    pub fn new(user: &str) -> Self {
        Self {
            store: Store {
                user: user.to_string(),
                users: vec![user.to_string()],
                emails: Vec::new(),
                delays: HashMap::new(),
                fail_updates: false,
            },
        }
    }

    /// Register another address in the user directory.
    pub fn user(mut self, address: &str) -> Self {
        self.store.users.push(address.to_string());
        self
    }

    pub fn email(mut self, email: TestEmail) -> Self {
        self.store.emails.push(email);
        self
    }

    /// Hold back the answer to `GET /emails/{id}` for `delay`.
    pub fn slow(mut self, id: u64, delay: Duration) -> Self {
        self.store.delays.insert(id, delay);
        self
    }

    pub const fn fail_updates(mut self) -> Self {
        self.store.fail_updates = true;
        self
    }

    pub fn build(self) -> Store {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        StoreBuilder::new("me@example.com")
            .user("alice@example.com")
            .email(TestEmail::new(1, "alice@example.com", &["me@example.com"], "One"))
            .email(TestEmail::new(2, "alice@example.com", &["me@example.com"], "Two").archived())
            .email(TestEmail::new(3, "me@example.com", &["alice@example.com"], "Three").read())
            .email(TestEmail::new(4, "alice@example.com", &["bob@example.com"], "Other"))
            .build()
    }

    #[test]
    fn mailbox_filters() {
        let store = store();
        let ids = |name| -> Vec<u64> {
            store.mailbox(name).unwrap().iter().map(|e| e.id).collect()
        };
        assert_eq!(ids("inbox"), [1]);
        assert_eq!(ids("archive"), [2]);
        assert_eq!(ids("sent"), [3]);
        assert!(store.mailbox("spam").is_none());
    }

    #[test]
    fn foreign_emails_are_invisible() {
        let mut store = store();
        assert!(store.get(4).is_none());
        assert!(store.get_mut(4).is_none());
        assert!(store.get(1).is_some());
        assert_eq!(store.next_id(), 5);
    }
}
