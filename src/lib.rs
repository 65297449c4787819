//! Webmail client library
//!
//! A single-page client for a webmail backend that owns all durable
//! state (users, emails, read/archived flags). The client renders
//! mailbox listings, a single-email view, a compose form and a reply
//! form into an in-memory [`Page`], and keeps a browser-like
//! [`History`] so that back/forward navigation restores mailbox
//! listings.
//!
//! [`ViewController`] drives every transition; [`ApiClient`] talks to
//! the backend's `/emails` endpoints.

mod client;
pub mod compose;
mod config;
mod controller;
mod email;
mod error;
pub mod history;
mod mailbox;
mod page;
mod render;

pub use client::ApiClient;
pub use config::{DEFAULT_ARCHIVE_DELAY, WebmailConfig};
pub use controller::ViewController;
pub use email::{Email, EmailUpdate, NewEmail, SendOutcome};
pub use error::{Error, Result};
pub use history::{History, HistoryEntry, MailRef, NavState};
pub use mailbox::Mailbox;
pub use page::{Action, Block, Form, FormKind, MAILBOX_ERROR, Page, Panel, ReadState};
pub use render::render_text;
