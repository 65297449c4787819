//! The rendered page
//!
//! Four panel containers share one page: the mailbox listing, the
//! single-email view, the compose form and the reply form. The active
//! panel is a single [`Panel`] value, so exactly one panel is visible
//! at any time. Switching panels goes through [`Page::show`], which
//! clears the container being shown before anything is rendered into
//! it.

use crate::compose::{quoted_body, reply_subject};
use crate::email::{Email, NewEmail};
use crate::mailbox::Mailbox;
use serde::Serialize;

/// Message shown in the error region when a listing cannot be loaded.
pub const MAILBOX_ERROR: &str = "An error occurred retrieving the requested mailbox.";

/// One of the four mutually exclusive page regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    List,
    Single,
    Compose,
    Reply,
}

impl Panel {
    pub const ALL: [Self; 4] = [Self::List, Self::Single, Self::Compose, Self::Reply];

    /// Element id of the panel's container in the page template.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::List => "emails-view",
            Self::Single => "single-view",
            Self::Compose => "compose-view",
            Self::Reply => "reply-view",
        }
    }
}

/// Visual class of a listing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadState {
    Read,
    Unread,
}

impl ReadState {
    #[must_use]
    pub const fn of(email: &Email) -> Self {
        if email.read { Self::Read } else { Self::Unread }
    }

    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Unread => "unread",
        }
    }
}

/// What clicking a rendered element does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Open an email from a listing. The mailbox decides whether the
    /// view offers reply and archive.
    ViewEmail { mailbox: Mailbox, id: u64 },
    Reply { id: u64 },
    /// Flip the archived flag. `archived` is the flag as rendered.
    ToggleArchive { id: u64, archived: bool },
}

/// A piece of panel content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    ColumnHeaders { columns: [String; 3] },
    Row {
        columns: [String; 3],
        state: ReadState,
        action: Action,
    },
    Field { label: String, value: String },
    Button { label: String, action: Action },
    Rule,
    Body { text: String },
}

/// The two forms on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Compose,
    Reply,
}

impl FormKind {
    #[must_use]
    pub const fn panel(self) -> Panel {
        match self {
            Self::Compose => Panel::Compose,
            Self::Reply => Panel::Reply,
        }
    }
}

/// A recipients/subject/body form.
///
/// `armed` stands in for the form's submit handler: it is installed by
/// the panel entry that owns the form and replaced on the next entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Form {
    pub recipients: String,
    pub subject: String,
    pub body: String,
    armed: bool,
}

impl Form {
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }

    /// The email this form would submit.
    #[must_use]
    pub fn to_new_email(&self) -> NewEmail {
        NewEmail {
            recipients: self.recipients.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Page {
    visible: Panel,
    list: Vec<Block>,
    single: Vec<Block>,
    compose: Form,
    reply: Form,
    mailbox_error: Option<String>,
    alerts: Vec<String>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: Panel::List,
            list: Vec::new(),
            single: Vec::new(),
            compose: Form::default(),
            reply: Form::default(),
            mailbox_error: None,
            alerts: Vec::new(),
        }
    }

    /// Make `panel` the visible one, clearing its container first.
    pub fn show(&mut self, panel: Panel) {
        match panel {
            Panel::List => {
                self.list.clear();
                self.mailbox_error = None;
            }
            Panel::Single => self.single.clear(),
            Panel::Compose => self.compose = Form::default(),
            Panel::Reply => self.reply = Form::default(),
        }
        self.visible = panel;
    }

    #[must_use]
    pub const fn visible(&self) -> Panel {
        self.visible
    }

    #[must_use]
    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible == panel
    }

    /// Content of a panel container. Form panels have no blocks.
    #[must_use]
    pub fn blocks(&self, panel: Panel) -> &[Block] {
        match panel {
            Panel::List => &self.list,
            Panel::Single => &self.single,
            Panel::Compose | Panel::Reply => &[],
        }
    }

    #[must_use]
    pub const fn form(&self, kind: FormKind) -> &Form {
        match kind {
            FormKind::Compose => &self.compose,
            FormKind::Reply => &self.reply,
        }
    }

    pub const fn form_mut(&mut self, kind: FormKind) -> &mut Form {
        match kind {
            FormKind::Compose => &mut self.compose,
            FormKind::Reply => &mut self.reply,
        }
    }

    /// Install the submit handler of a form.
    pub const fn arm(&mut self, kind: FormKind) {
        self.form_mut(kind).armed = true;
    }

    #[must_use]
    pub fn mailbox_error(&self) -> Option<&str> {
        self.mailbox_error.as_deref()
    }

    pub fn set_mailbox_error(&mut self, message: impl Into<String>) {
        self.mailbox_error = Some(message.into());
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.alerts.push(message.into());
    }

    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Dismiss all pending alerts, returning them.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }

    /// Listing rows, without the column header row.
    pub fn rows(&self) -> impl Iterator<Item = (&[String; 3], ReadState, &Action)> {
        self.list.iter().filter_map(|block| match block {
            Block::Row {
                columns,
                state,
                action,
            } => Some((columns, *state, action)),
            _ => None,
        })
    }

    /// Buttons of the single-email view.
    pub fn buttons(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.single.iter().filter_map(|block| match block {
            Block::Button { label, action } => Some((label.as_str(), action)),
            _ => None,
        })
    }

    // -- renderers, one per panel --

    /// Start a listing: just the capitalized mailbox name.
    pub fn render_listing_heading(&mut self, mailbox: &Mailbox) {
        self.list = vec![Block::Heading {
            text: mailbox.heading(),
        }];
    }

    /// Replace the listing with the heading, one column header row and
    /// one row per email.
    pub fn render_listing(&mut self, mailbox: &Mailbox, emails: &[Email]) {
        let first = if mailbox.is_sent() { "To" } else { "From" };
        let mut blocks = Vec::with_capacity(emails.len() + 2);
        blocks.push(Block::Heading {
            text: mailbox.heading(),
        });
        blocks.push(Block::ColumnHeaders {
            columns: [first.to_string(), "Subject".to_string(), "Date".to_string()],
        });

        for email in emails {
            let who = if mailbox.is_sent() {
                email.recipients_display()
            } else {
                email.sender.clone()
            };
            blocks.push(Block::Row {
                columns: [who, email.subject.clone(), email.timestamp.clone()],
                state: ReadState::of(email),
                action: Action::ViewEmail {
                    mailbox: mailbox.clone(),
                    id: email.id,
                },
            });
        }

        self.list = blocks;
    }

    /// Replace the single-email view with `email`'s fields. Emails
    /// opened from anywhere but the sent mailbox get reply and
    /// archive buttons.
    pub fn render_email(&mut self, mailbox: &Mailbox, email: &Email) {
        let field = |label: &str, value: &str| Block::Field {
            label: label.to_string(),
            value: value.to_string(),
        };

        let mut blocks = vec![
            field("From", &email.sender),
            field("To", &email.recipients_display()),
            field("Subject", &email.subject),
            field("Timestamp", &email.timestamp),
        ];

        if !mailbox.is_sent() {
            blocks.push(Block::Button {
                label: "Reply".to_string(),
                action: Action::Reply { id: email.id },
            });
            let label = if email.archived { "Unarchive" } else { "Archive" };
            blocks.push(Block::Button {
                label: label.to_string(),
                action: Action::ToggleArchive {
                    id: email.id,
                    archived: email.archived,
                },
            });
        }

        blocks.push(Block::Rule);
        blocks.push(Block::Body {
            text: email.body.clone(),
        });

        self.single = blocks;
    }

    /// Pre-fill the reply form from the email being answered.
    pub fn render_reply(&mut self, original: &Email) {
        self.reply.recipients.clone_from(&original.sender);
        self.reply.subject = reply_subject(&original.subject);
        self.reply.body = quoted_body(original);
    }
}
