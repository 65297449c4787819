//! View controller
//!
//! Drives every panel transition: push a history entry, switch the
//! visible panel, issue the network call, render the answer. Calls are
//! never cancelled or serialized against each other, so when two
//! transitions overlap the answer that arrives last decides what the
//! shared containers hold.

use crate::client::ApiClient;
use crate::compose::rejection_alert;
use crate::config::WebmailConfig;
use crate::email::{EmailUpdate, SendOutcome};
use crate::error::{Error, Result};
use crate::history::{History, NavState, route};
use crate::mailbox::Mailbox;
use crate::page::{Action, Form, FormKind, MAILBOX_ERROR, Page, Panel};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Single-page webmail controller.
///
/// Clones share the same page, history and backend client.
#[derive(Debug, Clone)]
pub struct ViewController {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    api: ApiClient,
    page: Mutex<Page>,
    history: Mutex<History>,
    archive_delay: Duration,
    /// Fire-and-forget requests still in flight.
    background: Mutex<Vec<JoinHandle<()>>>,
}

impl ViewController {
    /// Create a controller for the backend described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built.
    pub fn new(config: &WebmailConfig) -> Result<Self> {
        Ok(Self::with_client(ApiClient::new(config)?, config.archive_delay))
    }

    #[must_use]
    pub fn with_client(api: ApiClient, archive_delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                api,
                page: Mutex::new(Page::new()),
                history: Mutex::new(History::new()),
                archive_delay,
                background: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Page-load entry point: show the inbox.
    ///
    /// # Errors
    ///
    /// See [`ViewController::load_mailbox`].
    pub async fn start(&self) -> Result<()> {
        self.load_mailbox(Mailbox::Inbox).await
    }

    /// Snapshot of the page as currently rendered.
    #[must_use]
    pub fn page(&self) -> Page {
        self.lock_page().clone()
    }

    /// Snapshot of the navigation history.
    #[must_use]
    pub fn history(&self) -> History {
        self.lock_history().clone()
    }

    /// Dismiss pending alerts, returning them.
    pub fn take_alerts(&self) -> Vec<String> {
        self.lock_page().take_alerts()
    }

    /// Show the listing of `mailbox`.
    ///
    /// Failures of any kind (backend error payload, transport error,
    /// unexpected answer) are shown in the mailbox error region and
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns the error that prevented the listing from loading.
    pub async fn load_mailbox(&self, mailbox: Mailbox) -> Result<()> {
        self.push_history(NavState::mailbox(mailbox.clone()), route::mailbox(&mailbox));
        self.show_listing(mailbox).await
    }

    /// Show one email and mark it read.
    ///
    /// The mark-read request runs on its own and is not awaited; its
    /// failure is only logged.
    ///
    /// # Errors
    ///
    /// Returns an error (after raising an alert) if the email cannot
    /// be fetched.
    pub async fn view_email(&self, mailbox: Mailbox, id: u64) -> Result<()> {
        self.push_history(NavState::email(id), route::email(id));
        self.lock_page().show(Panel::Single);

        let api = self.inner.api.clone();
        self.spawn_background(async move {
            if let Err(e) = api.update_email(id, &EmailUpdate::mark_read()).await {
                warn!("Marking email {} read failed: {}", id, e);
            }
        });

        match self.inner.api.get_email(id).await {
            Ok(email) => {
                self.lock_page().render_email(&mailbox, &email);
                Ok(())
            }
            Err(e) => {
                warn!("Loading email {} failed: {}", id, e);
                self.lock_page()
                    .alert(format!("Could not load email {id}: {e}"));
                Err(e)
            }
        }
    }

    /// Show an empty compose form, ready to submit.
    pub fn compose(&self) {
        self.push_history(NavState::mailbox(Mailbox::Inbox), route::COMPOSE);
        let mut page = self.lock_page();
        page.show(Panel::Compose);
        page.arm(FormKind::Compose);
    }

    /// Show the reply form for email `id`.
    ///
    /// The form is emptied at once and pre-filled, and made
    /// submittable, only when the original arrives.
    ///
    /// # Errors
    ///
    /// Returns an error (after raising an alert) if the original
    /// cannot be fetched.
    pub async fn reply(&self, id: u64) -> Result<()> {
        self.push_history(NavState::mailbox(Mailbox::Inbox), route::reply(id));
        self.lock_page().show(Panel::Reply);

        match self.inner.api.get_email(id).await {
            Ok(original) => {
                let mut page = self.lock_page();
                page.render_reply(&original);
                page.arm(FormKind::Reply);
                Ok(())
            }
            Err(e) => {
                warn!("Loading email {} to reply to failed: {}", id, e);
                self.lock_page()
                    .alert(format!("Could not load email {id}: {e}"));
                Err(e)
            }
        }
    }

    /// Type into a form.
    pub fn edit_form<F>(&self, kind: FormKind, edit: F)
    where
        F: FnOnce(&mut Form),
    {
        edit(self.lock_page().form_mut(kind));
    }

    /// Submit a form as a new email.
    ///
    /// On success the sent listing is shown. A rejection raises an
    /// alert: the missing-recipient error verbatim, anything else as
    /// the generic unknown-recipient message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormNotReady`] if the form has no submit
    /// handler yet, or the transport/parse error (after raising an
    /// alert) if the request fails.
    pub async fn submit(&self, kind: FormKind) -> Result<SendOutcome> {
        let draft = {
            let page = self.lock_page();
            let form = page.form(kind);
            if !form.is_armed() {
                return Err(Error::FormNotReady(format!("{kind:?} form")));
            }
            form.to_new_email()
        };

        match self.inner.api.send_email(&draft).await {
            Ok(SendOutcome::Sent(message)) => {
                info!("{}", message);
                // The listing reports its own failures.
                if let Err(e) = self.load_mailbox(Mailbox::Sent).await {
                    debug!("Sent listing after submit failed: {}", e);
                }
                Ok(SendOutcome::Sent(message))
            }
            Ok(SendOutcome::Rejected(error)) => {
                info!("Send rejected: {}", error);
                self.lock_page().alert(rejection_alert(&error));
                Ok(SendOutcome::Rejected(error))
            }
            Err(e) => {
                warn!("Sending failed: {}", e);
                self.lock_page().alert(format!("Could not send email: {e}"));
                Err(e)
            }
        }
    }

    /// Flip the archived flag of email `id` (`archived` being the flag
    /// as rendered), then show the inbox.
    ///
    /// The update is not awaited: the inbox is loaded after the
    /// configured delay whether or not the update has completed, and
    /// whatever its outcome.
    ///
    /// # Errors
    ///
    /// See [`ViewController::load_mailbox`].
    pub async fn toggle_archive(&self, id: u64, archived: bool) -> Result<()> {
        let api = self.inner.api.clone();
        let update = EmailUpdate::archived(!archived);
        self.spawn_background(async move {
            if let Err(e) = api.update_email(id, &update).await {
                warn!("Setting archived={} on email {} failed: {}", !archived, id, e);
            }
        });

        tokio::time::sleep(self.inner.archive_delay).await;
        self.load_mailbox(Mailbox::Inbox).await
    }

    /// Perform the click behind a rendered element.
    ///
    /// # Errors
    ///
    /// Returns the error of the transition the action triggers.
    pub async fn activate(&self, action: &Action) -> Result<()> {
        match action {
            Action::ViewEmail { mailbox, id } => self.view_email(mailbox.clone(), *id).await,
            Action::Reply { id } => self.reply(*id).await,
            Action::ToggleArchive { id, archived } => self.toggle_archive(*id, *archived).await,
        }
    }

    /// Navigate back. Returns `false` if there is no earlier entry.
    ///
    /// The restored entry always reloads a mailbox listing, never an
    /// email or a form.
    ///
    /// # Errors
    ///
    /// See [`ViewController::load_mailbox`].
    pub async fn back(&self) -> Result<bool> {
        let state = self.lock_history().back().cloned();
        self.restore(state).await
    }

    /// Navigate forward. Returns `false` if there is no later entry.
    ///
    /// # Errors
    ///
    /// See [`ViewController::load_mailbox`].
    pub async fn forward(&self) -> Result<bool> {
        let state = self.lock_history().forward().cloned();
        self.restore(state).await
    }

    /// Wait for every fire-and-forget request issued so far.
    ///
    /// Transitions never call this; it lets a caller that is about to
    /// shut down give outstanding updates a chance to reach the
    /// backend.
    pub async fn settle(&self) {
        let handles = std::mem::take(&mut *self.lock_background());
        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Background request did not finish: {}", e);
            }
        }
    }

    // -- private helpers --

    fn spawn_background<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        let mut background = self.lock_background();
        background.retain(|h| !h.is_finished());
        background.push(handle);
    }

    async fn restore(&self, state: Option<NavState>) -> Result<bool> {
        let Some(state) = state else {
            return Ok(false);
        };
        info!("Restoring history entry {}", state.mail);
        self.show_listing(state.mail.restore_target()).await?;
        Ok(true)
    }

    async fn show_listing(&self, mailbox: Mailbox) -> Result<()> {
        {
            let mut page = self.lock_page();
            page.show(Panel::List);
            page.render_listing_heading(&mailbox);
        }

        match self.inner.api.list_mailbox(&mailbox).await {
            Ok(emails) => {
                self.lock_page().render_listing(&mailbox, &emails);
                Ok(())
            }
            Err(e) => {
                warn!("Loading mailbox {} failed: {}", mailbox, e);
                self.lock_page().set_mailbox_error(MAILBOX_ERROR);
                Err(e)
            }
        }
    }

    fn push_history(&self, state: NavState, url: impl Into<String>) {
        let url = url.into();
        info!("Navigating to {}", url);
        self.lock_history().push(state, url);
    }

    fn lock_page(&self) -> MutexGuard<'_, Page> {
        self.inner.page.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_history(&self) -> MutexGuard<'_, History> {
        self.inner.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_background(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.inner.background.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
