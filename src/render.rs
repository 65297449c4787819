//! Plain-text rendering of a [`Page`]
//!
//! Only the visible panel is drawn, followed by the mailbox error
//! region and any pending alerts.

use crate::page::{Block, Form, FormKind, Page, Panel, ReadState};
use std::fmt::Write;

const WHO_WIDTH: usize = 30;
const SUBJECT_WIDTH: usize = 40;

/// Render the visible panel as terminal text.
#[must_use]
pub fn render_text(page: &Page) -> String {
    let mut out = String::new();

    match page.visible() {
        Panel::List => render_blocks(&mut out, page.blocks(Panel::List)),
        Panel::Single => render_blocks(&mut out, page.blocks(Panel::Single)),
        Panel::Compose => render_form(&mut out, "New Email", page.form(FormKind::Compose)),
        Panel::Reply => render_form(&mut out, "Reply", page.form(FormKind::Reply)),
    }

    if let Some(error) = page.mailbox_error() {
        let _ = writeln!(out, "{error}");
    }
    for alert in page.alerts() {
        let _ = writeln!(out, "! {alert}");
    }

    out
}

fn render_blocks(out: &mut String, blocks: &[Block]) {
    let mut row_number = 0;
    let mut buttons = Vec::new();

    for block in blocks {
        match block {
            Block::Heading { text } => {
                let _ = writeln!(out, "{text}");
            }
            Block::ColumnHeaders { columns } => {
                let _ = writeln!(
                    out,
                    "    {:<WHO_WIDTH$} {:<SUBJECT_WIDTH$} {}",
                    columns[0], columns[1], columns[2]
                );
                let _ = writeln!(out, "{}", "-".repeat(100));
            }
            Block::Row { columns, state, .. } => {
                row_number += 1;
                let marker = if *state == ReadState::Unread { '*' } else { ' ' };
                let _ = writeln!(
                    out,
                    "{row_number:>2}{marker} {:<WHO_WIDTH$} {:<SUBJECT_WIDTH$} {}",
                    truncate(&columns[0], WHO_WIDTH - 2),
                    truncate(&columns[1], SUBJECT_WIDTH - 2),
                    columns[2]
                );
            }
            Block::Field { label, value } => {
                let _ = writeln!(out, "{:<11}{value}", format!("{label}:"));
            }
            Block::Button { label, .. } => buttons.push(format!("[{label}]")),
            Block::Rule => {
                if !buttons.is_empty() {
                    let _ = writeln!(out, "{}", buttons.join(" "));
                    buttons.clear();
                }
                let _ = writeln!(out, "{}", "-".repeat(40));
            }
            Block::Body { text } => {
                let _ = writeln!(out, "{text}");
            }
        }
    }
}

fn render_form(out: &mut String, title: &str, form: &Form) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "To:      {}", form.recipients);
    let _ = writeln!(out, "Subject: {}", form.subject);
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "{}", form.body);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}
