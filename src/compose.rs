//! Compose and reply helpers

use crate::email::Email;

/// Prefix marking a reply subject. Matched literally and case-sensitively.
pub const REPLY_PREFIX: &str = "RE:";

/// Backend error shown to the user verbatim.
pub const NO_RECIPIENT: &str = "At least one recipient required.";

/// What every other rejection is reported as.
pub const UNKNOWN_RECIPIENT: &str = "The recipient(s) does not exist.";

/// Subject of a reply: `RE: <subject>`, unless it already starts with
/// `RE:`.
#[must_use]
pub fn reply_subject(subject: &str) -> String {
    if subject.starts_with(REPLY_PREFIX) {
        subject.to_string()
    } else {
        format!("{REPLY_PREFIX} {subject}")
    }
}

/// Initial reply body quoting the original.
#[must_use]
pub fn quoted_body(original: &Email) -> String {
    format!(
        "\n------\nOn {} {} wrote:\n{}",
        original.timestamp, original.sender, original.body
    )
}

/// Alert text for a rejected send.
///
/// Only the missing-recipient error is passed through; any other
/// backend error collapses to [`UNKNOWN_RECIPIENT`].
#[must_use]
pub fn rejection_alert(error: &str) -> &'static str {
    if error == NO_RECIPIENT {
        NO_RECIPIENT
    } else {
        UNKNOWN_RECIPIENT
    }
}
