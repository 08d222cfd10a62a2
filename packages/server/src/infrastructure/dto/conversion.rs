//! Conversion logic between domain entities and wire envelopes.

use idobata_shared::time::format_message_date;

use crate::domain::{ChatMessage, MessageContent, Timestamp, UserName};

use super::envelope::{Envelope, MessagePayload};

/// Build the `message` envelope for one recipient.
///
/// `is_sender` is computed per recipient by the caller; the date string is
/// rendered against `now` at encode time and never stored.
pub fn message_envelope(message: &ChatMessage, is_sender: bool, now: Timestamp) -> Envelope {
    let date = format_message_date(message.created_at.value(), now.value());
    let (text, image) = match &message.content {
        MessageContent::Text(text) => (Some(text.clone()), None),
        MessageContent::Image(reference) => (None, Some(reference.clone())),
    };

    Envelope::Message(MessagePayload {
        is_sender,
        user: message.author.as_str().to_string(),
        date,
        text,
        image,
    })
}

/// Build the `status` envelope reporting one online user.
pub fn status_envelope(user: &UserName) -> Envelope {
    Envelope::Status {
        user: user.as_str().to_string(),
    }
}

/// Build the `clear` envelope preceding a fresh status sequence.
pub fn clear_envelope() -> Envelope {
    Envelope::Clear
}
