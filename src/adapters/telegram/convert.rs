//! Turns Bot API updates into transport-independent inbound events.

use crate::domain::dialogue::{Inbound, InboundEvent, PhotoSize};
use crate::domain::foundation::{ConversationId, Coordinates};

use super::api::{CallbackQuery, Message, Update};

/// Converts one update. Returns `None` for update kinds the bot never handles
/// (edited messages, channel posts, ...).
pub fn to_inbound(update: Update) -> Option<Inbound> {
    if let Some(message) = update.message {
        return Some(message_to_inbound(message));
    }
    update.callback_query.map(callback_to_inbound)
}

fn message_to_inbound(message: Message) -> Inbound {
    let conversation = ConversationId::new(message.chat.id);

    let event = if let Some(text) = message.text {
        InboundEvent::from_text(text)
    } else if let Some(sizes) = message.photo {
        InboundEvent::Photo(
            sizes
                .into_iter()
                .map(|size| PhotoSize {
                    file_id: size.file_id,
                    width: size.width,
                    height: size.height,
                    file_size: size.file_size,
                })
                .collect(),
        )
    } else if let Some(location) = message.location {
        match Coordinates::new(location.latitude, location.longitude) {
            Ok(coordinates) => InboundEvent::Location(coordinates),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding out-of-range shared location");
                InboundEvent::Unsupported
            }
        }
    } else {
        InboundEvent::Unsupported
    };

    Inbound::new(conversation, event)
}

fn callback_to_inbound(callback: CallbackQuery) -> Inbound {
    // Buttons live on a message in the user's chat; fall back to the presser
    let chat_id = callback
        .message
        .as_ref()
        .map(|message| message.chat.id)
        .unwrap_or(callback.from.id);

    Inbound::new(
        ConversationId::new(chat_id),
        InboundEvent::Callback {
            callback_id: callback.id,
            data: callback.data.unwrap_or_default(),
        },
    )
}
