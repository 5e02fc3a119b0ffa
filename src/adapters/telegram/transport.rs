//! ChatTransport over the Bot API.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::dialogue::{ConfirmationAnswer, PhotoRef};
use crate::domain::foundation::{ConversationId, Coordinates};
use crate::ports::{ChatTransport, MessageId, TransportError};

use super::api::{
    AnswerCallbackQuery, EditMessageText, InlineKeyboardButton, InlineKeyboardMarkup, Message,
    SendLocation, SendMessage,
};
use super::client::TelegramClient;

/// Sends bot replies through the Bot API.
#[derive(Clone)]
pub struct TelegramTransport {
    client: Arc<TelegramClient>,
}

impl TelegramTransport {
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }
}

/// One row of buttons whose callback payload equals the label.
fn confirmation_keyboard(answers: &[ConfirmationAnswer]) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![answers
            .iter()
            .map(|answer| InlineKeyboardButton {
                text: answer.label().to_string(),
                callback_data: answer.label().to_string(),
            })
            .collect()],
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(
        &self,
        chat: ConversationId,
        text: &str,
    ) -> Result<MessageId, TransportError> {
        let body = SendMessage {
            chat_id: chat.as_i64(),
            text,
            reply_markup: None,
        };
        let message: Message = self.client.call("sendMessage", &body).await?;
        Ok(MessageId::new(message.message_id))
    }

    async fn edit_text(
        &self,
        chat: ConversationId,
        message: MessageId,
        text: &str,
    ) -> Result<(), TransportError> {
        let body = EditMessageText {
            chat_id: chat.as_i64(),
            message_id: message.as_i64(),
            text,
        };
        let _: serde_json::Value = self.client.call("editMessageText", &body).await?;
        Ok(())
    }

    async fn send_location(
        &self,
        chat: ConversationId,
        coordinates: Coordinates,
    ) -> Result<(), TransportError> {
        let body = SendLocation {
            chat_id: chat.as_i64(),
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
        };
        let _: Message = self.client.call("sendLocation", &body).await?;
        Ok(())
    }

    async fn send_photo(
        &self,
        chat: ConversationId,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<(), TransportError> {
        self.client.send_photo(chat.as_i64(), photo, caption).await?;
        Ok(())
    }

    async fn send_confirmation(
        &self,
        chat: ConversationId,
        text: &str,
        answers: &[ConfirmationAnswer],
    ) -> Result<MessageId, TransportError> {
        let body = SendMessage {
            chat_id: chat.as_i64(),
            text,
            reply_markup: Some(confirmation_keyboard(answers)),
        };
        let message: Message = self.client.call("sendMessage", &body).await?;
        Ok(MessageId::new(message.message_id))
    }

    async fn acknowledge_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        let body = AnswerCallbackQuery {
            callback_query_id: callback_id,
        };
        let _: bool = self.client.call("answerCallbackQuery", &body).await?;
        Ok(())
    }

    async fn download_photo(&self, photo: &PhotoRef) -> Result<Vec<u8>, TransportError> {
        self.client.download_file(photo.as_str()).await
    }
}
