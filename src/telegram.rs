//! The subset of the Telegram Bot API wire format the webhook needs.
//!
//! Incoming updates are deserialized with unknown fields ignored, so the
//! structs only name the fields the bot reads. Outgoing replies use the
//! answer-webhook mechanism: the HTTP response body is the API method call.

use serde::{Deserialize, Serialize};

/// The header Telegram echoes back on every delivery when the webhook was
/// registered with a secret token.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// An incoming update delivered by Telegram to the webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// The update's unique identifier.
    pub update_id: i64,
    /// The new incoming message, if this update carries one.
    #[serde(default)]
    pub message: Option<Message>,
}

/// A message inside an [Update].
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// The message's unique identifier within the chat.
    pub message_id: i64,
    /// The sender. Absent for messages posted on behalf of channels.
    #[serde(default)]
    pub from: Option<User>,
    /// The chat the message was sent in.
    pub chat: Chat,
    /// The message text. Absent for photos, stickers and other media.
    #[serde(default)]
    pub text: Option<String>,
}

/// The sender of a [Message].
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// The user's unique identifier.
    pub id: i64,
    /// The user's `@username`, if they have set one.
    #[serde(default)]
    pub username: Option<String>,
    /// The user's first name.
    #[serde(default)]
    pub first_name: String,
}

/// The chat a [Message] belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// The chat's unique identifier.
    pub id: i64,
    /// The chat type: `private`, `group`, `supergroup` or `channel`.
    #[serde(rename = "type")]
    pub kind: String,
}

/// A reply sent back to Telegram as the webhook's HTTP response body.
///
/// Serializes to the corresponding Bot API method call, e.g.
/// `{"method": "sendMessage", "chat_id": …, "text": …}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method")]
pub enum WebhookReply {
    /// A `sendMessage` call.
    #[serde(rename = "sendMessage")]
    SendMessage {
        /// The chat to reply to.
        chat_id: i64,
        /// The message text.
        text: String,
        /// The text formatting mode, omitted for plain text.
        #[serde(skip_serializing_if = "Option::is_none")]
        parse_mode: Option<String>,
    },
    /// A `sendPhoto` call.
    #[serde(rename = "sendPhoto")]
    SendPhoto {
        /// The chat to reply to.
        chat_id: i64,
        /// The URL of the photo to send.
        photo: String,
        /// The photo caption.
        caption: String,
    },
}

impl WebhookReply {
    /// A plain text reply.
    pub fn message(chat_id: i64, text: impl Into<String>) -> Self {
        Self::SendMessage {
            chat_id,
            text: text.into(),
            parse_mode: None,
        }
    }

    /// A Markdown formatted reply.
    pub fn markdown(chat_id: i64, text: impl Into<String>) -> Self {
        Self::SendMessage {
            chat_id,
            text: text.into(),
            parse_mode: Some("Markdown".to_owned()),
        }
    }

    /// A photo reply with a caption.
    pub fn photo(chat_id: i64, photo: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::SendPhoto {
            chat_id,
            photo: photo.into(),
            caption: caption.into(),
        }
    }
}

#[cfg(test)]
mod telegram_tests {
    use serde_json::json;

    use super::{Update, WebhookReply};

    #[test]
    fn parses_text_update_and_ignores_unknown_fields() {
        let payload = json!({
            "update_id": 831_450_123,
            "message": {
                "message_id": 42,
                "from": {
                    "id": 12345,
                    "is_bot": false,
                    "first_name": "Budi",
                    "username": "budi",
                    "language_code": "id"
                },
                "chat": {
                    "id": 12345,
                    "first_name": "Budi",
                    "type": "private"
                },
                "date": 1_772_000_000,
                "text": "/masuk 500000 Gaji"
            }
        });

        let update: Update = serde_json::from_value(payload).expect("Could not parse the update.");
        let message = update.message.expect("Expected a message.");
        let from = message.from.expect("Expected a sender.");

        assert_eq!(update.update_id, 831_450_123);
        assert_eq!(message.chat.id, 12345);
        assert_eq!(message.chat.kind, "private");
        assert_eq!(message.text.as_deref(), Some("/masuk 500000 Gaji"));
        assert_eq!(from.id, 12345);
        assert_eq!(from.username.as_deref(), Some("budi"));
        assert_eq!(from.first_name, "Budi");
    }

    #[test]
    fn parses_update_without_message() {
        let payload = json!({ "update_id": 1, "edited_message": { "message_id": 2 } });

        let update: Update = serde_json::from_value(payload).expect("Could not parse the update.");

        assert!(update.message.is_none());
    }

    #[test]
    fn plain_message_serializes_without_parse_mode() {
        let reply = WebhookReply::message(12345, "Halo");

        assert_eq!(
            serde_json::to_value(&reply).expect("Could not serialize the reply."),
            json!({ "method": "sendMessage", "chat_id": 12345, "text": "Halo" })
        );
    }

    #[test]
    fn markdown_message_carries_parse_mode() {
        let reply = WebhookReply::markdown(12345, "*Halo*");

        assert_eq!(
            serde_json::to_value(&reply).expect("Could not serialize the reply."),
            json!({
                "method": "sendMessage",
                "chat_id": 12345,
                "text": "*Halo*",
                "parse_mode": "Markdown"
            })
        );
    }

    #[test]
    fn photo_serializes_as_send_photo() {
        let reply = WebhookReply::photo(12345, "https://quickchart.io/chart?c=x", "📈 Grafik");

        assert_eq!(
            serde_json::to_value(&reply).expect("Could not serialize the reply."),
            json!({
                "method": "sendPhoto",
                "chat_id": 12345,
                "photo": "https://quickchart.io/chart?c=x",
                "caption": "📈 Grafik"
            })
        );
    }
}
