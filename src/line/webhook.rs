//! Webhook payload decoding.
//!
//! Only `message` events become [`InboundEvent`]s. Follow, unfollow,
//! postback and other event types are dropped here. Message kinds the bot
//! has no handler for decode to [`EventPayload::Other`].

use serde::Deserialize;

use crate::models::event::{EventPayload, InboundEvent};
use crate::Result;

/// Top-level webhook request body.
#[derive(Debug, Deserialize)]
pub struct WebhookBody {
    /// Bot user the events were sent to.
    #[serde(default)]
    pub destination: String,
    /// Events delivered in this batch.
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// One webhook event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WebhookEvent {
    /// A user sent a message.
    Message {
        /// Token for the reply call.
        #[serde(rename = "replyToken")]
        reply_token: String,
        /// Message body.
        message: MessageObject,
    },
    /// Any other event type.
    #[serde(other)]
    Unsupported,
}

/// Message object inside a `message` event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageObject {
    /// Text message.
    Text {
        /// Message text.
        text: String,
    },
    /// Sticker message.
    Sticker {
        /// Sticker identifier.
        #[serde(rename = "stickerId")]
        sticker_id: String,
        /// Sticker resource type.
        #[serde(rename = "stickerResourceType", default)]
        sticker_resource_type: String,
    },
    /// Location message.
    Location {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },
    /// Image, video, audio, file, or anything newer.
    #[serde(other)]
    Other,
}

impl From<MessageObject> for EventPayload {
    fn from(message: MessageObject) -> Self {
        match message {
            MessageObject::Text { text } => Self::Text { body: text },
            MessageObject::Sticker {
                sticker_id,
                sticker_resource_type,
            } => Self::Sticker {
                sticker_id,
                resource_type: sticker_resource_type,
            },
            MessageObject::Location {
                latitude,
                longitude,
            } => Self::Location {
                latitude,
                longitude,
            },
            MessageObject::Other => Self::Other,
        }
    }
}

/// Decode a raw webhook body into the message events it carries.
///
/// # Errors
///
/// Returns `AppError::Line` if the body is not a valid webhook payload.
pub fn parse_events(body: &[u8]) -> Result<Vec<InboundEvent>> {
    let body: WebhookBody = serde_json::from_slice(body)?;
    Ok(body
        .events
        .into_iter()
        .filter_map(|event| match event {
            WebhookEvent::Message {
                reply_token,
                message,
            } => Some(InboundEvent::new(reply_token, message.into())),
            WebhookEvent::Unsupported => None,
        })
        .collect())
}
