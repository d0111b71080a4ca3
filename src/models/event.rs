//! Inbound event model.

use serde::{Deserialize, Serialize};

/// Reply token the platform uses for its endpoint verification probe.
///
/// Events carrying this token must be acknowledged without a reply.
pub const VERIFICATION_REPLY_TOKEN: &str = "00000000000000000000000000000000";

/// Kind-specific payload of an inbound message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    /// Plain text message.
    Text {
        /// Message body as typed by the user.
        body: String,
    },
    /// Sticker message.
    Sticker {
        /// Platform sticker identifier.
        sticker_id: String,
        /// Sticker resource type (e.g. `STATIC`, `ANIMATION`).
        resource_type: String,
    },
    /// Shared location.
    Location {
        /// Latitude in decimal degrees.
        latitude: f64,
        /// Longitude in decimal degrees.
        longitude: f64,
    },
    /// Any other message kind (image, video, audio, file, ...).
    Other,
}

/// One inbound message, consumed once by the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboundEvent {
    /// Opaque token routing the reply back to the sender.
    pub reply_token: String,
    /// Kind-specific content.
    pub payload: EventPayload,
}

impl InboundEvent {
    /// Construct an event from its parts.
    #[must_use]
    pub fn new(reply_token: impl Into<String>, payload: EventPayload) -> Self {
        Self {
            reply_token: reply_token.into(),
            payload,
        }
    }

    /// Shorthand for a text event.
    #[must_use]
    pub fn text(reply_token: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(reply_token, EventPayload::Text { body: body.into() })
    }

    /// Whether this event is the platform's endpoint verification probe.
    #[must_use]
    pub fn is_verification_probe(&self) -> bool {
        self.reply_token == VERIFICATION_REPLY_TOKEN
    }
}
