//! Outbound reply content.

use serde::{Deserialize, Serialize};

use super::forecast::DayBucket;

/// Alt text shown by clients that cannot render the carousel.
pub const CAROUSEL_ALT_TEXT: &str = "Weather Information";

/// One labelled day in a forecast carousel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySummary {
    /// Header label (e.g. "今日の天気").
    pub label: String,
    /// Aggregated statistics for the day.
    pub bucket: DayBucket,
}

/// Reply produced for exactly one inbound event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyContent {
    /// Plain text message.
    Text {
        /// Message text.
        text: String,
    },
    /// Carousel of day summaries.
    Carousel {
        /// Fallback text for clients without rich rendering.
        alt_text: String,
        /// One entry per day, in chronological order.
        days: Vec<DaySummary>,
    },
}

impl ReplyContent {
    /// Build a plain text reply.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Text body when this is a plain text reply.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Carousel { .. } => None,
        }
    }
}
