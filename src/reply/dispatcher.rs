//! Reply dispatcher.
//!
//! Maps every inbound event to exactly one reply, except the platform's
//! verification probe, which is acknowledged with no reply at all.
//!
//! Text routing is substring/prefix matching, in this order:
//! 1. body contains the fortune keyword → fortune draw
//! 2. body starts with `todo` → task-list command
//! 3. anything else → echo the body verbatim
//!
//! Location messages go to the weather gateway in the deployment's fixed
//! [`WeatherMode`]. Weather failures yield a generic error text; task store
//! failures yield `db error: <detail>`.

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::config::{GlobalConfig, TimeoutConfig, WeatherMode};
use crate::models::event::{EventPayload, InboundEvent};
use crate::models::reply::{DaySummary, ReplyContent, CAROUSEL_ALT_TEXT};
use crate::persistence::TaskStore;
use crate::weather::{kelvin_to_celsius, WeatherGateway};
use crate::Result;

use super::forecast::aggregate;
use super::fortune::{fortune, FORTUNE_KEYWORD};
use super::todo::{self, parse_command, TODO_PREFIX};
use super::{with_timeout, HELP_MESSAGE, INTERNAL_ERROR_MESSAGE};

/// Header labels for the three forecast days.
pub const DAY_LABELS: [&str; 3] = ["今日の天気", "明日の天気", "明後日の天気"];

/// Which handler a text body is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRoute {
    /// Random fortune draw.
    Fortune,
    /// Task-list command.
    Todo,
    /// Identity reply.
    Echo,
}

/// Classify a text body. The fortune keyword wins over the task prefix.
#[must_use]
pub fn classify_text(body: &str) -> TextRoute {
    if body.contains(FORTUNE_KEYWORD) {
        TextRoute::Fortune
    } else if body.starts_with(TODO_PREFIX) {
        TextRoute::Todo
    } else {
        TextRoute::Echo
    }
}

/// Reply text for a sticker message.
#[must_use]
pub fn sticker_reply(sticker_id: &str, resource_type: &str) -> String {
    format!("sticker id is {sticker_id}, stickerResourceType is {resource_type}")
}

/// Reply text for current conditions.
#[must_use]
pub fn current_weather_reply(condition: &str, temp_kelvin: f64, humidity: f64) -> String {
    format!(
        " 現在の天気情報\n天気 : {condition}\n気温 : {:.2}℃\n湿度 : {humidity:.2}%",
        kelvin_to_celsius(temp_kelvin)
    )
}

/// Stateless per event; safe to share across concurrent webhook calls.
pub struct ReplyDispatcher {
    tasks: Arc<dyn TaskStore>,
    weather: Arc<dyn WeatherGateway>,
    rng: Mutex<StdRng>,
    weather_mode: WeatherMode,
    timeouts: TimeoutConfig,
}

impl ReplyDispatcher {
    /// Build a dispatcher from its collaborators.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        weather: Arc<dyn WeatherGateway>,
        rng: StdRng,
        weather_mode: WeatherMode,
        timeouts: TimeoutConfig,
    ) -> Self {
        Self {
            tasks,
            weather,
            rng: Mutex::new(rng),
            weather_mode,
            timeouts,
        }
    }

    /// Build a dispatcher using the mode, seed, and timeouts from `config`.
    #[must_use]
    pub fn from_config(
        config: &GlobalConfig,
        tasks: Arc<dyn TaskStore>,
        weather: Arc<dyn WeatherGateway>,
    ) -> Self {
        let rng = match config.fortune_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(
            tasks,
            weather,
            rng,
            config.weather_mode,
            config.timeouts.clone(),
        )
    }

    /// Produce the reply for `event`.
    ///
    /// Returns `None` only for the verification probe.
    pub async fn dispatch(&self, event: &InboundEvent) -> Option<ReplyContent> {
        if event.is_verification_probe() {
            info!("verification probe acknowledged without reply");
            return None;
        }

        let reply = match &event.payload {
            EventPayload::Text { body } => ReplyContent::text(self.reply_to_text(body).await),
            EventPayload::Sticker {
                sticker_id,
                resource_type,
            } => ReplyContent::text(sticker_reply(sticker_id, resource_type)),
            EventPayload::Location {
                latitude,
                longitude,
            } => self.reply_to_location(*latitude, *longitude).await,
            EventPayload::Other => ReplyContent::text(HELP_MESSAGE),
        };
        Some(reply)
    }

    async fn reply_to_text(&self, body: &str) -> String {
        let route = classify_text(body);
        debug!(?route, "text message classified");
        match route {
            TextRoute::Fortune => self.draw_fortune().to_owned(),
            TextRoute::Todo => {
                todo::execute(parse_command(body), self.tasks.as_ref(), self.timeouts.store())
                    .await
            }
            TextRoute::Echo => body.to_owned(),
        }
    }

    fn draw_fortune(&self) -> &'static str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        fortune(&mut *rng)
    }

    async fn reply_to_location(&self, latitude: f64, longitude: f64) -> ReplyContent {
        let result = match self.weather_mode {
            WeatherMode::Current => self.current_weather(latitude, longitude).await,
            WeatherMode::Forecast => self.forecast_weather(latitude, longitude).await,
        };
        result.unwrap_or_else(|err| {
            error!(%err, latitude, longitude, "weather reply failed");
            ReplyContent::text(INTERNAL_ERROR_MESSAGE)
        })
    }

    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<ReplyContent> {
        let now = with_timeout(
            "weather provider",
            self.timeouts.weather(),
            self.weather.current(latitude, longitude),
        )
        .await?;
        Ok(ReplyContent::text(current_weather_reply(
            &now.condition,
            now.temp_kelvin,
            now.humidity,
        )))
    }

    async fn forecast_weather(&self, latitude: f64, longitude: f64) -> Result<ReplyContent> {
        let samples = with_timeout(
            "weather provider",
            self.timeouts.weather(),
            self.weather.forecast(latitude, longitude),
        )
        .await?;
        let buckets = aggregate(&samples)?;

        let days = DAY_LABELS
            .iter()
            .zip(buckets)
            .map(|(label, bucket)| DaySummary {
                label: (*label).to_owned(),
                bucket,
            })
            .collect();
        Ok(ReplyContent::Carousel {
            alt_text: CAROUSEL_ALT_TEXT.to_owned(),
            days,
        })
    }
}
