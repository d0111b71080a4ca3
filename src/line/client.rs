//! Reply delivery to the messaging platform.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::config::LineConfig;
use crate::models::reply::ReplyContent;
use crate::{AppError, Result};

use super::flex::message_object;

/// Outbound seam: deliver one reply for one reply token.
///
/// Failures are reported to the caller; nothing here retries.
pub trait ReplySender: Send + Sync {
    /// Send `content` as the reply for `reply_token`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Line` if delivery fails.
    fn reply<'a>(
        &'a self,
        reply_token: &'a str,
        content: &'a ReplyContent,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// HTTP client for the reply endpoint.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl LineClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Line` if the HTTP client cannot be built.
    pub fn new(config: &LineConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Line(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_owned(),
            access_token: config.channel_access_token.clone(),
        })
    }

    /// Post a reply message.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Line` on transport failure or a non-2xx status.
    pub async fn send_reply(&self, reply_token: &str, content: &ReplyContent) -> Result<()> {
        let body = json!({
            "replyToken": reply_token,
            "messages": [message_object(content)],
        });

        let response = self
            .http
            .post(format!("{}/v2/bot/message/reply", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::Line(format!("failed to send reply: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::Line(format!(
                "reply API returned {status}: {detail}"
            )));
        }

        debug!("reply delivered");
        Ok(())
    }
}

impl ReplySender for LineClient {
    fn reply<'a>(
        &'a self,
        reply_token: &'a str,
        content: &'a ReplyContent,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(self.send_reply(reply_token, content))
    }
}
