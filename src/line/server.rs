//! HTTP webhook listener.
//!
//! `POST /callback` receives event batches, `GET /health` answers `ok`.
//! A request whose signature does not verify is rejected with 400; a body
//! that does not decode is rejected with 500. Otherwise each event is
//! dispatched and its reply delivered before the 200 response goes out.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::client::ReplySender;
use super::signature::{self, SIGNATURE_HEADER};
use super::webhook::parse_events;
use crate::config::GlobalConfig;
use crate::models::event::InboundEvent;
use crate::reply::dispatcher::ReplyDispatcher;
use crate::reply::with_timeout;
use crate::{AppError, Result};

/// Shared state for webhook handlers.
pub struct AppState {
    /// Loaded configuration, including credentials.
    pub config: Arc<GlobalConfig>,
    /// Event-to-reply pipeline.
    pub dispatcher: Arc<ReplyDispatcher>,
    /// Outbound delivery.
    pub sender: Arc<dyn ReplySender>,
}

/// Handler for `GET /health`.
async fn health() -> &'static str {
    "ok"
}

/// Handler for `POST /callback`.
async fn callback(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let request_id = Uuid::new_v4();
    async move {
        info!("webhook accessed");

        let Some(sig) = headers
            .get(SIGNATURE_HEADER)
            .and_then(|value| value.to_str().ok())
        else {
            warn!("missing signature header");
            return StatusCode::BAD_REQUEST;
        };

        if let Err(err) = signature::verify(&state.config.line.channel_secret, &body, sig) {
            warn!(%err, "rejecting webhook with invalid signature");
            return StatusCode::BAD_REQUEST;
        }

        let events = match parse_events(&body) {
            Ok(events) => events,
            Err(err) => {
                error!(%err, "failed to decode webhook body");
                return StatusCode::INTERNAL_SERVER_ERROR;
            }
        };

        for event in &events {
            handle_event(&state, event).await;
        }

        StatusCode::OK
    }
    .instrument(info_span!("webhook", %request_id))
    .await
}

/// Dispatch one event and deliver its reply, if any.
async fn handle_event(state: &AppState, event: &InboundEvent) {
    let Some(reply) = state.dispatcher.dispatch(event).await else {
        return;
    };

    let budget = state.config.timeouts.reply();
    if let Err(err) = with_timeout(
        "reply delivery",
        budget,
        state.sender.reply(&event.reply_token, &reply),
    )
    .await
    {
        error!(%err, "reply delivery failed");
    }
}

/// Build the webhook router.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind `0.0.0.0:config.http_port` and serve until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Config` if the listener cannot bind, or
/// `AppError::Io` if the server fails.
pub async fn serve(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let bind = SocketAddr::from(([0, 0, 0, 0], state.config.http_port));
    let listener = TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind webhook on {bind}: {err}")))?;
    serve_on(listener, state, ct).await
}

/// Serve on an already-bound listener until `ct` is cancelled.
///
/// # Errors
///
/// Returns `AppError::Io` if the server fails.
pub async fn serve_on(
    listener: TcpListener,
    state: Arc<AppState>,
    ct: CancellationToken,
) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "starting webhook listener");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { ct.cancelled().await })
        .await
        .map_err(|err| AppError::Io(format!("webhook server error: {err}")))?;

    info!("webhook listener shut down");
    Ok(())
}
