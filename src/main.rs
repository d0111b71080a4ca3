#![forbid(unsafe_code)]

//! `reply-bot` — webhook responder binary.
//!
//! Bootstraps configuration and credentials, opens the task database, and
//! serves the webhook endpoint until interrupted.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use reply_bot::config::GlobalConfig;
use reply_bot::line::client::LineClient;
use reply_bot::line::server::{self, AppState};
use reply_bot::persistence::db;
use reply_bot::persistence::task_repo::TaskRepo;
use reply_bot::reply::dispatcher::ReplyDispatcher;
use reply_bot::weather::openweather::OpenWeatherClient;
use reply_bot::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "reply-bot", about = "Messaging webhook responder", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;
    info!("reply-bot bootstrap");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration ──────────────────────────────
    let mut config = GlobalConfig::load_from_path(&args.config)?;
    config.apply_port_override()?;
    config.load_credentials().await?;
    let config = Arc::new(config);
    info!(
        port = config.http_port,
        weather_mode = ?config.weather_mode,
        "configuration loaded"
    );

    // ── Initialize database ─────────────────────────────
    let db = Arc::new(db::connect(&config.db_path).await?);
    info!(path = %config.db_path.display(), "database connected");

    // ── Build collaborators ─────────────────────────────
    let tasks = Arc::new(TaskRepo::new(db));
    let weather = Arc::new(OpenWeatherClient::new(
        &config.weather,
        config.timeouts.weather(),
    )?);
    let sender = Arc::new(LineClient::new(&config.line, config.timeouts.reply())?);
    let dispatcher = Arc::new(ReplyDispatcher::from_config(&config, tasks, weather));

    let state = Arc::new(AppState {
        config: Arc::clone(&config),
        dispatcher,
        sender,
    });

    // ── Start webhook listener ──────────────────────────
    let ct = CancellationToken::new();
    let server_ct = ct.clone();
    let failure_ct = ct.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(err) = server::serve(state, server_ct).await {
            error!(%err, "webhook listener failed");
            failure_ct.cancel();
        }
    });

    info!("reply-bot ready");

    // ── Wait for shutdown signal ────────────────────────
    tokio::select! {
        () = shutdown_signal() => {
            info!("shutdown signal received");
            ct.cancel();
        }
        () = ct.cancelled() => {}
    }

    let _ = server_handle.await;
    info!("reply-bot shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to register SIGTERM handler, using ctrl-c only");
                let _ = ctrl_c.await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = ctrl_c.await {
            tracing::error!(%err, "ctrl-c signal handler failed");
        }
    }
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
