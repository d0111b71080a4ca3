#![forbid(unsafe_code)]

//! `reply-bot` — conversational webhook responder.
//!
//! Classifies inbound messaging-platform events and produces exactly one
//! reply per event: a fortune draw, an echo, a weather summary, or the
//! result of a task-list command.

pub mod config;
pub mod errors;
pub mod line;
pub mod models;
pub mod persistence;
pub mod reply;
pub mod weather;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
