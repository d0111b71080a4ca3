//! Messaging platform integration: webhook intake and reply delivery.

pub mod client;
pub mod flex;
pub mod server;
pub mod signature;
pub mod webhook;
