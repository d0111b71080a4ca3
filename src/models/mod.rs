//! Domain model module declarations.

pub mod command;
pub mod event;
pub mod forecast;
pub mod reply;
pub mod task;
