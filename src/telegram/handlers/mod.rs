//! Telegram bot handler tree configuration
//!
//! This module provides the main dispatcher schema for the Telegram bot.
//! Branches only translate updates into dialog events; all menu logic lives
//! in [`crate::telegram::dialog`], so it can be tested without a bot.

mod commands;
mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
