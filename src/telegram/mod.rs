//! Telegram bot integration and handlers

pub mod bot;
pub mod continuation;
pub mod dialog;
pub mod handlers;
pub mod menu;
pub mod transport;
pub mod webhook;

pub use teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use continuation::{Continuation, ContinuationStore};
pub use dialog::{Inbound, MenuRouter, Reply};
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use webhook::run_webhook;
