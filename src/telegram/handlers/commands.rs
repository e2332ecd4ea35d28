//! Command handler implementations (/start, /help)

use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::dialog::Inbound;
use crate::telegram::transport::{deliver, greeting_name};
use crate::telegram::Bot;

/// Handle /start command
///
/// Clears any pending continuation, deletes the command message and greets
/// the user with the main menu.
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let inbound = Inbound::Start {
        greeting_name: greeting_name(msg),
        message_id: Some(msg.id),
    };
    let replies = deps.router.handle(msg.chat.id, inbound).await;
    deliver(bot, msg.chat.id, replies).await?;
    Ok(())
}

/// Handle /help command
pub(super) async fn handle_help_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let replies = deps.router.handle(msg.chat.id, Inbound::Help).await;
    deliver(bot, msg.chat.id, replies).await?;
    Ok(())
}
