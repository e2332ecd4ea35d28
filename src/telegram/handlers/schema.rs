//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_help_command, handle_start_command};
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::dialog::Inbound;
use crate::telegram::menu::Action;
use crate::telegram::transport::deliver;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema serves both long polling and webhook delivery.
///
/// # Arguments
/// * `deps` - Handler dependencies (the menu router)
///
/// # Returns
/// The complete handler tree for the bot
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_location = deps.clone();
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        // Command handler
        .branch(command_handler(deps_commands))
        // Shared locations are only logged
        .branch(location_handler(deps_location))
        // Free text feeds pending continuations
        .branch(message_handler(deps_messages))
        // Callback query handler
        .branch(callback_handler(deps_callback))
}

fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start => handle_start_command(&bot, &msg, &deps).await?,
                    Command::Help => handle_help_command(&bot, &msg, &deps).await?,
                }
                Ok(())
            }
        },
    ))
}

fn location_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.location().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                if let Some(location) = msg.location() {
                    let inbound = Inbound::Location {
                        latitude: location.latitude,
                        longitude: location.longitude,
                    };
                    let replies = deps.router.handle(msg.chat.id, inbound).await;
                    deliver(&bot, msg.chat.id, replies).await?;
                }
                Ok(())
            }
        })
}

/// Handler for plain text messages
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let text = msg.text().unwrap_or_default().to_string();
                let replies = deps.router.handle(msg.chat.id, Inbound::Text(text)).await;
                if let Err(e) = deliver(&bot, msg.chat.id, replies).await {
                    log::error!("❌ Failed to reply to chat {}: {}", msg.chat.id, e);
                    return Err(Box::new(e) as HandlerError);
                }
                Ok(())
            }
        })
}

/// Handler for callback queries (inline keyboard buttons)
fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move {
            // Stop the button spinner whatever happens next
            let _ = bot.answer_callback_query(q.id.clone()).await;

            let Some(data) = q.data.as_deref() else {
                return Ok(());
            };
            let action = match data.parse::<Action>() {
                Ok(action) => action,
                Err(e) => {
                    log::debug!("Ignoring callback: {}", e);
                    return Ok(());
                }
            };

            let chat_id = q
                .message
                .as_ref()
                .map(|m| m.chat().id)
                .unwrap_or_else(|| ChatId::from(q.from.id));

            let replies = deps.router.handle(chat_id, Inbound::Action(action)).await;
            deliver(&bot, chat_id, replies).await?;
            Ok(())
        }
    })
}
