//! Delivery of dialog replies through the Bot API

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, Message};

use super::dialog::Reply;
use super::menu::Keyboard;
use crate::telegram::Bot;

/// Callback button carrying an action id.
pub fn cb(label: impl Into<String>, data: impl Into<String>) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, data)
}

/// Renders a menu keyboard as inline markup.
pub fn to_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        keyboard
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| cb(button.label.clone(), button.action.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>(),
    )
}

/// Name used in the `/start` greeting: `@username` when the sender has one,
/// the first name otherwise.
pub fn greeting_name(msg: &Message) -> String {
    match msg.from.as_ref() {
        Some(user) => match user.username.as_deref() {
            Some(username) => format!("@{}", username),
            None => user.first_name.clone(),
        },
        None => "friend".to_string(),
    }
}

async fn send_text(bot: &Bot, chat_id: ChatId, text: String, keyboard: Option<Keyboard>) -> ResponseResult<Message> {
    let request = bot.send_message(chat_id, text);
    match keyboard {
        Some(keyboard) => request.reply_markup(to_markup(&keyboard)).await,
        None => request.await,
    }
}

async fn send_photo(
    bot: &Bot,
    chat_id: ChatId,
    url: String,
    caption: String,
    keyboard: Option<Keyboard>,
) -> ResponseResult<Message> {
    let photo = match url::Url::parse(&url) {
        Ok(parsed) => InputFile::url(parsed),
        Err(e) => {
            log::warn!("Chat {}: bad image URL {:?} ({}), sending caption only", chat_id, url, e);
            return send_text(bot, chat_id, caption, keyboard).await;
        }
    };

    let request = bot.send_photo(chat_id, photo).caption(caption);
    match keyboard {
        Some(keyboard) => request.reply_markup(to_markup(&keyboard)).await,
        None => request.await,
    }
}

/// Sends replies in order.
///
/// A failed deletion is logged and skipped; a failed send aborts the rest.
pub async fn deliver(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> ResponseResult<()> {
    for reply in replies {
        match reply {
            Reply::Text { text, keyboard } => {
                send_text(bot, chat_id, text, keyboard).await?;
            }
            Reply::Photo { url, caption, keyboard } => {
                send_photo(bot, chat_id, url, caption, keyboard).await?;
            }
            Reply::Delete(message_id) => {
                if let Err(e) = bot.delete_message(chat_id, message_id).await {
                    log::warn!("Chat {}: failed to delete message {}: {}", chat_id, message_id.0, e);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::menu::{currency_keyboard, Action};
    use crate::upstream::Currency;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_markup_carries_action_ids() {
        let markup = to_markup(&currency_keyboard());
        assert_eq!(markup.inline_keyboard.len(), 3);

        let dollar = &markup.inline_keyboard[1][0];
        assert_eq!(dollar.text, "🇺🇸 Dollar");
        match &dollar.kind {
            InlineKeyboardButtonKind::CallbackData(data) => {
                assert_eq!(data, &Action::ConvertFiat(Currency::Usd).to_string())
            }
            other => panic!("unexpected button kind: {:?}", other),
        }
    }
}
