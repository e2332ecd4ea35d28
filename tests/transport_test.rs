//! Reply delivery against a mocked Bot API
//!
//! Run with: cargo test --test transport_test

mod common;

use pretty_assertions::assert_eq;
use teloxide::types::{ChatId, MessageId};

use berdybot::telegram::dialog::{Inbound, Reply};
use berdybot::telegram::transport::deliver;
use common::{sample_router, TelegramMock, TEST_CHAT_ID};

#[tokio::test]
async fn test_start_replies_are_delivered_in_order() {
    let mock = TelegramMock::start().await;
    let bot = mock.create_bot().unwrap();
    let (router, _) = sample_router();
    let chat = ChatId(TEST_CHAT_ID);

    let replies = router
        .handle(
            chat,
            Inbound::Start {
                greeting_name: "@alice".to_string(),
                message_id: Some(MessageId(7)),
            },
        )
        .await;
    deliver(&bot, chat, replies).await.unwrap();

    assert_eq!(mock.methods().await, vec!["deletemessage", "sendmessage"]);

    let requests = mock.requests().await;
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["chat_id"], TEST_CHAT_ID);
    assert_eq!(body["text"], "Greetings, @alice.");

    let rows = body["reply_markup"]["inline_keyboard"].as_array().unwrap();
    let callbacks: Vec<&str> = rows
        .iter()
        .flat_map(|row| row.as_array().unwrap())
        .map(|button| button["callback_data"].as_str().unwrap())
        .collect();
    assert_eq!(callbacks, vec!["main:weather", "main:currency", "main:crypto"]);
}

#[tokio::test]
async fn test_photo_reply_uses_send_photo() {
    let mock = TelegramMock::start().await;
    let bot = mock.create_bot().unwrap();
    let chat = ChatId(TEST_CHAT_ID);

    let replies = vec![Reply::Photo {
        url: "https://img.example/btc.png".to_string(),
        caption: "BTC: 130000.00".to_string(),
        keyboard: None,
    }];
    deliver(&bot, chat, replies).await.unwrap();

    assert_eq!(mock.methods().await, vec!["sendphoto"]);
}

#[tokio::test]
async fn test_nothing_sent_for_ignored_input() {
    let mock = TelegramMock::start().await;
    let bot = mock.create_bot().unwrap();
    let (router, _) = sample_router();
    let chat = ChatId(TEST_CHAT_ID);

    let replies = router.handle(chat, Inbound::Text("hello".to_string())).await;
    deliver(&bot, chat, replies).await.unwrap();

    assert!(mock.methods().await.is_empty());
}
