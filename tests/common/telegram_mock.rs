//! Wiremock stand-in for the Bot API
//!
//! Answers the three delivery methods with canned successes and keeps every
//! request for inspection.

#![allow(dead_code)]

use serde_json::json;
use teloxide::Bot;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_CHAT_ID: i64 = 42;

pub struct TelegramMock {
    pub server: MockServer,
}

fn sent_message() -> serde_json::Value {
    json!({
        "ok": true,
        "result": {
            "message_id": 100,
            "date": 1_700_000_000,
            "chat": {"id": TEST_CHAT_ID, "type": "private", "first_name": "Test"},
            "text": "ok"
        }
    })
}

impl TelegramMock {
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        for api_method in ["sendmessage", "sendphoto"] {
            Mock::given(method("POST"))
                .and(path_regex(format!("(?i)/bot[^/]+/{}$", api_method)))
                .respond_with(ResponseTemplate::new(200).set_body_json(sent_message()))
                .mount(&server)
                .await;
        }

        Mock::given(method("POST"))
            .and(path_regex("(?i)/bot[^/]+/deletemessage$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": true})))
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn create_bot(&self) -> anyhow::Result<Bot> {
        Ok(Bot::new("test_token_12345:ABCDEF").set_api_url(self.server.uri().parse()?))
    }

    /// Lower-cased API method names of every request received, in order.
    pub async fn methods(&self) -> Vec<String> {
        self.requests()
            .await
            .iter()
            .filter_map(|r| r.url.path().rsplit('/').next().map(str::to_lowercase))
            .collect()
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }
}
