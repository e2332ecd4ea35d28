//! One-shot per-chat follow-ups
//!
//! Choosing "By city" or a currency/coin registers a continuation for the
//! chat; the next text message from that chat consumes it. At most one is
//! pending per chat, and registering a new one replaces the old.

use std::sync::Arc;

use dashmap::DashMap;
use teloxide::types::ChatId;

use crate::upstream::CryptoAsset;

/// What to do with the next text message from a chat.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuation {
    /// Treat the text as a city name and look up its weather
    LookupCityWeather,
    /// Multiply the text by a rate captured when the currency was chosen
    ConvertCurrency { rate: f64, symbol: &'static str },
    /// Multiply the text by the coin price captured when the coin was chosen
    ConvertCrypto { asset: CryptoAsset },
}

/// Pending continuations keyed by chat.
///
/// Cloning shares the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct ContinuationStore {
    pending: Arc<DashMap<ChatId, Continuation>>,
}

impl ContinuationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a continuation, replacing any pending one for the chat.
    pub fn register(&self, chat_id: ChatId, continuation: Continuation) {
        if let Some(previous) = self.pending.insert(chat_id, continuation) {
            log::debug!("Chat {}: replaced pending {:?}", chat_id, previous);
        }
    }

    /// Removes and returns the chat's pending continuation.
    pub fn take(&self, chat_id: ChatId) -> Option<Continuation> {
        self.pending.remove(&chat_id).map(|(_, continuation)| continuation)
    }

    /// Drops the chat's pending continuation, if any.
    pub fn clear(&self, chat_id: ChatId) {
        self.pending.remove(&chat_id);
    }

    pub fn is_pending(&self, chat_id: ChatId) -> bool {
        self.pending.contains_key(&chat_id)
    }

    /// Number of chats with a pending continuation.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
