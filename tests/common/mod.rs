//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;
pub mod telegram_mock;

#[allow(unused_imports)]
pub use fixtures::{router_with, sample_router, sample_snapshot, FakeWeather};
#[allow(unused_imports)]
pub use telegram_mock::{TelegramMock, TEST_CHAT_ID};
