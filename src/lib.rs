//! Berdybot - Telegram bot for weather, exchange rates and crypto prices
//!
//! This library provides the menu dispatcher, the upstream data fetchers and
//! the Telegram transport used by the `berdybot` binary.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, and the season mapper
//! - `upstream`: Weather, fiat and crypto providers and the startup snapshot
//! - `conversion`: Amount conversion for the currency and crypto menus
//! - `telegram`: Menus, dialog routing, handlers and delivery

pub mod cli;
pub mod conversion;
pub mod core;
pub mod telegram;
pub mod upstream;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use telegram::{schema, HandlerDeps, MenuRouter};
pub use upstream::{Snapshot, UpstreamClient, UpstreamError, WeatherLookup};
