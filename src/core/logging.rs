//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - Startup configuration banner with secrets masked

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config::{self, DeliveryMode};

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Masks a secret for logging, keeping only a short prefix and suffix.
///
/// Secrets of 8 characters or fewer are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.is_empty() {
        return "<not set>".to_string();
    }
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

/// Logs the effective configuration at application startup
///
/// Tokens are masked; URLs and modes are logged as-is.
pub fn log_startup_configuration(mode: DeliveryMode) {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("⚙️  Configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("BOT_TOKEN:         {}", mask_secret(&config::BOT_TOKEN));
    log::info!(
        "WEATHER_API_TOKEN: {}",
        mask_secret(&config::upstream::WEATHER_API_TOKEN)
    );
    log::info!("WEATHER_PLACE:     {}", *config::upstream::WEATHER_PLACE);
    log::info!("WEATHER_API_URL:   {}", *config::upstream::WEATHER_API_URL);
    log::info!("FIAT_API_URL:      {}", *config::upstream::FIAT_API_URL);
    log::info!("CRYPTO_API_URL:    {}", *config::upstream::CRYPTO_API_URL);
    log::info!("WEATHER_MENU:      {}", *config::menu::WEATHER_MENU);
    log::info!("Delivery mode:     {}", mode);

    if mode == DeliveryMode::Webhook {
        match config::WEBHOOK_URL.as_deref() {
            Some(url) => log::info!("WEBHOOK_URL:       {} (port {})", url, *config::PORT),
            None => log::error!("❌ WEBHOOK_URL: not set, webhook mode cannot start"),
        }
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
