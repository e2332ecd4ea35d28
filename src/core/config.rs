//! Configuration values for the bot.
//!
//! Everything here is read once from the environment on first access; `main`
//! loads `.env` through `dotenvy` before touching any of these.

use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;
use strum::{Display, EnumString};

use crate::core::error::AppError;

/// Reads a variable and treats blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Bot token
/// Read from BOT_TOKEN, TELOXIDE_TOKEN or BOT_API_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    non_empty_var("BOT_TOKEN")
        .or_else(|| non_empty_var("TELOXIDE_TOKEN"))
        .or_else(|| non_empty_var("BOT_API_TOKEN"))
        .unwrap_or_default()
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: berdybot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| non_empty_var("LOG_FILE_PATH").unwrap_or_else(|| "berdybot.log".to_string()));

/// How inbound updates reach the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DeliveryMode {
    /// Long polling against the Bot API (default)
    #[default]
    Polling,
    /// Telegram pushes updates to our HTTP endpoint
    Webhook,
}

/// Which weather menu the main "Weather" button opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WeatherMenuStyle {
    /// Reply with the current temperature right away
    Simple,
    /// Open a submenu: current, by city, full day forecast
    #[default]
    Extended,
}

/// Parses an enum-valued variable, falling back to the default on absent or
/// unrecognized values.
fn parse_or_default<T>(name: &str, raw: Option<String>) -> T
where
    T: std::str::FromStr + Default,
{
    match raw {
        Some(value) => value.parse().unwrap_or_else(|_| {
            log::warn!("Unrecognized {} value {:?}, using default", name, value);
            T::default()
        }),
        None => T::default(),
    }
}

/// Delivery mode
/// Read from DELIVERY_MODE environment variable ("polling" or "webhook")
/// Default: polling
pub static DELIVERY_MODE: Lazy<DeliveryMode> =
    Lazy::new(|| parse_or_default("DELIVERY_MODE", non_empty_var("DELIVERY_MODE")));

/// Public base URL Telegram should push updates to (webhook mode only).
/// Read from WEBHOOK_URL environment variable
pub static WEBHOOK_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("WEBHOOK_URL"));

/// Parses a listen port, defaulting to 8443.
pub fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|s| s.trim().parse::<u16>().ok()).unwrap_or(8443)
}

/// Port the webhook server listens on
/// Read from PORT environment variable
/// Default: 8443
pub static PORT: Lazy<u16> = Lazy::new(|| parse_port(non_empty_var("PORT").as_deref()));

/// Upstream data providers configuration
pub mod upstream {
    use once_cell::sync::Lazy;

    use super::non_empty_var;

    /// Meteosource API key
    /// Read from WEATHER_API_TOKEN environment variable
    pub static WEATHER_API_TOKEN: Lazy<String> =
        Lazy::new(|| non_empty_var("WEATHER_API_TOKEN").unwrap_or_default());

    /// Place slug used for the startup weather snapshot
    /// Read from WEATHER_PLACE environment variable
    /// Default: berdychiv
    pub static WEATHER_PLACE: Lazy<String> =
        Lazy::new(|| non_empty_var("WEATHER_PLACE").unwrap_or_else(|| "berdychiv".to_string()));

    /// Weather provider base URL
    /// Read from WEATHER_API_URL environment variable
    pub static WEATHER_API_URL: Lazy<String> = Lazy::new(|| {
        non_empty_var("WEATHER_API_URL").unwrap_or_else(|| "https://www.meteosource.com/api/v1/free".to_string())
    });

    /// Fiat exchange rate provider base URL
    /// Read from FIAT_API_URL environment variable
    pub static FIAT_API_URL: Lazy<String> =
        Lazy::new(|| non_empty_var("FIAT_API_URL").unwrap_or_else(|| "https://api.privatbank.ua/p24api".to_string()));

    /// Crypto market provider base URL
    /// Read from CRYPTO_API_URL environment variable
    pub static CRYPTO_API_URL: Lazy<String> = Lazy::new(|| {
        non_empty_var("CRYPTO_API_URL").unwrap_or_else(|| "https://api.coingecko.com/api/v3".to_string())
    });
}

/// Menu configuration
pub mod menu {
    use once_cell::sync::Lazy;

    use super::{non_empty_var, parse_or_default, WeatherMenuStyle};

    /// Weather menu style
    /// Read from WEATHER_MENU environment variable ("simple" or "extended")
    /// Default: extended
    pub static WEATHER_MENU: Lazy<WeatherMenuStyle> =
        Lazy::new(|| parse_or_default("WEATHER_MENU", non_empty_var("WEATHER_MENU")));
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Timeout for upstream data provider requests (in seconds)
    pub const UPSTREAM_TIMEOUT_SECS: u64 = 15;

    /// Timeout for Bot API requests (in seconds); must exceed the long polling timeout
    pub const BOT_API_TIMEOUT_SECS: u64 = 60;

    /// Upstream request timeout duration
    pub fn upstream_timeout() -> Duration {
        Duration::from_secs(UPSTREAM_TIMEOUT_SECS)
    }

    /// Bot API request timeout duration
    pub fn bot_api_timeout() -> Duration {
        Duration::from_secs(BOT_API_TIMEOUT_SECS)
    }
}

/// Checks that everything required to start serving is present.
///
/// # Arguments
/// * `mode` - Effective delivery mode (CLI flag already applied)
///
/// # Returns
/// * `Ok(())` - Configuration is complete
/// * `Err(AppError::Config)` - Names the first missing value
pub fn validate(mode: DeliveryMode) -> Result<(), AppError> {
    check_required(
        BOT_TOKEN.as_str(),
        upstream::WEATHER_API_TOKEN.as_str(),
        mode,
        WEBHOOK_URL.as_deref(),
    )
}

fn check_required(
    bot_token: &str,
    weather_token: &str,
    mode: DeliveryMode,
    webhook_url: Option<&str>,
) -> Result<(), AppError> {
    if bot_token.is_empty() {
        return Err(AppError::Config(
            "BOT_TOKEN (or TELOXIDE_TOKEN / BOT_API_TOKEN) is not set".to_string(),
        ));
    }
    if weather_token.is_empty() {
        return Err(AppError::Config("WEATHER_API_TOKEN is not set".to_string()));
    }
    if mode == DeliveryMode::Webhook && webhook_url.is_none() {
        return Err(AppError::Config("WEBHOOK_URL is required in webhook mode".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_mode_parses_case_insensitively() {
        assert_eq!("webhook".parse::<DeliveryMode>().ok(), Some(DeliveryMode::Webhook));
        assert_eq!("POLLING".parse::<DeliveryMode>().ok(), Some(DeliveryMode::Polling));
        assert!("carrier-pigeon".parse::<DeliveryMode>().is_err());
    }

    #[test]
    fn test_parse_or_default_falls_back() {
        let style: WeatherMenuStyle = parse_or_default("WEATHER_MENU", Some("fancy".to_string()));
        assert_eq!(style, WeatherMenuStyle::Extended);

        let style: WeatherMenuStyle = parse_or_default("WEATHER_MENU", Some("Simple".to_string()));
        assert_eq!(style, WeatherMenuStyle::Simple);

        let mode: DeliveryMode = parse_or_default("DELIVERY_MODE", None);
        assert_eq!(mode, DeliveryMode::Polling);
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(Some("8080")), 8080);
        assert_eq!(parse_port(Some(" 443 ")), 443);
        assert_eq!(parse_port(Some("not-a-port")), 8443);
        assert_eq!(parse_port(Some("70000")), 8443);
        assert_eq!(parse_port(None), 8443);
    }

    #[test]
    fn test_check_required() {
        assert!(check_required("token", "key", DeliveryMode::Polling, None).is_ok());
        assert!(check_required("token", "key", DeliveryMode::Webhook, Some("https://example.com")).is_ok());

        let err = check_required("", "key", DeliveryMode::Polling, None).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));

        let err = check_required("token", "", DeliveryMode::Polling, None).unwrap_err();
        assert!(err.to_string().contains("WEATHER_API_TOKEN"));

        let err = check_required("token", "key", DeliveryMode::Webhook, None).unwrap_err();
        assert!(err.to_string().contains("WEBHOOK_URL"));
    }
}
