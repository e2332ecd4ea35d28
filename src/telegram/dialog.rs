//! Menu/dialog dispatcher
//!
//! [`MenuRouter`] turns one inbound event from a chat into the replies to
//! send back. It knows nothing about teloxide requests: the handler tree
//! converts updates into [`Inbound`] and the transport layer delivers the
//! resulting [`Reply`] list in order.
//!
//! Menu state is not tracked per chat. Every button carries an [`Action`],
//! so a press is routed the same way no matter which message it came from.
//! The only per-chat state is the pending [`Continuation`].

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use teloxide::types::{ChatId, MessageId};

use super::continuation::{Continuation, ContinuationStore};
use super::menu::{crypto_keyboard, currency_keyboard, main_keyboard, weather_keyboard, Action, Keyboard};
use crate::conversion::{convert_crypto, convert_currency};
use crate::core::config::WeatherMenuStyle;
use crate::core::error::AppError;
use crate::upstream::weather::{display_place, place_slug};
use crate::upstream::{Currency, Snapshot, TrackedCoin, WeatherConditions, WeatherLookup};

pub const CITY_PROMPT: &str = "Enter the city name";
pub const NUMBER_PROMPT: &str = "Enter the number";
pub const MAIN_MENU_TEXT: &str = "Main menu";
pub const FAILURE_TEXT: &str = "Something went wrong, please try again.";

pub const HELP_TEXT: &str = "I can show you:\n\
    • Weather: current conditions, any city, or the full day forecast\n\
    • Currency: exchange rates for USD, EUR and PLN, and conversion to UAH\n\
    • Cryptocurrency: prices in USD, and conversion of any amount\n\n\
    Press /start to open the menu.";

/// An event from a chat, already stripped of transport details.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// `/start`; `message_id` is the command message, deleted before the greeting
    Start {
        greeting_name: String,
        message_id: Option<MessageId>,
    },
    Help,
    /// Inline button press
    Action(Action),
    /// Plain text message
    Text(String),
    /// Shared location; logged, never answered
    Location { latitude: f64, longitude: f64 },
}

/// One outbound operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text {
        text: String,
        keyboard: Option<Keyboard>,
    },
    Photo {
        url: String,
        caption: String,
        keyboard: Option<Keyboard>,
    },
    Delete(MessageId),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Reply::Text {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }

    /// Text or caption, `None` for deletions.
    pub fn body(&self) -> Option<&str> {
        match self {
            Reply::Text { text, .. } => Some(text),
            Reply::Photo { caption, .. } => Some(caption),
            Reply::Delete(_) => None,
        }
    }

    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Reply::Text { keyboard, .. } | Reply::Photo { keyboard, .. } => keyboard.as_ref(),
            Reply::Delete(_) => None,
        }
    }
}

/// Routes inbound events to menu branches and continuations.
///
/// Cheap to clone; all clones share the snapshot and the continuation store.
#[derive(Clone)]
pub struct MenuRouter {
    snapshot: Arc<Snapshot>,
    weather: Arc<dyn WeatherLookup>,
    continuations: ContinuationStore,
    weather_menu: WeatherMenuStyle,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl MenuRouter {
    /// # Arguments
    /// * `snapshot` - Upstream data fetched at startup
    /// * `weather` - On-demand lookup used by the "By city" flow
    /// * `weather_menu` - Whether "Weather" opens a submenu or answers directly
    pub fn new(snapshot: Arc<Snapshot>, weather: Arc<dyn WeatherLookup>, weather_menu: WeatherMenuStyle) -> Self {
        Self {
            snapshot,
            weather,
            continuations: ContinuationStore::new(),
            weather_menu,
            today: local_today,
        }
    }

    /// Replaces the clock used for the seasonal Weather label.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn continuations(&self) -> &ContinuationStore {
        &self.continuations
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Display name of the snapshot place, e.g. `Berdychiv`.
    pub fn place_name(&self) -> String {
        display_place(&self.snapshot.place)
    }

    fn main_keyboard(&self) -> Keyboard {
        main_keyboard((self.today)())
    }

    fn back_to_main(&self, text: impl Into<String>) -> Reply {
        Reply::with_keyboard(text, self.main_keyboard())
    }

    /// Handles one event from a chat.
    ///
    /// # Returns
    /// Replies to deliver in order; empty when the event is ignored.
    pub async fn handle(&self, chat_id: ChatId, inbound: Inbound) -> Vec<Reply> {
        match inbound {
            Inbound::Start {
                greeting_name,
                message_id,
            } => self.start(chat_id, &greeting_name, message_id),
            Inbound::Help => vec![Reply::with_keyboard(HELP_TEXT, self.main_keyboard())],
            Inbound::Action(action) => {
                // A button press abandons whatever the chat was asked to type
                self.continuations.clear(chat_id);
                self.on_action(chat_id, action)
            }
            Inbound::Text(text) => match self.continuations.take(chat_id) {
                Some(continuation) => vec![self.resume(continuation, &text).await],
                None => {
                    log::debug!("Chat {}: ignoring text without pending continuation", chat_id);
                    Vec::new()
                }
            },
            Inbound::Location { latitude, longitude } => {
                log::info!("📍 Chat {} shared location {}, {}", chat_id, latitude, longitude);
                Vec::new()
            }
        }
    }

    fn start(&self, chat_id: ChatId, greeting_name: &str, message_id: Option<MessageId>) -> Vec<Reply> {
        self.continuations.clear(chat_id);

        let mut replies = Vec::with_capacity(2);
        if let Some(id) = message_id {
            replies.push(Reply::Delete(id));
        }
        replies.push(self.back_to_main(format!("Greetings, {}.", greeting_name)));
        replies
    }

    fn on_action(&self, chat_id: ChatId, action: Action) -> Vec<Reply> {
        log::debug!("Chat {}: action {}", chat_id, action);

        let reply = match action {
            Action::Weather => match self.weather_menu {
                WeatherMenuStyle::Simple => self.back_to_main(format!(
                    "Now in {} temperature is {}",
                    self.place_name(),
                    self.snapshot.weather.current.temperature
                )),
                WeatherMenuStyle::Extended => Reply::with_keyboard("Choose a weather option", weather_keyboard()),
            },
            Action::Currency => Reply::with_keyboard("Choose a currency", currency_keyboard()),
            Action::Crypto => Reply::with_keyboard("Choose a cryptocurrency", crypto_keyboard()),
            Action::BackToMain => self.back_to_main(MAIN_MENU_TEXT),

            Action::WeatherCurrent => {
                self.back_to_main(current_report(&self.place_name(), &self.snapshot.weather.current))
            }
            Action::WeatherByCity => {
                self.continuations.register(chat_id, Continuation::LookupCityWeather);
                Reply::text(CITY_PROMPT)
            }
            Action::WeatherForecast => self.back_to_main(self.snapshot.weather.forecast_text(&self.place_name())),

            Action::AllRates => self.back_to_main(self.snapshot.fiat.summary_text()),
            Action::ConvertFiat(currency) => {
                self.continuations.register(chat_id, currency_continuation(&self.snapshot, currency));
                Reply::text(NUMBER_PROMPT)
            }

            Action::AllPrices => self.back_to_main(crate::upstream::crypto::prices_text(&self.snapshot.crypto)),
            Action::ConvertCoin(coin) => match self.snapshot.coin(coin) {
                Some(asset) => {
                    self.continuations
                        .register(chat_id, Continuation::ConvertCrypto { asset: asset.clone() });
                    Reply::text(NUMBER_PROMPT)
                }
                None => return missing_coin(coin),
            },
        };

        vec![reply]
    }

    async fn resume(&self, continuation: Continuation, text: &str) -> Reply {
        match continuation {
            Continuation::LookupCityWeather => match self.lookup_city(text).await {
                Ok(report) => self.back_to_main(report),
                Err(e) => self.recoverable(e),
            },
            Continuation::ConvertCurrency { rate, symbol } => match convert_currency(text, rate, symbol) {
                Ok(result) => self.back_to_main(result),
                Err(e) => self.recoverable(e),
            },
            Continuation::ConvertCrypto { asset } => match convert_crypto(text, &asset) {
                Ok(quote) => Reply::Photo {
                    url: quote.image_url,
                    caption: quote.caption,
                    keyboard: Some(self.main_keyboard()),
                },
                Err(e) => self.recoverable(e),
            },
        }
    }

    /// Looks up current weather for a user-typed city name.
    ///
    /// Any upstream failure means the city is treated as unknown.
    async fn lookup_city(&self, text: &str) -> Result<String, AppError> {
        let slug = place_slug(text);
        if slug.is_empty() {
            return Err(AppError::UnknownCity(text.to_string()));
        }

        match self.weather.weather_for(&slug).await {
            Ok(report) => Ok(current_report(&display_place(&slug), &report.current)),
            Err(e) => {
                log::warn!("City lookup for {:?} failed: {}", slug, e);
                Err(AppError::UnknownCity(text.to_string()))
            }
        }
    }

    fn recoverable(&self, err: AppError) -> Reply {
        self.back_to_main(error_text(&err))
    }
}

/// User-facing text for a failed continuation.
fn error_text(err: &AppError) -> &'static str {
    match err.user_message() {
        Some(text) => {
            log::info!("Recoverable input error: {}", err);
            text
        }
        None => {
            log::error!("Continuation failed: {}", err);
            FAILURE_TEXT
        }
    }
}

/// `📍 Place` header plus the condition lines.
fn current_report(place_name: &str, conditions: &WeatherConditions) -> String {
    format!("📍 {}\n{}", place_name, conditions.describe())
}

fn currency_continuation(snapshot: &Snapshot, currency: Currency) -> Continuation {
    Continuation::ConvertCurrency {
        rate: snapshot.fiat.rate(currency).purchase_rate_nb,
        symbol: currency.flag(),
    }
}

fn missing_coin(coin: TrackedCoin) -> Vec<Reply> {
    log::warn!("Tracked coin {} is absent from the snapshot", coin.id());
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_accessors() {
        let reply = Reply::text("hello");
        assert_eq!(reply.body(), Some("hello"));
        assert!(reply.keyboard().is_none());

        let delete = Reply::Delete(MessageId(5));
        assert_eq!(delete.body(), None);
    }

    #[test]
    fn test_current_report_header() {
        let conditions = WeatherConditions {
            temperature: 3.0,
            summary: "Overcast".to_string(),
            wind: crate::upstream::weather::Wind { speed: 1.5, angle: 90.0 },
            cloud_cover: 100.0,
        };
        let text = current_report("Kyiv", &conditions);
        assert!(text.starts_with("📍 Kyiv\n🌡 Temperature: 3°C"));
    }

    #[test]
    fn test_error_text_keeps_fixed_messages() {
        use crate::core::error::{INVALID_VALUE_MESSAGE, UNKNOWN_CITY_MESSAGE};

        assert_eq!(error_text(&AppError::InvalidInput("x".to_string())), INVALID_VALUE_MESSAGE);
        assert_eq!(error_text(&AppError::UnknownCity("Atlantis".to_string())), UNKNOWN_CITY_MESSAGE);
    }

    #[test]
    fn test_error_text_without_user_message_is_neutral() {
        let err = AppError::Config("BOT_TOKEN missing".to_string());
        assert_eq!(error_text(&err), FAILURE_TEXT);
    }
}
