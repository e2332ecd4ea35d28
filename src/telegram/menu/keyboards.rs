//! Menu keyboards
//!
//! Keyboards are built as plain data here and turned into teloxide markup by
//! the transport layer, so menu layout can be asserted without a bot.

use chrono::NaiveDate;
use strum::IntoEnumIterator;

use super::action::Action;
use crate::core::Season;
use crate::upstream::{Currency, TrackedCoin};

/// One inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Rows of inline buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    /// All buttons, row by row.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    /// All button labels, row by row.
    pub fn labels(&self) -> Vec<&str> {
        self.buttons().map(|b| b.label.as_str()).collect()
    }

    /// Whether any button carries the given action.
    pub fn has_action(&self, action: Action) -> bool {
        self.buttons().any(|b| b.action == action)
    }
}

/// Label of the main "Weather" button for a given day, e.g. `🍁 Weather`.
pub fn weather_label(today: NaiveDate) -> String {
    format!("{} Weather", Season::for_date(today).icon())
}

/// Main menu: seasonal Weather, Currency, Cryptocurrency.
pub fn main_keyboard(today: NaiveDate) -> Keyboard {
    Keyboard::new(vec![
        vec![Button::new(weather_label(today), Action::Weather)],
        vec![
            Button::new("💵 Currency", Action::Currency),
            Button::new("🪙 Cryptocurrency", Action::Crypto),
        ],
    ])
}

/// Extended weather submenu.
pub fn weather_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![
            Button::new("Current", Action::WeatherCurrent),
            Button::new("By city", Action::WeatherByCity),
        ],
        vec![Button::new("Full day forecast", Action::WeatherForecast)],
        vec![Button::new("⬅ Back", Action::BackToMain)],
    ])
}

/// Currency submenu: all rates, one button per currency, back.
pub fn currency_keyboard() -> Keyboard {
    let currencies = Currency::iter()
        .map(|c| Button::new(format!("{} {}", c.flag(), c.label()), Action::ConvertFiat(c)))
        .collect();

    Keyboard::new(vec![
        vec![Button::new("All rates", Action::AllRates)],
        currencies,
        vec![Button::new("⬅ Back", Action::BackToMain)],
    ])
}

/// Crypto submenu: all prices, one button per tracked coin (two per row), back.
pub fn crypto_keyboard() -> Keyboard {
    let coins: Vec<Button> = TrackedCoin::iter()
        .map(|coin| Button::new(coin.label(), Action::ConvertCoin(coin)))
        .collect();

    let mut rows = vec![vec![Button::new("All prices", Action::AllPrices)]];
    rows.extend(coins.chunks(2).map(<[Button]>::to_vec));
    rows.push(vec![Button::new("⬅ Back", Action::BackToMain)]);
    Keyboard::new(rows)
}
