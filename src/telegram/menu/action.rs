//! Callback action ids carried by every inline button

use std::fmt;
use std::str::FromStr;

use crate::upstream::{Currency, TrackedCoin};

/// A menu button press.
///
/// Each variant maps to exactly one callback data string, namespaced by the
/// menu it belongs to (`main:`, `weather:`, `fx:`, `crypto:`). The label shown
/// on the button never takes part in routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Main menu: seasonal "Weather" entry
    Weather,
    /// Main menu: "Currency"
    Currency,
    /// Main menu: "Cryptocurrency"
    Crypto,
    /// "Back" from any submenu
    BackToMain,
    WeatherCurrent,
    WeatherByCity,
    WeatherForecast,
    AllRates,
    ConvertFiat(Currency),
    AllPrices,
    ConvertCoin(TrackedCoin),
}

/// Callback data did not name a known action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action id: {0:?}")]
pub struct UnknownAction(pub String);

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Weather => f.write_str("main:weather"),
            Action::Currency => f.write_str("main:currency"),
            Action::Crypto => f.write_str("main:crypto"),
            Action::BackToMain => f.write_str("main:back"),
            Action::WeatherCurrent => f.write_str("weather:current"),
            Action::WeatherByCity => f.write_str("weather:city"),
            Action::WeatherForecast => f.write_str("weather:forecast"),
            Action::AllRates => f.write_str("fx:all"),
            Action::ConvertFiat(currency) => write!(f, "fx:{}", currency.code()),
            Action::AllPrices => f.write_str("crypto:all"),
            Action::ConvertCoin(coin) => write!(f, "crypto:{}", coin.id()),
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownAction(data.to_string());

        if let Some(item) = data.strip_prefix("main:") {
            return match item {
                "weather" => Ok(Action::Weather),
                "currency" => Ok(Action::Currency),
                "crypto" => Ok(Action::Crypto),
                "back" => Ok(Action::BackToMain),
                _ => Err(unknown()),
            };
        }

        if let Some(item) = data.strip_prefix("weather:") {
            return match item {
                "current" => Ok(Action::WeatherCurrent),
                "city" => Ok(Action::WeatherByCity),
                "forecast" => Ok(Action::WeatherForecast),
                _ => Err(unknown()),
            };
        }

        if let Some(item) = data.strip_prefix("fx:") {
            return match item {
                "all" => Ok(Action::AllRates),
                code => code.parse::<Currency>().map(Action::ConvertFiat).map_err(|_| unknown()),
            };
        }

        if let Some(item) = data.strip_prefix("crypto:") {
            return match item {
                "all" => Ok(Action::AllPrices),
                id => TrackedCoin::from_id(id).map(Action::ConvertCoin).ok_or_else(unknown),
            };
        }

        Err(unknown())
    }
}
