mod action;
mod keyboards;

pub use action::{Action, UnknownAction};
pub use keyboards::{
    crypto_keyboard, currency_keyboard, main_keyboard, weather_keyboard, weather_label, Button, Keyboard,
};
