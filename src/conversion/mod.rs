//! Amount conversion for the currency and crypto menus.
//!
//! Both handlers are pure: they take the number the user typed plus the rate
//! or asset bound when the menu item was chosen, and never touch the upstream
//! snapshot.

use crate::core::error::{AppError, AppResult};
use crate::upstream::CryptoAsset;

/// Photo reply for a crypto conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoQuote {
    pub image_url: String,
    pub caption: String,
}

/// Parses a user-typed amount.
///
/// Accepts surrounding whitespace and a comma as the decimal separator.
/// Anything that is not a finite number is `InvalidInput`.
pub fn parse_amount(text: &str) -> AppResult<f64> {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(AppError::InvalidInput(text.to_string())),
    }
}

/// Multiplies an amount by a rate or price, rejecting results too large to print.
fn scaled(text: &str, factor: f64) -> AppResult<f64> {
    let value = parse_amount(text)? * factor;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::InvalidInput(text.to_string()))
    }
}

/// Converts an amount at a bound exchange rate.
///
/// # Arguments
/// * `text` - What the user typed
/// * `rate` - National Bank purchase rate captured when the currency was chosen
/// * `symbol` - Currency flag prefixed to the result
///
/// # Returns
/// `"<symbol> <amount * rate>"` with two decimals, or `InvalidInput`.
pub fn convert_currency(text: &str, rate: f64, symbol: &str) -> AppResult<String> {
    let value = scaled(text, rate)?;
    Ok(format!("{} {:.2}", symbol, value))
}

/// Converts an amount of a coin to USD.
///
/// # Returns
/// The coin logo plus caption `"<SYMBOL>: <amount * price>"`, or `InvalidInput`.
pub fn convert_crypto(text: &str, asset: &CryptoAsset) -> AppResult<CryptoQuote> {
    let value = scaled(text, asset.current_price)?;
    Ok(CryptoQuote {
        image_url: asset.image.clone(),
        caption: format!("{}: {:.2}", asset.symbol.to_uppercase(), value),
    })
}
