//! Fiat exchange rate provider (PrivatBank archive rates)

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::{Provider, UpstreamClient, UpstreamError};

/// Currencies the bot offers in its menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Pln,
}

impl Currency {
    /// ISO 4217 code, e.g. `USD`.
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Flag used as the currency symbol in replies.
    pub fn flag(self) -> &'static str {
        match self {
            Currency::Usd => "🇺🇸",
            Currency::Eur => "🇪🇺",
            Currency::Pln => "🇵🇱",
        }
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Currency::Usd => "Dollar",
            Currency::Eur => "Euro",
            Currency::Pln => "Zloty",
        }
    }
}

/// One entry of the provider's `exchangeRate` array.
///
/// Market rates are missing for some exotic currencies, hence the options.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateEntry {
    currency: Option<String>,
    purchase_rate: Option<f64>,
    sale_rate: Option<f64>,
    #[serde(rename = "purchaseRateNB")]
    purchase_rate_nb: Option<f64>,
    #[serde(rename = "saleRateNB")]
    sale_rate_nb: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatesResponse {
    #[serde(default)]
    exchange_rate: Vec<RateEntry>,
}

/// Exchange rates of one currency against UAH.
#[derive(Debug, Clone, PartialEq)]
pub struct FiatRate {
    pub code: String,
    pub purchase_rate: f64,
    pub sale_rate: f64,
    /// National Bank reference purchase rate
    pub purchase_rate_nb: f64,
    /// National Bank reference sale rate
    pub sale_rate_nb: f64,
}

impl FiatRate {
    /// `🇺🇸 USD | NB: 36.57 / 36.57 | Market: 37.20 / 37.70`
    pub fn describe_line(&self, flag: &str) -> String {
        format!(
            "{} {} | NB: {:.2} / {:.2} | Market: {:.2} / {:.2}",
            flag, self.code, self.purchase_rate_nb, self.sale_rate_nb, self.purchase_rate, self.sale_rate
        )
    }
}

/// Fiat rates keyed by currency code.
///
/// Construction guarantees that every [`Currency`] has a complete record.
#[derive(Debug, Clone, PartialEq)]
pub struct FiatRates {
    by_code: HashMap<String, FiatRate>,
}

impl FiatRates {
    /// Builds the keyed map from complete records.
    ///
    /// # Errors
    /// Returns the first menu currency that has no complete record.
    pub fn from_rates(rates: impl IntoIterator<Item = FiatRate>) -> Result<Self, Currency> {
        let by_code: HashMap<String, FiatRate> = rates.into_iter().map(|r| (r.code.clone(), r)).collect();
        if let Some(missing) = Currency::iter().find(|c| !by_code.contains_key(c.code())) {
            return Err(missing);
        }
        Ok(Self { by_code })
    }

    fn from_response(response: RatesResponse) -> Result<Self, UpstreamError> {
        let complete = response.exchange_rate.into_iter().filter_map(|entry| {
            Some(FiatRate {
                code: entry.currency?,
                purchase_rate: entry.purchase_rate?,
                sale_rate: entry.sale_rate?,
                purchase_rate_nb: entry.purchase_rate_nb?,
                sale_rate_nb: entry.sale_rate_nb?,
            })
        });

        Self::from_rates(complete).map_err(|missing| UpstreamError::Malformed {
            provider: Provider::Fiat,
            reason: format!("no complete {} rate in response", missing.code()),
        })
    }

    /// Record for an arbitrary currency code.
    pub fn get(&self, code: &str) -> Option<&FiatRate> {
        self.by_code.get(code)
    }

    /// Record for a menu currency; always present.
    pub fn rate(&self, currency: Currency) -> &FiatRate {
        &self.by_code[currency.code()]
    }

    /// One line per menu currency, in menu order.
    pub fn summary_text(&self) -> String {
        Currency::iter()
            .map(|c| self.rate(c).describe_line(c.flag()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl UpstreamClient {
    /// Fetches the archive exchange rates for a date.
    ///
    /// # Arguments
    /// * `date` - Day to fetch rates for, sent as `DD.MM.YYYY`
    pub async fn fetch_fiat_rates(&self, date: NaiveDate) -> Result<FiatRates, UpstreamError> {
        let url = format!(
            "{}/exchange_rates?json&date={}",
            self.endpoints().fiat_url.trim_end_matches('/'),
            date.format("%d.%m.%Y")
        );
        log::debug!("Fetching fiat rates: {}", url);

        let response: RatesResponse = self.get_json(Provider::Fiat, &url, &[]).await?;
        FiatRates::from_response(response)
    }
}
