//! Upstream data providers: weather, fiat exchange rates, crypto market
//!
//! All three are fetched once at startup into an immutable [`Snapshot`]. The
//! snapshot is never refreshed, so its data may go stale for the lifetime of
//! the process. Only the weather provider is queried again later, on demand,
//! for the "weather by city" flow (see [`WeatherLookup`]).

pub mod crypto;
pub mod fiat;
pub mod weather;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use strum::Display;
use thiserror::Error;

use crate::core::config;

pub use crypto::{CryptoAsset, TrackedCoin};
pub use fiat::{Currency, FiatRate, FiatRates};
pub use weather::{HourlyRecord, WeatherConditions, WeatherReport};

/// Which upstream provider a request went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    Weather,
    Fiat,
    Crypto,
}

/// An upstream provider could not deliver usable data.
///
/// Covers network failures (including timeouts), non-2xx statuses and bodies
/// that do not have the expected shape.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{provider} provider unreachable: {source}")]
    Request {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} provider returned HTTP {status}")]
    Status { provider: Provider, status: reqwest::StatusCode },

    #[error("{provider} provider returned a malformed body: {reason}")]
    Malformed { provider: Provider, reason: String },
}

impl UpstreamError {
    pub fn provider(&self) -> Provider {
        match self {
            UpstreamError::Request { provider, .. }
            | UpstreamError::Status { provider, .. }
            | UpstreamError::Malformed { provider, .. } => *provider,
        }
    }
}

/// Base URLs and credentials for the three providers.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub weather_url: String,
    pub weather_token: String,
    pub fiat_url: String,
    pub crypto_url: String,
}

impl Endpoints {
    /// Endpoints from the environment configuration.
    pub fn from_config() -> Self {
        Self {
            weather_url: config::upstream::WEATHER_API_URL.clone(),
            weather_token: config::upstream::WEATHER_API_TOKEN.clone(),
            fiat_url: config::upstream::FIAT_API_URL.clone(),
            crypto_url: config::upstream::CRYPTO_API_URL.clone(),
        }
    }
}

/// HTTP client shared by all provider fetches.
///
/// Every request carries the bounded upstream timeout, so a hung provider
/// surfaces as [`UpstreamError::Request`] instead of blocking a handler.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoints: Arc<Endpoints>,
}

impl UpstreamClient {
    /// Client with the configured upstream timeout.
    pub fn new(endpoints: Endpoints) -> Result<Self, reqwest::Error> {
        Self::with_timeout(endpoints, config::network::upstream_timeout())
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(endpoints: Endpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoints: Arc::new(endpoints),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Sends a GET and decodes the JSON body.
    ///
    /// # Arguments
    /// * `provider` - Provider tag used in error reporting
    /// * `url` - Full request URL without query
    /// * `query` - Query string pairs
    async fn get_json<T: DeserializeOwned>(
        &self,
        provider: Provider,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| UpstreamError::Request { provider, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status { provider, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| UpstreamError::Request { provider, source })?;

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Malformed {
            provider,
            reason: e.to_string(),
        })
    }
}

/// On-demand weather lookup for an arbitrary place.
///
/// The dialog layer depends on this trait rather than on [`UpstreamClient`]
/// so the city flow can be exercised without a network.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn weather_for(&self, place: &str) -> Result<WeatherReport, UpstreamError>;
}

#[async_trait]
impl WeatherLookup for UpstreamClient {
    async fn weather_for(&self, place: &str) -> Result<WeatherReport, UpstreamError> {
        self.fetch_weather(place).await
    }
}

/// Immutable point-in-time copy of all upstream data.
///
/// Built once at startup by [`Snapshot::fetch`]; shared read-only behind an
/// `Arc` by every handler.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Place slug the weather report was fetched for
    pub place: String,
    pub weather: WeatherReport,
    pub fiat: FiatRates,
    pub crypto: Vec<CryptoAsset>,
}

impl Snapshot {
    /// Fetches all three providers. Any failure is returned as-is; callers at
    /// startup treat it as fatal.
    ///
    /// # Arguments
    /// * `client` - Upstream HTTP client
    /// * `place` - Place slug for the weather report
    /// * `date` - Date for the fiat exchange rates
    pub async fn fetch(client: &UpstreamClient, place: &str, date: NaiveDate) -> Result<Self, UpstreamError> {
        let (weather, fiat, crypto) = tokio::try_join!(
            client.fetch_weather(place),
            client.fetch_fiat_rates(date),
            client.fetch_crypto_assets(),
        )?;

        Ok(Self {
            place: place.to_string(),
            weather,
            fiat,
            crypto,
        })
    }

    /// Fetches all three providers for today's date and the configured place.
    pub async fn fetch_today(client: &UpstreamClient) -> Result<Self, UpstreamError> {
        Self::fetch(client, &config::upstream::WEATHER_PLACE, Local::now().date_naive()).await
    }

    /// Looks up a tracked coin in the crypto snapshot.
    pub fn coin(&self, coin: TrackedCoin) -> Option<&CryptoAsset> {
        self.crypto.iter().find(|asset| asset.id == coin.id())
    }
}
