//! Test fixtures: provider payloads, a sample snapshot and a fake weather lookup

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use berdybot::core::config::WeatherMenuStyle;
use berdybot::upstream::weather::Wind;
use berdybot::upstream::{
    CryptoAsset, FiatRate, FiatRates, HourlyRecord, Provider, Snapshot, UpstreamError, WeatherConditions,
    WeatherLookup, WeatherReport,
};
use berdybot::MenuRouter;

/// Meteosource `point` response for the default place
pub const WEATHER_BODY: &str = r#"{
    "lat": "49.89N",
    "lon": "28.60E",
    "timezone": "UTC",
    "units": "metric",
    "current": {
        "summary": "Partly sunny",
        "temperature": 12.5,
        "wind": {"speed": 3.1, "angle": 240, "dir": "WSW"},
        "cloud_cover": 45
    },
    "hourly": {
        "data": [
            {"date": "2024-05-01T14:00:00", "summary": "Cloudy", "temperature": 11.0,
             "wind": {"speed": 2.0, "angle": 180}, "cloud_cover": {"total": 90}},
            {"date": "2024-05-01T15:00:00", "summary": "Light rain", "temperature": 10.2,
             "wind": {"speed": 4.5, "angle": 200}, "cloud_cover": {"total": 100}}
        ]
    }
}"#;

/// PrivatBank archive response with the three menu currencies and one
/// incomplete entry
pub const FIAT_BODY: &str = r#"{
    "date": "01.05.2024",
    "bank": "PB",
    "baseCurrency": 980,
    "baseCurrencyLit": "UAH",
    "exchangeRate": [
        {"baseCurrency": "UAH", "currency": "AZN", "saleRateNB": 21.5, "purchaseRateNB": 21.5},
        {"baseCurrency": "UAH", "currency": "EUR", "saleRateNB": 39.2, "purchaseRateNB": 39.1, "saleRate": 40.1, "purchaseRate": 39.4},
        {"baseCurrency": "UAH", "currency": "PLN", "saleRateNB": 9.1, "purchaseRateNB": 9.05, "saleRate": 9.45, "purchaseRate": 8.9},
        {"baseCurrency": "UAH", "currency": "USD", "saleRateNB": 36.5686, "purchaseRateNB": 36.5686, "saleRate": 37.7, "purchaseRate": 37.2}
    ]
}"#;

/// CoinGecko `coins/markets` response for the tracked coins
pub const CRYPTO_BODY: &str = r#"[
    {"id": "bitcoin", "symbol": "btc", "name": "Bitcoin", "image": "https://img.example/btc.png", "current_price": 65000.0, "market_cap": 1},
    {"id": "ethereum", "symbol": "eth", "name": "Ethereum", "image": "https://img.example/eth.png", "current_price": 3000.5},
    {"id": "dogecoin", "symbol": "doge", "name": "Dogecoin", "image": "https://img.example/doge.png", "current_price": 0.1523},
    {"id": "solana", "symbol": "sol", "name": "Solana", "image": "https://img.example/sol.png", "current_price": 150.25}
]"#;

/// Rate the Dollar conversion multiplies by
pub const USD_NB_RATE: f64 = 36.5686;

pub fn conditions(temperature: f64, summary: &str) -> WeatherConditions {
    WeatherConditions {
        temperature,
        summary: summary.to_string(),
        wind: Wind { speed: 3.1, angle: 240.0 },
        cloud_cover: 45.0,
    }
}

pub fn weather_report(temperature: f64, summary: &str) -> WeatherReport {
    WeatherReport {
        current: conditions(temperature, summary),
        hourly: vec![
            HourlyRecord {
                date: "2024-05-01T14:00:00".to_string(),
                conditions: conditions(11.0, "Cloudy"),
            },
            HourlyRecord {
                date: "2024-05-01T15:00:00".to_string(),
                conditions: conditions(10.2, "Light rain"),
            },
            HourlyRecord {
                date: "2024-05-01T16:00:00".to_string(),
                conditions: conditions(9.8, "Light rain"),
            },
        ],
    }
}

fn fiat_rate(code: &str, purchase_nb: f64, sale_nb: f64, purchase: f64, sale: f64) -> FiatRate {
    FiatRate {
        code: code.to_string(),
        purchase_rate: purchase,
        sale_rate: sale,
        purchase_rate_nb: purchase_nb,
        sale_rate_nb: sale_nb,
    }
}

fn asset(id: &str, symbol: &str, name: &str, price: f64) -> CryptoAsset {
    CryptoAsset {
        id: id.to_string(),
        symbol: symbol.to_string(),
        name: name.to_string(),
        current_price: price,
        image: format!("https://img.example/{}.png", symbol),
    }
}

/// Snapshot matching the provider payloads above.
pub fn sample_snapshot() -> Snapshot {
    let fiat = FiatRates::from_rates(vec![
        fiat_rate("USD", USD_NB_RATE, 36.5686, 37.2, 37.7),
        fiat_rate("EUR", 39.1, 39.2, 39.4, 40.1),
        fiat_rate("PLN", 9.05, 9.1, 8.9, 9.45),
    ])
    .expect("all menu currencies present");

    Snapshot {
        place: "berdychiv".to_string(),
        weather: weather_report(12.5, "Partly sunny"),
        fiat,
        crypto: vec![
            asset("bitcoin", "btc", "Bitcoin", 65000.0),
            asset("ethereum", "eth", "Ethereum", 3000.5),
            asset("dogecoin", "doge", "Dogecoin", 0.1523),
            asset("solana", "sol", "Solana", 150.25),
        ],
    }
}

/// In-memory weather lookup; unknown places fail like the provider does.
#[derive(Default)]
pub struct FakeWeather {
    reports: HashMap<String, WeatherReport>,
    lookups: Mutex<Vec<String>>,
}

impl FakeWeather {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, slug: &str, report: WeatherReport) -> Self {
        self.reports.insert(slug.to_string(), report);
        self
    }

    /// Slugs looked up so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherLookup for FakeWeather {
    async fn weather_for(&self, place: &str) -> Result<WeatherReport, UpstreamError> {
        self.lookups.lock().unwrap().push(place.to_string());
        self.reports.get(place).cloned().ok_or_else(|| UpstreamError::Malformed {
            provider: Provider::Weather,
            reason: format!("unknown place {}", place),
        })
    }
}

/// Fixed "today" used by routers built here (autumn).
pub fn october_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 15).expect("valid date")
}

/// Router over the sample snapshot with the given weather lookup and menu style.
pub fn router_with(weather: Arc<FakeWeather>, style: WeatherMenuStyle) -> MenuRouter {
    MenuRouter::new(Arc::new(sample_snapshot()), weather, style).with_clock(october_15)
}

/// Router over the sample snapshot, extended weather menu, Kyiv known.
pub fn sample_router() -> (MenuRouter, Arc<FakeWeather>) {
    let weather = Arc::new(FakeWeather::new().with_place("kyiv", weather_report(7.0, "Overcast")));
    (router_with(weather.clone(), WeatherMenuStyle::Extended), weather)
}
