//! Crypto market provider (CoinGecko `coins/markets`)

use serde::Deserialize;
use strum::{EnumIter, IntoEnumIterator};

use super::{Provider, UpstreamClient, UpstreamError};

/// Coins the bot offers in its menu, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TrackedCoin {
    Bitcoin,
    Ethereum,
    Dogecoin,
    Solana,
}

impl TrackedCoin {
    /// Provider id, e.g. `bitcoin`.
    pub fn id(self) -> &'static str {
        match self {
            TrackedCoin::Bitcoin => "bitcoin",
            TrackedCoin::Ethereum => "ethereum",
            TrackedCoin::Dogecoin => "dogecoin",
            TrackedCoin::Solana => "solana",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        TrackedCoin::iter().find(|coin| coin.id() == id)
    }

    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            TrackedCoin::Bitcoin => "Bitcoin",
            TrackedCoin::Ethereum => "Ethereum",
            TrackedCoin::Dogecoin => "Dogecoin",
            TrackedCoin::Solana => "Solana",
        }
    }
}

/// One market record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CryptoAsset {
    pub id: String,
    pub symbol: String,
    pub name: String,
    /// USD
    pub current_price: f64,
    /// Logo URL
    pub image: String,
}

impl CryptoAsset {
    /// `Bitcoin (BTC): 65000.12 $`
    pub fn describe_line(&self) -> String {
        format!(
            "{} ({}): {:.2} $",
            self.name,
            self.symbol.to_uppercase(),
            self.current_price
        )
    }
}

/// Keeps only tracked coins, in menu order, and checks none is missing.
fn select_tracked(assets: Vec<CryptoAsset>) -> Result<Vec<CryptoAsset>, UpstreamError> {
    TrackedCoin::iter()
        .map(|coin| {
            assets
                .iter()
                .find(|asset| asset.id == coin.id())
                .cloned()
                .ok_or_else(|| UpstreamError::Malformed {
                    provider: Provider::Crypto,
                    reason: format!("{} missing from market data", coin.id()),
                })
        })
        .collect()
}

/// All prices reply: one line per asset.
pub fn prices_text(assets: &[CryptoAsset]) -> String {
    assets
        .iter()
        .map(CryptoAsset::describe_line)
        .collect::<Vec<_>>()
        .join("\n")
}

impl UpstreamClient {
    /// Fetches USD market data for the tracked coins.
    pub async fn fetch_crypto_assets(&self) -> Result<Vec<CryptoAsset>, UpstreamError> {
        let url = format!("{}/coins/markets", self.endpoints().crypto_url.trim_end_matches('/'));
        let ids = TrackedCoin::iter().map(TrackedCoin::id).collect::<Vec<_>>().join(",");
        log::debug!("Fetching crypto markets for {}", ids);

        let assets: Vec<CryptoAsset> = self
            .get_json(Provider::Crypto, &url, &[("vs_currency", "usd"), ("ids", ids.as_str())])
            .await?;
        select_tracked(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, symbol: &str, name: &str, price: f64) -> CryptoAsset {
        CryptoAsset {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            current_price: price,
            image: format!("https://img.example/{}.png", id),
        }
    }

    #[test]
    fn test_parse_markets_ignores_extra_fields() {
        let body = r#"[{
            "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
            "image": "https://img.example/btc.png", "current_price": 65000.123,
            "market_cap": 1280000000000, "total_volume": 30000000000
        }]"#;
        let assets: Vec<CryptoAsset> = serde_json::from_str(body).unwrap();
        assert_eq!(assets[0].symbol, "btc");
        assert_eq!(assets[0].describe_line(), "Bitcoin (BTC): 65000.12 $");
    }

    #[test]
    fn test_select_tracked_orders_by_menu() {
        let assets = vec![
            asset("solana", "sol", "Solana", 150.0),
            asset("tether", "usdt", "Tether", 1.0),
            asset("dogecoin", "doge", "Dogecoin", 0.15),
            asset("bitcoin", "btc", "Bitcoin", 65000.0),
            asset("ethereum", "eth", "Ethereum", 3000.0),
        ];
        let ids: Vec<String> = select_tracked(assets).unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum", "dogecoin", "solana"]);
    }

    #[test]
    fn test_select_tracked_reports_missing_coin() {
        let assets = vec![asset("bitcoin", "btc", "Bitcoin", 65000.0)];
        let err = select_tracked(assets).unwrap_err();
        assert!(err.to_string().contains("ethereum"));
    }

    #[test]
    fn test_tracked_coin_ids_roundtrip() {
        for coin in TrackedCoin::iter() {
            assert_eq!(TrackedCoin::from_id(coin.id()), Some(coin));
        }
        assert_eq!(TrackedCoin::from_id("tether"), None);
    }
}
