use serde::Deserialize;

use crate::catalog::CRYPTO_ASSETS;
use crate::http_client::HttpRequest;
use crate::provider_client::{FetchError, ProviderClient};
use crate::{round_price, CryptoAsset, ProviderId};

const MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";
const DEMO_KEY_HEADER: &str = "x-cg-demo-api-key";

/// One entry of the `coins/markets` array.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketCoin {
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub current_price: Option<f64>,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
    pub total_volume: Option<f64>,
    pub market_cap: Option<f64>,
}

/// Coins without a symbol or finite price are dropped.
pub fn normalize_markets(coins: Vec<MarketCoin>) -> Vec<CryptoAsset> {
    coins
        .into_iter()
        .filter_map(|coin| {
            let symbol = coin.symbol?.to_uppercase();
            let price = coin.current_price.filter(|price| price.is_finite())?;
            Some(CryptoAsset {
                label: coin.name.unwrap_or_else(|| symbol.clone()),
                symbol,
                price: round_price(price),
                change: finite(coin.price_change_24h).map(round_price),
                change_pct: finite(coin.price_change_percentage_24h).map(round_price),
                volume: finite(coin.total_volume),
                market_cap: finite(coin.market_cap),
                source: ProviderId::Coingecko,
            })
        })
        .collect()
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite())
}

/// Market snapshot for the tracked coins. The demo key is optional.
#[derive(Clone)]
pub struct CoinGeckoAdapter {
    client: ProviderClient,
    api_key: Option<String>,
}

impl CoinGeckoAdapter {
    pub fn new(client: ProviderClient, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub async fn markets(&self) -> Result<Vec<CryptoAsset>, FetchError> {
        let ids = CRYPTO_ASSETS
            .iter()
            .map(|listing| listing.id)
            .collect::<Vec<_>>()
            .join(",");
        let url = format!(
            "{MARKETS_URL}?vs_currency=usd&ids={ids}&order=market_cap_desc&sparkline=false"
        );

        let mut request = HttpRequest::get(&url);
        if let Some(key) = &self.api_key {
            request = request.with_header(DEMO_KEY_HEADER, key);
        }

        let coins: Vec<MarketCoin> = self.client.request_as(&url, request).await?;
        Ok(normalize_markets(coins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_market_entries() {
        let coins: Vec<MarketCoin> = serde_json::from_str(
            r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":67123.456,
                 "price_change_24h":812.119,"price_change_percentage_24h":1.2266,
                 "total_volume":31000000000,"market_cap":1320000000000},
                {"id":"ghost","symbol":"gho","name":"Ghost","current_price":null},
                {"id":"solana","symbol":"sol","current_price":148.0}]"#,
        )
        .expect("fixture parses");

        let assets = normalize_markets(coins);
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].symbol, "BTC");
        assert_eq!(assets[0].price, 67_123.46);
        assert_eq!(assets[0].change, Some(812.12));
        assert_eq!(assets[0].change_pct, Some(1.23));
        assert_eq!(assets[0].market_cap, Some(1.32e12));
        assert_eq!(assets[1].label, "SOL");
        assert_eq!(assets[1].change, None);
        assert!(assets.iter().all(|asset| asset.source == ProviderId::Coingecko));
    }
}
