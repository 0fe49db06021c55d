//! # Provider Adapters
//!
//! One module per upstream. Each module declares the provider's raw payload
//! shape as `serde` structs with optional fields, exposes pure `normalize_*`
//! functions that map that shape onto canonical records, and wraps the
//! endpoint calls in a small adapter over [`ProviderClient`](crate::ProviderClient).
//!
//! | Module | Upstream | Records |
//! |--------|----------|---------|
//! | [`alphavantage`] | Alpha Vantage `GLOBAL_QUOTE` | [`Quote`](crate::Quote) |
//! | [`yahoo`] | Yahoo Finance chart and search | quotes, history, asset matches |
//! | [`coingecko`] | CoinGecko `coins/markets` | [`CryptoAsset`](crate::CryptoAsset) |
//! | [`exchangerate`] | exchangerate-api `v4/latest` | [`ForexPair`](crate::ForexPair) |
//! | [`fred`] | FRED series observations | [`MacroIndicator`](crate::MacroIndicator) |
//! | [`newsapi`] | NewsAPI `v2/everything` | [`NewsArticle`](crate::NewsArticle) |
//! | [`rss`] | RSS feeds through rss2json | [`NewsArticle`](crate::NewsArticle) |

pub mod alphavantage;
pub mod coingecko;
pub mod exchangerate;
pub mod fred;
pub mod newsapi;
pub mod rss;
pub mod yahoo;

pub use alphavantage::AlphaVantageAdapter;
pub use coingecko::CoinGeckoAdapter;
pub use exchangerate::ExchangeRateAdapter;
pub use fred::FredAdapter;
pub use newsapi::NewsApiAdapter;
pub use rss::{FeedSource, RssAdapter};
pub use yahoo::YahooAdapter;

/// Lenient numeric parse for vendors that encode numbers as strings.
pub(crate) fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(|value| value.trim().trim_end_matches('%'))
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
