//! Bundled reference tables: searchable assets, headline indices, forex pairs,
//! tracked crypto assets, macro series and news feeds.

use crate::AssetClass::{Crypto, Equity, Etf, Future, Index};
use crate::{AssetClass, AssetMatch};

/// Maximum local search hits.
pub const SEARCH_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogAsset {
    pub symbol: &'static str,
    pub name: &'static str,
    pub asset_type: AssetClass,
    pub exchange: &'static str,
}

impl CatalogAsset {
    const fn new(
        symbol: &'static str,
        name: &'static str,
        asset_type: AssetClass,
        exchange: &'static str,
    ) -> Self {
        Self {
            symbol,
            name,
            asset_type,
            exchange,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.symbol.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }

    pub fn to_match(self) -> AssetMatch {
        AssetMatch {
            symbol: self.symbol.to_owned(),
            name: self.name.to_owned(),
            asset_type: self.asset_type,
            exchange: Some(self.exchange.to_owned()),
        }
    }
}

pub const ASSETS: &[CatalogAsset] = &[
    CatalogAsset::new("AAPL", "Apple Inc.", Equity, "NASDAQ"),
    CatalogAsset::new("MSFT", "Microsoft Corporation", Equity, "NASDAQ"),
    CatalogAsset::new("NVDA", "NVIDIA Corporation", Equity, "NASDAQ"),
    CatalogAsset::new("GOOGL", "Alphabet Inc.", Equity, "NASDAQ"),
    CatalogAsset::new("AMZN", "Amazon.com Inc.", Equity, "NASDAQ"),
    CatalogAsset::new("META", "Meta Platforms Inc.", Equity, "NASDAQ"),
    CatalogAsset::new("TSLA", "Tesla Inc.", Equity, "NASDAQ"),
    CatalogAsset::new("NFLX", "Netflix Inc.", Equity, "NASDAQ"),
    CatalogAsset::new("AMD", "Advanced Micro Devices", Equity, "NASDAQ"),
    CatalogAsset::new("INTC", "Intel Corporation", Equity, "NASDAQ"),
    CatalogAsset::new("ORCL", "Oracle Corporation", Equity, "NYSE"),
    CatalogAsset::new("PLTR", "Palantir Technologies", Equity, "NYSE"),
    CatalogAsset::new("JPM", "JPMorgan Chase & Co.", Equity, "NYSE"),
    CatalogAsset::new("BAC", "Bank of America Corp.", Equity, "NYSE"),
    CatalogAsset::new("GS", "Goldman Sachs Group", Equity, "NYSE"),
    CatalogAsset::new("V", "Visa Inc.", Equity, "NYSE"),
    CatalogAsset::new("XOM", "Exxon Mobil Corporation", Equity, "NYSE"),
    CatalogAsset::new("BRK-B", "Berkshire Hathaway B", Equity, "NYSE"),
    CatalogAsset::new("SPY", "SPDR S&P 500 ETF", Etf, "NYSE"),
    CatalogAsset::new("QQQ", "Invesco QQQ ETF", Etf, "NASDAQ"),
    CatalogAsset::new("GLD", "SPDR Gold Shares ETF", Etf, "NYSE"),
    CatalogAsset::new("TLT", "iShares 20+ Year Treasury Bond ETF", Etf, "NASDAQ"),
    CatalogAsset::new("ARKK", "ARK Innovation ETF", Etf, "NYSE"),
    CatalogAsset::new("BTC-USD", "Bitcoin USD", Crypto, "CCC"),
    CatalogAsset::new("ETH-USD", "Ethereum USD", Crypto, "CCC"),
    CatalogAsset::new("SOL-USD", "Solana USD", Crypto, "CCC"),
    CatalogAsset::new("BNB-USD", "BNB USD", Crypto, "CCC"),
    CatalogAsset::new("XRP-USD", "XRP USD", Crypto, "CCC"),
    CatalogAsset::new("^GSPC", "S&P 500 Index", Index, "SNP"),
    CatalogAsset::new("^IXIC", "NASDAQ Composite", Index, "NMS"),
    CatalogAsset::new("^DJI", "Dow Jones Industrial Average", Index, "DJI"),
    CatalogAsset::new("^KS11", "KOSPI Index", Index, "KSC"),
    CatalogAsset::new("^N225", "Nikkei 225", Index, "OSA"),
    CatalogAsset::new("^VIX", "CBOE Volatility Index", Index, "CBT"),
    CatalogAsset::new("GC=F", "Gold Futures", Future, "CMX"),
    CatalogAsset::new("CL=F", "Crude Oil Futures (WTI)", Future, "NYM"),
    CatalogAsset::new("005930.KS", "Samsung Electronics", Equity, "KSC"),
    CatalogAsset::new("000660.KS", "SK Hynix", Equity, "KSC"),
    CatalogAsset::new("035420.KS", "NAVER", Equity, "KSC"),
    CatalogAsset::new("035720.KS", "Kakao", Equity, "KSC"),
    CatalogAsset::new("051910.KS", "LG Chem", Equity, "KSC"),
    CatalogAsset::new("006400.KS", "Samsung SDI", Equity, "KSC"),
    CatalogAsset::new("207940.KS", "Samsung Biologics", Equity, "KSC"),
    CatalogAsset::new("000270.KS", "Kia", Equity, "KSC"),
    CatalogAsset::new("005380.KS", "Hyundai Motor", Equity, "KSC"),
];

/// Case-insensitive substring match on symbol or name, in table order.
pub fn search_local(query: &str) -> Vec<AssetMatch> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    ASSETS
        .iter()
        .filter(|asset| asset.matches(&needle))
        .take(SEARCH_LIMIT)
        .map(|asset| asset.to_match())
        .collect()
}

/// Headline indices and commodities: `(symbol, display label)`.
pub const INDICES: &[(&str, &str)] = &[
    ("^GSPC", "S&P 500"),
    ("^IXIC", "NASDAQ"),
    ("^DJI", "DOW"),
    ("^KS11", "KOSPI"),
    ("^N225", "NIKKEI"),
    ("GC=F", "GOLD"),
    ("CL=F", "CRUDE OIL"),
    ("^VIX", "VIX"),
];

/// Tracked currency pairs: `(base, quote)`.
pub const FOREX_PAIRS: &[(&str, &str)] =
    &[("USD", "KRW"), ("USD", "JPY"), ("EUR", "USD"), ("USD", "CNY")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoListing {
    pub id: &'static str,
    pub symbol: &'static str,
    pub label: &'static str,
}

pub const CRYPTO_ASSETS: &[CryptoListing] = &[
    CryptoListing {
        id: "bitcoin",
        symbol: "BTC",
        label: "Bitcoin",
    },
    CryptoListing {
        id: "ethereum",
        symbol: "ETH",
        label: "Ethereum",
    },
    CryptoListing {
        id: "solana",
        symbol: "SOL",
        label: "Solana",
    },
];

/// Macro indicator metadata keyed by a stable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacroSeries {
    pub key: &'static str,
    pub series_id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
}

pub const MACRO_SERIES: &[MacroSeries] = &[
    MacroSeries {
        key: "fedfunds",
        series_id: "FEDFUNDS",
        label: "Fed Funds Rate",
        unit: "%",
        description: "Federal funds effective rate",
    },
    MacroSeries {
        key: "cpi",
        series_id: "CPIAUCSL",
        label: "CPI",
        unit: "%",
        description: "Consumer price index",
    },
    MacroSeries {
        key: "unemployment",
        series_id: "UNRATE",
        label: "Unemployment",
        unit: "%",
        description: "US unemployment rate",
    },
    MacroSeries {
        key: "gdp",
        series_id: "A191RL1Q225SBEA",
        label: "GDP Growth",
        unit: "%",
        description: "Real GDP growth (QoQ, annualized)",
    },
];

pub fn macro_series(key: &str) -> Option<&'static MacroSeries> {
    MACRO_SERIES.iter().find(|series| series.key == key)
}

pub const BUSINESS_NEWS_FEED: &str = "https://feeds.bbci.co.uk/news/business/rss.xml";

/// Per-symbol headline feed.
pub fn asset_news_feed(symbol: &str) -> String {
    format!(
        "https://feeds.finance.yahoo.com/rss/2.0/headline?s={}&region=US&lang=en-US",
        urlencoding::encode(symbol)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_symbol_ranks_first_for_its_ticker() {
        let hits = search_local("aapl");
        assert_eq!(hits[0].symbol, "AAPL");
        assert_eq!(hits[0].asset_type, AssetClass::Equity);
    }

    #[test]
    fn matches_names_case_insensitively() {
        let hits = search_local("SAMSUNG");
        let symbols = hits.iter().map(|hit| hit.symbol.as_str()).collect::<Vec<_>>();
        assert_eq!(symbols, vec!["005930.KS", "006400.KS", "207940.KS"]);
    }

    #[test]
    fn local_hits_are_capped() {
        assert_eq!(search_local("a").len(), SEARCH_LIMIT);
    }

    #[test]
    fn blank_query_has_no_hits() {
        assert!(search_local("   ").is_empty());
        assert!(search_local("zzzz-not-listed").is_empty());
    }

    #[test]
    fn table_sizes() {
        assert_eq!(ASSETS.len(), 45);
        assert_eq!(INDICES.len(), 8);
        assert_eq!(FOREX_PAIRS.len(), 4);
        assert_eq!(CRYPTO_ASSETS.len(), 3);
        assert_eq!(MACRO_SERIES.len(), 4);
    }

    #[test]
    fn asset_feed_encodes_symbol() {
        assert!(asset_news_feed("^GSPC").contains("s=%5EGSPC"));
        assert_eq!(macro_series("gdp").map(|s| s.series_id), Some("A191RL1Q225SBEA"));
    }
}
