//! Plausible placeholder data used when every live strategy has failed.
//!
//! Values come from a base-price table plus bounded pseudo-random
//! perturbation. The shape and ranges are stable; exact numbers are not. Every
//! record is tagged `mock` and nothing here performs I/O.

use std::sync::{Mutex, PoisonError};

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::catalog::{FOREX_PAIRS, MACRO_SERIES};
use crate::{
    date_label, round_price, round_to, Category, CryptoAsset, ForexPair, HistoryPoint,
    MacroIndicator, NewsArticle, ProviderId, Quote, Sentiment, Symbol,
};

/// Base price for symbols absent from [`BASE_PRICES`].
pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// Days of synthetic history, ending today.
pub const HISTORY_DAYS: i64 = 31;

pub const BASE_PRICES: &[(&str, f64)] = &[
    ("^GSPC", 5_280.0),
    ("^IXIC", 16_500.0),
    ("^DJI", 39_200.0),
    ("GC=F", 2_350.0),
    ("CL=F", 78.0),
    ("^VIX", 16.5),
    ("^KS11", 2_680.0),
    ("^N225", 38_900.0),
    ("AAPL", 182.0),
    ("TSLA", 175.0),
    ("NVDA", 820.0),
    ("MSFT", 415.0),
    ("BTC-USD", 67_000.0),
    ("ETH-USD", 3_200.0),
    ("SOL-USD", 145.0),
];

const FOREX_RATES: &[f64] = &[1_325.4, 149.82, 1.0842, 7.2341];

// (symbol, label, price, change, change %)
const CRYPTO_SNAPSHOT: &[(&str, &str, f64, f64, f64)] = &[
    ("BTC", "Bitcoin", 67_200.0, 820.0, 1.23),
    ("ETH", "Ethereum", 3_210.0, -45.0, -1.38),
    ("SOL", "Solana", 148.0, 3.2, 2.21),
];

// (key, value, change, change %, observation date)
const MACRO_SNAPSHOT: &[(&str, f64, f64, f64, &str)] = &[
    ("fedfunds", 5.33, 0.0, 0.0, "2025-01-01"),
    ("cpi", 3.2, -0.1, -3.0, "2025-01-01"),
    ("unemployment", 3.9, 0.1, 2.6, "2025-01-01"),
    ("gdp", 3.4, 0.8, 30.0, "2024-10-01"),
];

struct CannedHeadline {
    title: &'static str,
    description: &'static str,
    url: &'static str,
    source: &'static str,
    hours_ago: i64,
    sentiment: Sentiment,
    category: Category,
}

const HEADLINES: &[CannedHeadline] = &[
    CannedHeadline {
        title: "Fed Officials Signal Caution on Rate Cuts as Inflation Proves Sticky",
        description: "Federal Reserve officials indicated they need more confidence that inflation is moving toward their 2% target.",
        url: "https://www.wsj.com",
        source: "WSJ",
        hours_ago: 1,
        sentiment: Sentiment::Bearish,
        category: Category::Fed,
    },
    CannedHeadline {
        title: "S&P 500 Hits Record High Amid Strong Corporate Earnings Season",
        description: "Major indexes climbed after a series of strong earnings reports from technology companies.",
        url: "https://www.bloomberg.com",
        source: "Bloomberg",
        hours_ago: 2,
        sentiment: Sentiment::Bullish,
        category: Category::Earnings,
    },
    CannedHeadline {
        title: "Bitcoin Surges Past Key Resistance as ETF Inflows Accelerate",
        description: "Bitcoin climbed toward recent highs as ETF inflows reached their highest levels in weeks.",
        url: "https://www.coindesk.com",
        source: "CoinDesk",
        hours_ago: 3,
        sentiment: Sentiment::Bullish,
        category: Category::Crypto,
    },
    CannedHeadline {
        title: "Nonfarm Payrolls Surprise to Upside, Complicating Fed Rate-Cut Plans",
        description: "The US economy added more jobs than expected, pushing back rate cut timelines.",
        url: "https://reuters.com",
        source: "Reuters",
        hours_ago: 4,
        sentiment: Sentiment::Neutral,
        category: Category::Labor,
    },
    CannedHeadline {
        title: "Oil Prices Climb Amid Middle East Tensions and Supply Concerns",
        description: "Crude oil prices rose as geopolitical risk added to concerns about potential supply disruptions.",
        url: "https://ft.com",
        source: "FT",
        hours_ago: 5,
        sentiment: Sentiment::Bearish,
        category: Category::Geo,
    },
];

/// Randomized placeholder generator. Safe to share between tasks.
#[derive(Debug)]
pub struct SyntheticMarket {
    rng: Mutex<fastrand::Rng>,
}

impl Default for SyntheticMarket {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticMarket {
    /// Entropy-seeded generator.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Reproducible generator for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }

    pub fn base_price(symbol: &str) -> f64 {
        BASE_PRICES
            .iter()
            .find(|(candidate, _)| *candidate == symbol)
            .map_or(DEFAULT_BASE_PRICE, |(_, price)| *price)
    }

    /// Quote within ±1% of the base price; previous close within ±0.75% of that.
    pub fn quote(&self, symbol: &Symbol) -> Quote {
        let base = Self::base_price(symbol.as_str());
        let (price, prev_close, volume) = {
            let mut rng = self.lock();
            let price = base * (1.0 + (rng.f64() - 0.5) * 0.02);
            let prev_close = price / (1.0 + (rng.f64() - 0.5) * 0.015);
            (price, prev_close, rng.u64(0..50_000_000))
        };

        let change = price - prev_close;
        Quote {
            symbol: symbol.clone(),
            price: round_price(price),
            change: round_price(change),
            change_pct: round_price(change / prev_close * 100.0),
            volume,
            high: round_price(price * 1.01),
            low: round_price(price * 0.99),
            prev_close: round_price(prev_close),
            source: ProviderId::Mock,
        }
    }

    /// Daily random walk from 92% of the base price, ending today.
    pub fn history(&self, symbol: &Symbol) -> Vec<HistoryPoint> {
        let today = OffsetDateTime::now_utc();
        let mut price = Self::base_price(symbol.as_str()) * 0.92;
        let mut rng = self.lock();

        (0..HISTORY_DAYS)
            .rev()
            .map(|days_ago| {
                price *= 1.0 + (rng.f64() - 0.47) * 0.022;
                let timestamp = (today - Duration::days(days_ago)).unix_timestamp();
                HistoryPoint {
                    date: date_label(timestamp),
                    timestamp,
                    price: round_price(price),
                    volume: rng.u64(0..4_000_000_000),
                }
            })
            .collect()
    }

    pub fn forex(&self) -> Vec<ForexPair> {
        FOREX_PAIRS
            .iter()
            .zip(FOREX_RATES)
            .map(|((base, quote), rate)| ForexPair::new(*base, *quote, Some(*rate), ProviderId::Mock))
            .collect()
    }

    pub fn crypto(&self) -> Vec<CryptoAsset> {
        CRYPTO_SNAPSHOT
            .iter()
            .map(|(symbol, label, price, change, change_pct)| CryptoAsset {
                symbol: (*symbol).to_owned(),
                label: (*label).to_owned(),
                price: *price,
                change: Some(*change),
                change_pct: Some(*change_pct),
                volume: None,
                market_cap: None,
                source: ProviderId::Mock,
            })
            .collect()
    }

    pub fn macro_indicators(&self) -> Vec<MacroIndicator> {
        MACRO_SERIES
            .iter()
            .filter_map(|series| self.macro_indicator(series.key))
            .collect()
    }

    pub fn macro_indicator(&self, key: &str) -> Option<MacroIndicator> {
        let series = MACRO_SERIES.iter().find(|series| series.key == key)?;
        let (_, value, change, change_pct, date) =
            MACRO_SNAPSHOT.iter().find(|(candidate, ..)| *candidate == key)?;

        Some(MacroIndicator {
            key: series.key.to_owned(),
            label: series.label.to_owned(),
            unit: series.unit.to_owned(),
            value: Some(*value),
            prev: Some(round_to(value - change, 3)),
            change: Some(*change),
            change_pct: Some(*change_pct),
            date: Some((*date).to_owned()),
            description: series.description.to_owned(),
            source: ProviderId::Mock,
        })
    }

    pub fn news(&self) -> Vec<NewsArticle> {
        HEADLINES
            .iter()
            .map(|headline| {
                NewsArticle::classified(
                    headline.title,
                    Some(headline.description.to_owned()),
                    Some(headline.url.to_owned()),
                    hours_ago(headline.hours_ago),
                    headline.source,
                )
                .with_sentiment(headline.sentiment)
                .with_category(headline.category)
            })
            .collect()
    }

    pub fn asset_news(&self, symbol: &Symbol) -> Vec<NewsArticle> {
        let url = format!("https://finance.yahoo.com/quote/{symbol}");
        let canned = [
            (
                format!("{symbol}: Analysts Raise Price Target After Strong Quarter"),
                "Several Wall Street analysts upgraded their outlook following better-than-expected results.",
                "Yahoo Finance",
                1,
                Sentiment::Bullish,
                Category::Earnings,
            ),
            (
                format!("{symbol} Faces Headwinds as Macro Uncertainty Weighs on Sector"),
                "Broader market concerns and rate sensitivity continue to pressure valuations.",
                "MarketWatch",
                2,
                Sentiment::Bearish,
                Category::General,
            ),
            (
                format!("Institutional Investors Increase {symbol} Holdings in Q4"),
                "Latest 13F filings show major funds added to positions last quarter.",
                "Bloomberg",
                24,
                Sentiment::Bullish,
                Category::General,
            ),
        ];

        canned
            .into_iter()
            .map(|(title, description, source, hours, sentiment, category)| {
                NewsArticle::classified(
                    title,
                    Some(description.to_owned()),
                    Some(url.clone()),
                    hours_ago(hours),
                    source,
                )
                .with_sentiment(sentiment)
                .with_category(category)
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, fastrand::Rng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn hours_ago(hours: i64) -> Option<String> {
    (OffsetDateTime::now_utc() - Duration::hours(hours))
        .format(&Rfc3339)
        .ok()
}
