use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::classify::{infer_category, infer_sentiment};
use crate::{ProviderId, Symbol, ValidationError};

/// Canonical instrument class used by asset search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetClass {
    Equity,
    Etf,
    Index,
    Crypto,
    Future,
    Forex,
    Fund,
    Other,
}

impl AssetClass {
    /// Maps a vendor `quoteType` string onto the canonical class.
    pub fn from_vendor(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "EQUITY" => Self::Equity,
            "ETF" => Self::Etf,
            "INDEX" => Self::Index,
            "CRYPTO" | "CRYPTOCURRENCY" => Self::Crypto,
            "FUTURE" | "FUTURES" => Self::Future,
            "CURRENCY" | "FOREX" => Self::Forex,
            "MUTUALFUND" | "FUND" => Self::Fund,
            _ => Self::Other,
        }
    }
}

/// Canonical quote.
///
/// `change` and `change_pct` are always derived from `price` and `prev_close`,
/// whatever the provider reported, so the two stay consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub change: f64,
    pub change_pct: f64,
    pub volume: u64,
    pub high: f64,
    pub low: f64,
    pub prev_close: f64,
    pub source: ProviderId,
}

impl Quote {
    #[allow(clippy::too_many_arguments)]
    pub fn from_prices(
        symbol: Symbol,
        price: f64,
        prev_close: f64,
        high: Option<f64>,
        low: Option<f64>,
        volume: Option<u64>,
        source: ProviderId,
    ) -> Result<Self, ValidationError> {
        validate_finite("price", price)?;
        validate_finite("prev_close", prev_close)?;

        let change = price - prev_close;
        let change_pct = if prev_close == 0.0 {
            0.0
        } else {
            change / prev_close * 100.0
        };
        let high = high.filter(|value| value.is_finite()).unwrap_or(price);
        let low = low.filter(|value| value.is_finite()).unwrap_or(price);

        Ok(Self {
            symbol,
            price: round_price(price),
            change: round_price(change),
            change_pct: round_price(change_pct),
            volume: volume.unwrap_or(0),
            high: round_price(high),
            low: round_price(low),
            prev_close: round_price(prev_close),
            source,
        })
    }
}

/// Quote for one of the headline market indices, with its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuote {
    pub label: String,
    #[serde(flatten)]
    pub quote: Quote,
}

/// One point of a price history. Points without a close never reach this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub timestamp: i64,
    pub price: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexPair {
    pub label: String,
    pub base: String,
    pub quote: String,
    pub rate: Option<f64>,
    pub source: ProviderId,
}

impl ForexPair {
    pub fn new(
        base: impl Into<String>,
        quote: impl Into<String>,
        rate: Option<f64>,
        source: ProviderId,
    ) -> Self {
        let base = base.into();
        let quote = quote.into();
        let places = rate_places(&base, &quote);
        Self {
            label: format!("{base}/{quote}"),
            rate: rate
                .filter(|value| value.is_finite() && *value > 0.0)
                .map(|value| round_to(value, places)),
            base,
            quote,
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoAsset {
    pub symbol: String,
    pub label: String,
    pub price: f64,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    pub volume: Option<f64>,
    pub market_cap: Option<f64>,
    pub source: ProviderId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroIndicator {
    pub key: String,
    pub label: String,
    pub unit: String,
    pub value: Option<f64>,
    pub prev: Option<f64>,
    pub change: Option<f64>,
    pub change_pct: Option<f64>,
    pub date: Option<String>,
    pub description: String,
    pub source: ProviderId,
}

/// Keyword-derived market tone of a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Topical bucket of a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fed,
    Inflation,
    Earnings,
    Crypto,
    Geo,
    Labor,
    General,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fed => "fed",
            Self::Inflation => "inflation",
            Self::Earnings => "earnings",
            Self::Crypto => "crypto",
            Self::Geo => "geo",
            Self::Labor => "labor",
            Self::General => "general",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub source_name: String,
    pub sentiment: Sentiment,
    pub category: Category,
}

impl NewsArticle {
    /// Builds an article, deriving sentiment from title plus description and
    /// category from the title.
    pub fn classified(
        title: impl Into<String>,
        description: Option<String>,
        url: Option<String>,
        published_at: Option<String>,
        source_name: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let sentiment = match &description {
            Some(description) => infer_sentiment(&format!("{title} {description}")),
            None => infer_sentiment(&title),
        };
        let category = infer_category(&title);
        Self {
            title,
            description,
            url,
            published_at,
            source_name: source_name.into(),
            sentiment,
            category,
        }
    }

    pub fn with_sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = sentiment;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

/// Contextual reading of a headline, derived from its category and sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub category: Category,
    pub label: String,
    pub institution: String,
    pub past_pattern: String,
    pub watch_point: String,
    pub sentiment: Sentiment,
    pub impact: String,
}

/// Record collection tagged with the provider that produced it, for kinds
/// whose records carry no provenance of their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tagged<T> {
    pub source: ProviderId,
    pub data: T,
}

/// Asset search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMatch {
    pub symbol: String,
    pub name: String,
    pub asset_type: AssetClass,
    pub exchange: Option<String>,
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Prices and price changes are quoted to the cent.
pub fn round_price(value: f64) -> f64 {
    round_to(value, 2)
}

/// Decimal places for a currency pair: 1 for yen and won pairs, 4 otherwise.
pub fn rate_places(base: &str, quote: &str) -> i32 {
    let coarse = |code: &str| matches!(code, "JPY" | "KRW");
    if coarse(base) || coarse(quote) {
        1
    } else {
        4
    }
}

/// Short chart label for a unix timestamp, e.g. `Jan 5`. Empty if out of range.
pub fn date_label(timestamp: i64) -> String {
    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|moment| {
            moment
                .format(format_description!("[month repr:short] [day padding:none]"))
                .ok()
        })
        .unwrap_or_default()
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFiniteValue { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    #[test]
    fn quote_derives_change_from_previous_close() {
        let quote = Quote::from_prices(
            symbol("AAPL"),
            190.0,
            200.0,
            None,
            None,
            Some(10),
            ProviderId::Yahoo,
        )
        .expect("valid quote");

        assert_eq!(quote.change, -10.0);
        assert_eq!(quote.change_pct, -5.0);
        assert_eq!(quote.high, 190.0);
        assert_eq!(quote.low, 190.0);
    }

    #[test]
    fn quote_with_zero_previous_close_has_flat_percentage() {
        let quote = Quote::from_prices(
            symbol("AAPL"),
            1.0,
            0.0,
            None,
            None,
            None,
            ProviderId::Mock,
        )
        .expect("valid quote");
        assert_eq!(quote.change_pct, 0.0);
        assert_eq!(quote.volume, 0);
    }

    #[test]
    fn quote_rejects_non_finite_price() {
        let err = Quote::from_prices(
            symbol("AAPL"),
            f64::NAN,
            1.0,
            None,
            None,
            None,
            ProviderId::Yahoo,
        )
        .expect_err("must fail");
        assert_eq!(err, ValidationError::NonFiniteValue { field: "price" });
    }

    #[test]
    fn forex_rounding_depends_on_pair() {
        let yen = ForexPair::new("USD", "JPY", Some(149.8234), ProviderId::Exchangerate);
        let euro = ForexPair::new("EUR", "USD", Some(1.084_236), ProviderId::Exchangerate);

        assert_eq!(yen.rate, Some(149.8));
        assert_eq!(euro.rate, Some(1.0842));
        assert_eq!(yen.label, "USD/JPY");
    }

    #[test]
    fn forex_drops_unusable_rates() {
        let pair = ForexPair::new("USD", "KRW", Some(f64::INFINITY), ProviderId::Exchangerate);
        assert_eq!(pair.rate, None);
    }

    #[test]
    fn date_label_is_month_and_day() {
        assert_eq!(date_label(1_736_035_200), "Jan 5");
        assert_eq!(date_label(i64::MAX), "");
    }

    #[test]
    fn asset_class_maps_vendor_types() {
        assert_eq!(AssetClass::from_vendor("CRYPTOCURRENCY"), AssetClass::Crypto);
        assert_eq!(AssetClass::from_vendor("mutualfund"), AssetClass::Fund);
        assert_eq!(AssetClass::from_vendor("WARRANT"), AssetClass::Other);
    }

    #[test]
    fn index_quote_round_trips_through_json() {
        let quote = Quote::from_prices(
            symbol("^VIX"),
            16.5,
            16.0,
            None,
            None,
            None,
            ProviderId::Mock,
        )
        .expect("valid quote");
        let index = IndexQuote {
            label: String::from("VIX"),
            quote,
        };

        let json = serde_json::to_value(&index).expect("serializes");
        assert_eq!(json["label"], "VIX");
        assert_eq!(json["symbol"], "^VIX");
        let back: IndexQuote = serde_json::from_value(json).expect("deserializes");
        assert_eq!(back, index);
    }
}
