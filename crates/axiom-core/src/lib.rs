//! # Axiom Core
//!
//! Market data aggregation and interpretation service.
//!
//! ## Overview
//!
//! This crate pulls quotes, price history, currency rates, crypto prices,
//! macroeconomic indicators, and news from several unreliable upstream
//! providers and hands back one canonical record shape per data kind:
//!
//! - **Provider client** with a fixed timeout that never raises past its boundary
//! - **Fallback chains** that try providers in order and end in synthetic data
//! - **TTL cache** keyed by resource, with per-kind lifetimes
//! - **Normalizers** per provider and record kind, tagging provenance
//! - **Anomaly detection** by population z-score
//! - **Rule-based classification** of headlines (sentiment, category, interpretation)
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider payloads, normalizers, and endpoint adapters |
//! | [`anomaly`] | Z-scores and anomaly filtering |
//! | [`cache`] | TTL cache and resource kinds |
//! | [`catalog`] | Bundled reference tables (assets, indices, series, feeds) |
//! | [`classify`] | Sentiment, category, and interpretation rules |
//! | [`config`] | Credentials, timeouts, TTLs, relays |
//! | [`domain`] | Canonical records |
//! | [`error`] | Input validation errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`provider_client`] | Timeout-bounded JSON requests and relay routing |
//! | [`provider_policy`] | Provider request quotas |
//! | [`routing`] | Fallback chains |
//! | [`service`] | Aggregation facade |
//! | [`source`] | Provider identifiers |
//! | [`synthetic`] | Placeholder data generator |
//! | [`throttling`] | Quota gates |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use axiom_core::{MarketService, ReqwestHttpClient, ServiceConfig, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = MarketService::new(ServiceConfig::from_env(), Arc::new(ReqwestHttpClient::new()));
//!
//!     let quote = service.get_quote(&Symbol::parse("AAPL")?).await;
//!     println!("AAPL {:.2} ({})", quote.price, quote.source);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  MarketService  │────▶│ TTL Cache        │
//! └────────┬────────┘     └──────────────────┘
//!          │ miss
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Fallback Chain  │────▶│ Synthetic Market │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Adapters        │────▶│ Provider Client  │
//! │ (normalizers)   │     │ (HttpClient)     │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Facade operations are total and return records directly. Provider failures
//! are [`FetchError`]s that the fallback chain records and moves past:
//!
//! ```rust
//! use axiom_core::{FetchError, FetchErrorKind};
//!
//! fn describe(error: &FetchError) -> &'static str {
//!     match error.kind() {
//!         FetchErrorKind::RateLimited => "quota exhausted",
//!         FetchErrorKind::Timeout => "upstream too slow",
//!         _ => "upstream unavailable",
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - API keys are read from environment variables only and never logged
//! - Transport errors are stripped of request URLs
//! - All HTTP requests use TLS via rustls

pub mod adapters;
pub mod anomaly;
pub mod cache;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod provider_client;
pub mod provider_policy;
pub mod routing;
pub mod service;
pub mod source;
pub mod synthetic;
pub mod throttling;

// Adapters
pub use adapters::{
    AlphaVantageAdapter, CoinGeckoAdapter, ExchangeRateAdapter, FeedSource, FredAdapter,
    NewsApiAdapter, RssAdapter, YahooAdapter,
};

// Signals
pub use anomaly::{
    detect_anomalies, validate_threshold, z_scores, Scored, SeriesValue,
    DEFAULT_ANOMALY_THRESHOLD,
};
pub use classify::{infer_category, infer_sentiment, interpret};

// Caching and configuration
pub use cache::{ResourceKind, TtlCache};
pub use config::{CacheTtl, Credentials, ServiceConfig, DEFAULT_NEWS_QUERY};

// Domain models
pub use domain::{
    date_label, rate_places, round_price, round_to, AssetClass, AssetMatch, Category,
    CryptoAsset, ForexPair, HistoryPoint, HistoryRange, IndexQuote, Interpretation,
    MacroIndicator, NewsArticle, Quote, Sentiment, Symbol, Tagged,
};

// Errors
pub use error::ValidationError;

// Transport and routing
pub use http_client::{
    HttpClient, HttpError, HttpFuture, HttpRequest, HttpResponse, OfflineHttpClient,
    ReqwestHttpClient,
};
pub use provider_client::{FetchError, FetchErrorKind, ProviderClient, RelayProxy, Route};
pub use provider_policy::ProviderPolicy;
pub use routing::{AttemptError, FallbackChain, Fetched, Usable};
pub use throttling::QuotaGate;

// Facade
pub use service::MarketService;
pub use source::ProviderId;
pub use synthetic::SyntheticMarket;
