//! Service configuration, read once at startup.
//!
//! Every setting is optional. A missing credential only removes the strategies
//! that need it; nothing here can fail service construction.
//!
//! # Environment Variables
//!
//! | Setting | Primary Env Var | Fallback Env Var |
//! |---------|-----------------|------------------|
//! | Alpha Vantage key | `AXIOM_ALPHAVANTAGE_API_KEY` | `ALPHAVANTAGE_API_KEY` |
//! | NewsAPI key | `AXIOM_NEWSAPI_API_KEY` | `NEWS_API_KEY` |
//! | FRED key | `AXIOM_FRED_API_KEY` | `FRED_API_KEY` |
//! | CoinGecko demo key | `AXIOM_COINGECKO_API_KEY` | `COINGECKO_API_KEY` |
//! | Request timeout (ms) | `AXIOM_TIMEOUT_MS` | - |
//! | Relay prefixes | `AXIOM_RELAY_URLS` (comma-separated) | - |

use std::time::Duration;

use tracing::warn;

use crate::cache::ResourceKind;
use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::provider_client::RelayProxy;

pub const DEFAULT_NEWS_QUERY: &str = "finance market economy";

/// Optional upstream API keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub alphavantage: Option<String>,
    pub newsapi: Option<String>,
    pub fred: Option<String>,
    pub coingecko: Option<String>,
}

impl Credentials {
    pub fn none() -> Self {
        Self::default()
    }

    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let key = |primary: &str, fallback: &str| {
            lookup(primary)
                .and_then(non_blank)
                .or_else(|| lookup(fallback).and_then(non_blank))
        };
        Self {
            alphavantage: key("AXIOM_ALPHAVANTAGE_API_KEY", "ALPHAVANTAGE_API_KEY"),
            newsapi: key("AXIOM_NEWSAPI_API_KEY", "NEWS_API_KEY"),
            fred: key("AXIOM_FRED_API_KEY", "FRED_API_KEY"),
            coingecko: key("AXIOM_COINGECKO_API_KEY", "COINGECKO_API_KEY"),
        }
    }
}

/// Freshness window per resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    pub quote: Duration,
    pub crypto: Duration,
    pub forex: Duration,
    pub history: Duration,
    pub news: Duration,
    pub macro_data: Duration,
}

impl CacheTtl {
    pub const fn for_kind(&self, kind: ResourceKind) -> Duration {
        match kind {
            ResourceKind::Quote => self.quote,
            ResourceKind::Crypto => self.crypto,
            ResourceKind::Forex => self.forex,
            ResourceKind::History => self.history,
            ResourceKind::News => self.news,
            ResourceKind::Macro => self.macro_data,
        }
    }

    /// Same window for every kind.
    pub const fn uniform(ttl: Duration) -> Self {
        Self {
            quote: ttl,
            crypto: ttl,
            forex: ttl,
            history: ttl,
            news: ttl,
            macro_data: ttl,
        }
    }
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            quote: ResourceKind::Quote.default_ttl(),
            crypto: ResourceKind::Crypto.default_ttl(),
            forex: ResourceKind::Forex.default_ttl(),
            history: ResourceKind::History.default_ttl(),
            news: ResourceKind::News.default_ttl(),
            macro_data: ResourceKind::Macro.default_ttl(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub credentials: Credentials,
    pub request_timeout: Duration,
    pub ttl: CacheTtl,
    pub relays: Vec<RelayProxy>,
    pub default_news_query: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::none(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            ttl: CacheTtl::default(),
            relays: Vec::new(),
            default_news_query: String::from(DEFAULT_NEWS_QUERY),
        }
    }
}

impl ServiceConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let request_timeout = match lookup("AXIOM_TIMEOUT_MS").and_then(non_blank) {
            None => defaults.request_timeout,
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    warn!(value = %raw, "ignoring invalid AXIOM_TIMEOUT_MS");
                    defaults.request_timeout
                }
            },
        };

        let relays = lookup("AXIOM_RELAY_URLS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|prefix| !prefix.is_empty())
                    .map(RelayProxy::new)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            credentials: Credentials::from_lookup(&lookup),
            request_timeout,
            relays,
            ..defaults
        }
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_relays(mut self, relays: Vec<RelayProxy>) -> Self {
        self.relays = relays;
        self
    }

    pub fn with_ttl(mut self, ttl: CacheTtl) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_default_news_query(mut self, query: impl Into<String>) -> Self {
        self.default_news_query = query.into();
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
