//! Aggregation facade.
//!
//! [`MarketService`] is the public entry point. Every operation is total: it
//! checks the cache, runs the resource's fallback chain on a miss, stores the
//! result under the resource kind's TTL, and returns an owned record.
//!
//! | Operation | Strategy order | Cache key |
//! |-----------|----------------|-----------|
//! | [`get_quote`](MarketService::get_quote) | Alpha Vantage (keyed), Yahoo, relays, synthetic | `quote:{sym}` |
//! | [`get_history`](MarketService::get_history) | Yahoo, relays, synthetic | `history:{sym}:{range}` |
//! | [`get_indices`](MarketService::get_indices) | join of `get_quote` | `indices:all` |
//! | [`get_forex`](MarketService::get_forex) | exchangerate-api, synthetic | `forex:all` |
//! | [`get_crypto`](MarketService::get_crypto) | CoinGecko, synthetic | `crypto:top` |
//! | [`get_macro_indicators`](MarketService::get_macro_indicators) | FRED per series (keyed), relays, synthetic | `macro:all` |
//! | [`get_finance_news`](MarketService::get_finance_news) | NewsAPI (keyed), business RSS, synthetic | `news:{query}` |
//! | [`get_asset_news`](MarketService::get_asset_news) | NewsAPI (keyed), symbol RSS, synthetic | `news:asset:{sym}` |
//! | [`search_assets`](MarketService::search_assets) | local table, Yahoo, relays | not cached |
//!
//! History and news records carry no provider field, so their cache entries are
//! [`Tagged`] and the `*_with_source` variants hand the provider back.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use tracing::debug;

use crate::adapters::{
    AlphaVantageAdapter, CoinGeckoAdapter, ExchangeRateAdapter, FeedSource, FredAdapter,
    NewsApiAdapter, RssAdapter, YahooAdapter,
};
use crate::anomaly::{self, Scored, SeriesValue};
use crate::cache::{ResourceKind, TtlCache};
use crate::catalog::{
    asset_news_feed, search_local, MacroSeries, BUSINESS_NEWS_FEED, INDICES, MACRO_SERIES,
};
use crate::classify;
use crate::config::ServiceConfig;
use crate::http_client::{HttpClient, OfflineHttpClient};
use crate::provider_client::{ProviderClient, Route};
use crate::routing::{FallbackChain, Fetched, Usable};
use crate::synthetic::SyntheticMarket;
use crate::{
    AssetMatch, CryptoAsset, ForexPair, HistoryPoint, HistoryRange, IndexQuote, Interpretation,
    MacroIndicator, NewsArticle, ProviderId, Quote, Symbol, Tagged, ValidationError,
};

const FINANCE_NEWS_PAGE: usize = 20;
const BUSINESS_FEED_ITEMS: usize = 15;
const ASSET_NEWS_ITEMS: usize = 8;
const ASSET_FEED_SOURCE: &str = "Yahoo Finance";

/// Market data facade over every provider, the cache, and the synthetic generator.
pub struct MarketService {
    config: ServiceConfig,
    cache: TtlCache,
    synthetic: SyntheticMarket,
    alphavantage: AlphaVantageAdapter,
    yahoo: YahooAdapter,
    coingecko: CoinGeckoAdapter,
    exchangerate: ExchangeRateAdapter,
    fred: FredAdapter,
    newsapi: NewsApiAdapter,
    rss: RssAdapter,
}

impl MarketService {
    pub fn new(config: ServiceConfig, http: Arc<dyn HttpClient>) -> Self {
        let client = ProviderClient::new(http, config.request_timeout);
        let credentials = &config.credentials;

        Self {
            alphavantage: AlphaVantageAdapter::new(
                client.clone(),
                credentials.alphavantage.clone(),
            ),
            yahoo: YahooAdapter::new(client.clone()),
            coingecko: CoinGeckoAdapter::new(client.clone(), credentials.coingecko.clone()),
            exchangerate: ExchangeRateAdapter::new(client.clone()),
            fred: FredAdapter::new(client.clone(), credentials.fred.clone()),
            newsapi: NewsApiAdapter::new(client.clone(), credentials.newsapi.clone()),
            rss: RssAdapter::new(client),
            cache: TtlCache::new(),
            synthetic: SyntheticMarket::new(),
            config,
        }
    }

    /// Service that never touches the network; every resource is synthetic.
    pub fn offline(config: ServiceConfig) -> Self {
        Self::new(config, Arc::new(OfflineHttpClient))
    }

    /// Replaces the synthetic generator, e.g. with a seeded one.
    pub fn with_synthetic(mut self, synthetic: SyntheticMarket) -> Self {
        self.synthetic = synthetic;
        self
    }

    /// Shares an existing cache between service instances.
    pub fn with_cache(mut self, cache: TtlCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub async fn get_quote(&self, symbol: &Symbol) -> Quote {
        let key = format!("quote:{symbol}");
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        let mut chain = FallbackChain::new(key.as_str()).attempt_if(
            self.alphavantage.is_configured(),
            ProviderId::Alphavantage,
            || self.alphavantage.quote(symbol),
        );
        for route in self.routes() {
            chain = chain.attempt(ProviderId::Yahoo, self.yahoo.quote(symbol, route));
        }

        let fetched = chain.resolve(|| self.synthetic.quote(symbol)).await;
        self.store(key, ResourceKind::Quote, fetched).await
    }

    pub async fn get_history(&self, symbol: &Symbol, range: HistoryRange) -> Vec<HistoryPoint> {
        self.get_history_with_source(symbol, range).await.data
    }

    /// Same series as [`get_history`](Self::get_history), with its provider.
    pub async fn get_history_with_source(
        &self,
        symbol: &Symbol,
        range: HistoryRange,
    ) -> Tagged<Vec<HistoryPoint>> {
        let key = format!("history:{symbol}:{range}");
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        let mut chain = FallbackChain::new(key.as_str());
        for route in self.routes() {
            chain = chain.attempt(ProviderId::Yahoo, self.yahoo.history(symbol, range, route));
        }

        let fetched = chain.resolve(|| self.synthetic.history(symbol)).await;
        self.store(key, ResourceKind::History, tagged(fetched)).await
    }

    /// Headline indices fetched concurrently; each one goes through the quote cache.
    pub async fn get_indices(&self) -> Vec<IndexQuote> {
        let key = "indices:all";
        if let Some(hit) = self.cache.get(key).await {
            return hit;
        }

        let symbols = INDICES
            .iter()
            .filter_map(|(raw, label)| Symbol::parse(raw).ok().map(|symbol| (symbol, *label)))
            .collect::<Vec<_>>();
        let quotes = join_all(symbols.iter().map(|(symbol, _)| self.get_quote(symbol))).await;

        let indices = symbols
            .iter()
            .zip(quotes)
            .map(|((_, label), quote)| IndexQuote {
                label: (*label).to_owned(),
                quote,
            })
            .collect::<Vec<_>>();

        self.cache
            .set(key, indices, self.config.ttl.for_kind(ResourceKind::Quote))
            .await
    }

    pub async fn get_forex(&self) -> Vec<ForexPair> {
        let key = "forex:all";
        if let Some(hit) = self.cache.get(key).await {
            return hit;
        }

        let fetched = FallbackChain::new(key)
            .attempt(ProviderId::Exchangerate, self.exchangerate.pairs())
            .resolve(|| self.synthetic.forex())
            .await;
        self.store(key, ResourceKind::Forex, fetched).await
    }

    pub async fn get_crypto(&self) -> Vec<CryptoAsset> {
        let key = "crypto:top";
        if let Some(hit) = self.cache.get(key).await {
            return hit;
        }

        let fetched = FallbackChain::new(key)
            .attempt(ProviderId::Coingecko, self.coingecko.markets())
            .resolve(|| self.synthetic.crypto())
            .await;
        self.store(key, ResourceKind::Crypto, fetched).await
    }

    /// One indicator per tracked series. Without a FRED key the whole set is synthetic.
    pub async fn get_macro_indicators(&self) -> Vec<MacroIndicator> {
        let key = "macro:all";
        if let Some(hit) = self.cache.get(key).await {
            return hit;
        }

        let indicators = if self.fred.is_configured() {
            let fetched = join_all(MACRO_SERIES.iter().map(|series| self.macro_series(series))).await;
            if fetched.iter().all(|indicator| indicator.value.is_none()) {
                self.synthetic.macro_indicators()
            } else {
                fetched
            }
        } else {
            debug!(resource = key, "fred key not configured");
            self.synthetic.macro_indicators()
        };

        self.cache
            .set(key, indicators, self.config.ttl.for_kind(ResourceKind::Macro))
            .await
    }

    /// Headlines for `query`, or for the configured default query when absent or blank.
    pub async fn get_finance_news(&self, query: Option<&str>) -> Vec<NewsArticle> {
        self.get_finance_news_with_source(query).await.data
    }

    pub async fn get_finance_news_with_source(
        &self,
        query: Option<&str>,
    ) -> Tagged<Vec<NewsArticle>> {
        let query = query
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .unwrap_or(self.config.default_news_query.as_str());
        let key = format!("news:{query}");
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        let fetched = FallbackChain::new(key.as_str())
            .attempt_if(self.newsapi.is_configured(), ProviderId::Newsapi, || {
                self.newsapi.everything(query, FINANCE_NEWS_PAGE)
            })
            .attempt(
                ProviderId::Rss,
                self.rss
                    .feed(BUSINESS_NEWS_FEED, BUSINESS_FEED_ITEMS, FeedSource::FromLink),
            )
            .resolve(|| self.synthetic.news())
            .await;
        self.store(key, ResourceKind::News, tagged(fetched)).await
    }

    /// Headlines for one asset, searched by `name` when given, else by symbol.
    pub async fn get_asset_news(&self, symbol: &Symbol, name: Option<&str>) -> Vec<NewsArticle> {
        self.get_asset_news_with_source(symbol, name).await.data
    }

    pub async fn get_asset_news_with_source(
        &self,
        symbol: &Symbol,
        name: Option<&str>,
    ) -> Tagged<Vec<NewsArticle>> {
        let key = format!("news:asset:{symbol}");
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        let query = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(symbol.as_str());
        let feed_url = asset_news_feed(symbol.as_str());

        let fetched = FallbackChain::new(key.as_str())
            .attempt_if(self.newsapi.is_configured(), ProviderId::Newsapi, || {
                self.newsapi.everything(query, ASSET_NEWS_ITEMS)
            })
            .attempt(
                ProviderId::Rss,
                self.rss.feed(
                    &feed_url,
                    ASSET_NEWS_ITEMS,
                    FeedSource::Fixed(ASSET_FEED_SOURCE),
                ),
            )
            .resolve(|| self.synthetic.asset_news(symbol))
            .await;
        self.store(key, ResourceKind::News, tagged(fetched)).await
    }

    /// Local reference table first; the live search only runs when nothing
    /// matches locally. No match anywhere yields an empty list.
    pub async fn search_assets(&self, query: &str) -> Vec<AssetMatch> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let local = search_local(query);
        if !local.is_empty() {
            debug!(query, matches = local.len(), "search served from reference table");
            return local;
        }

        for route in self.routes() {
            if let Ok(matches) = self.yahoo.search(query, route).await {
                if matches.is_usable() {
                    return matches;
                }
            }
        }
        debug!(query, "search found no matches");
        Vec::new()
    }

    pub fn interpret_article(&self, article: &NewsArticle) -> Interpretation {
        classify::interpret(article)
    }

    /// Points whose |z-score| reaches `threshold`, in series order.
    pub fn detect_anomalies<T: SeriesValue + Clone>(
        &self,
        series: &[T],
        threshold: f64,
    ) -> Result<Vec<Scored<T>>, ValidationError> {
        let threshold = anomaly::validate_threshold(threshold)?;
        Ok(anomaly::detect_anomalies(series, threshold))
    }

    async fn macro_series(&self, series: &MacroSeries) -> MacroIndicator {
        let mut chain = FallbackChain::new(format!("macro:{}", series.key));
        for route in self.routes() {
            chain = chain.attempt(ProviderId::Fred, self.fred.observations(series, route));
        }

        chain
            .resolve(|| {
                self.synthetic
                    .macro_indicator(series.key)
                    .unwrap_or_else(|| empty_indicator(series))
            })
            .await
            .data
    }

    /// Direct access first, then each configured relay in order.
    fn routes(&self) -> impl Iterator<Item = Route<'_>> {
        std::iter::once(Route::Direct).chain(self.config.relays.iter().map(Route::Relay))
    }

    async fn store<T: Serialize>(
        &self,
        key: impl Into<String>,
        kind: ResourceKind,
        fetched: Fetched<T>,
    ) -> T {
        let key = key.into();
        debug!(
            resource = %key,
            source = %fetched.source,
            attempts = fetched.source_chain.len(),
            failures = fetched.errors.len(),
            latency_ms = fetched.latency_ms,
            "resource resolved"
        );
        self.cache
            .set(key, fetched.data, self.config.ttl.for_kind(kind))
            .await
    }
}

/// Moves the provider onto the payload so it survives caching.
fn tagged<T>(fetched: Fetched<T>) -> Fetched<Tagged<T>> {
    let source = fetched.source;
    fetched.map(|data| Tagged { source, data })
}

fn empty_indicator(series: &MacroSeries) -> MacroIndicator {
    MacroIndicator {
        key: series.key.to_owned(),
        label: series.label.to_owned(),
        unit: series.unit.to_owned(),
        value: None,
        prev: None,
        change: None,
        change_pct: None,
        date: None,
        description: series.description.to_owned(),
        source: ProviderId::Mock,
    }
}
