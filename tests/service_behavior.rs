//! Behavior-driven tests for the offline service.
//!
//! With no transport every resource is synthetic, which pins down the shape
//! guarantees callers rely on regardless of upstream availability.

use std::time::Duration;

use axiom_core::{
    AssetClass, CacheTtl, HistoryRange, MarketService, NewsArticle, ProviderId, ServiceConfig,
    Symbol, SyntheticMarket, TtlCache, DEFAULT_ANOMALY_THRESHOLD,
};

fn offline() -> MarketService {
    MarketService::offline(ServiceConfig::default()).with_synthetic(SyntheticMarket::seeded(42))
}

fn symbol(raw: &str) -> Symbol {
    Symbol::parse(raw).expect("valid symbol")
}

// =============================================================================
// Market snapshots
// =============================================================================

#[tokio::test]
async fn macro_indicators_without_key_cover_the_four_tracked_series() {
    // Given: No FRED key
    let service = offline();

    // When: Macro indicators are requested
    let indicators = service.get_macro_indicators().await;

    // Then: Exactly the four series are present, each with a value
    let keys = indicators.iter().map(|i| i.key.as_str()).collect::<Vec<_>>();
    assert_eq!(keys, vec!["fedfunds", "cpi", "unemployment", "gdp"]);
    assert!(indicators.iter().all(|i| i.value.is_some()));
    assert!(indicators.iter().all(|i| i.source == ProviderId::Mock));
}

#[tokio::test]
async fn indices_carry_one_labelled_quote_per_tracked_market() {
    let service = offline();

    let indices = service.get_indices().await;

    let labels = indices.iter().map(|i| i.label.as_str()).collect::<Vec<_>>();
    assert_eq!(
        labels,
        vec!["S&P 500", "NASDAQ", "DOW", "KOSPI", "NIKKEI", "GOLD", "CRUDE OIL", "VIX"]
    );
    assert_eq!(indices[0].quote.symbol.as_str(), "^GSPC");
    assert!(indices.iter().all(|i| i.quote.price > 0.0));
}

#[tokio::test]
async fn index_quotes_are_shared_with_the_quote_cache() {
    let service = offline();

    let indices = service.get_indices().await;
    let gold = service.get_quote(&symbol("GC=F")).await;

    let cached = indices
        .iter()
        .find(|i| i.label == "GOLD")
        .expect("gold is tracked");
    assert_eq!(cached.quote, gold);
}

#[tokio::test]
async fn forex_lists_the_four_tracked_pairs() {
    let service = offline();

    let pairs = service.get_forex().await;

    assert_eq!(pairs.len(), 4);
    assert!(pairs.iter().all(|p| p.rate.is_some_and(|rate| rate > 0.0)));
    assert!(pairs.iter().all(|p| p.label == format!("{}/{}", p.base, p.quote)));
}

#[tokio::test]
async fn crypto_snapshot_has_uppercase_symbols() {
    let service = offline();

    let assets = service.get_crypto().await;

    assert!(!assets.is_empty());
    assert!(assets
        .iter()
        .all(|a| a.symbol == a.symbol.to_uppercase() && a.price > 0.0));
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn history_is_ascending_finite_and_non_empty() {
    let service = offline();

    for range in HistoryRange::ALL {
        let history = service.get_history(&symbol("BTC-USD"), range).await;

        assert!(!history.is_empty(), "range {range}");
        assert!(history.iter().all(|p| p.price.is_finite() && p.price > 0.0));
        assert!(history.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }
}

#[tokio::test]
async fn history_anomalies_are_a_subset_of_the_series() {
    let service = offline();
    let history = service.get_history(&symbol("AAPL"), HistoryRange::OneMonth).await;

    let anomalies = service
        .detect_anomalies(&history, DEFAULT_ANOMALY_THRESHOLD)
        .expect("default threshold is valid");

    assert!(anomalies.len() < history.len());
    for scored in &anomalies {
        assert!(scored.z_score.abs() >= DEFAULT_ANOMALY_THRESHOLD);
        assert!(history.contains(&scored.point));
    }
}

// =============================================================================
// News and interpretation
// =============================================================================

#[tokio::test]
async fn synthetic_news_is_tagged_and_interpretable() {
    let service = offline();

    let news = service.get_finance_news(Some("  ")).await;

    assert!(!news.is_empty());
    for article in &news {
        let interpretation = service.interpret_article(article);
        assert_eq!(interpretation.category, article.category);
        assert_eq!(interpretation.sentiment, article.sentiment);
        assert!(!interpretation.impact.is_empty());
    }
}

#[tokio::test]
async fn interpretation_follows_headline_keywords() {
    let service = offline();
    let article = NewsArticle::classified(
        "Powell hints at rate cut as growth slows",
        None,
        None,
        None,
        "Reuters",
    );

    let interpretation = service.interpret_article(&article);

    assert_eq!(interpretation.category.as_str(), "fed");
    assert!(!interpretation.institution.is_empty());
    assert!(!interpretation.watch_point.is_empty());
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn search_ranks_exact_symbol_first_case_insensitively() {
    let service = offline();

    let matches = service.search_assets("aapl").await;

    assert_eq!(matches[0].symbol, "AAPL");
    assert_eq!(matches[0].asset_type, AssetClass::Equity);
}

#[tokio::test]
async fn search_matches_names_and_caps_results() {
    let service = offline();

    let matches = service.search_assets("samsung").await;

    assert!(matches.len() >= 3);
    assert!(matches.len() <= 8);
    assert!(matches
        .iter()
        .all(|m| m.name.to_lowercase().contains("samsung")));
}

#[tokio::test]
async fn blank_search_returns_nothing() {
    let service = offline();
    assert!(service.search_assets("   ").await.is_empty());
}

// =============================================================================
// Cache
// =============================================================================

#[tokio::test]
async fn repeated_quote_within_ttl_is_identical() {
    let service = offline();
    let aapl = symbol("AAPL");

    let first = service.get_quote(&aapl).await;
    let second = service.get_quote(&aapl).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn expired_entries_are_regenerated() {
    let config =
        ServiceConfig::default().with_ttl(CacheTtl::uniform(Duration::from_millis(10)));
    let service = MarketService::offline(config);

    service.get_crypto().await;
    assert_eq!(service.cache().len().await, 1);

    tokio::time::sleep(Duration::from_millis(30)).await;
    service.cache().clear_expired().await;
    assert!(service.cache().is_empty().await);

    service.get_crypto().await;
    assert_eq!(service.cache().len().await, 1);
}

#[tokio::test]
async fn services_sharing_a_cache_see_each_others_entries() {
    let cache = TtlCache::new();
    let first = MarketService::offline(ServiceConfig::default()).with_cache(cache.clone());
    let second = MarketService::offline(ServiceConfig::default()).with_cache(cache);

    let quote = first.get_quote(&symbol("MSFT")).await;
    let replay = second.get_quote(&symbol("MSFT")).await;

    assert_eq!(quote, replay);
}
