use serde::Deserialize;

use crate::catalog::SEARCH_LIMIT;
use crate::http_client::HttpRequest;
use crate::provider_client::{FetchError, ProviderClient, Route};
use crate::{
    date_label, round_price, AssetClass, AssetMatch, HistoryPoint, HistoryRange, ProviderId,
    Quote, Symbol,
};

const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SEARCH_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";

// Yahoo Finance v8 chart payload

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResponse {
    pub chart: Option<ChartBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartBody {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub timestamp: Option<Vec<Option<i64>>>,
    pub indicators: Option<ChartIndicators>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub regular_market_price: Option<f64>,
    pub previous_close: Option<f64>,
    pub chart_previous_close: Option<f64>,
    pub regular_market_volume: Option<f64>,
    pub regular_market_day_high: Option<f64>,
    pub regular_market_day_low: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartIndicators {
    #[serde(default)]
    pub quote: Option<Vec<ChartQuote>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartQuote {
    #[serde(default)]
    pub close: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub volume: Option<Vec<Option<f64>>>,
}

// Yahoo Finance v1 search payload

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub quotes: Option<Vec<SearchQuote>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuote {
    pub symbol: Option<String>,
    pub longname: Option<String>,
    pub shortname: Option<String>,
    #[serde(rename = "quoteType")]
    pub quote_type: Option<String>,
    pub exchange: Option<String>,
}

fn first_result(payload: ChartResponse) -> Option<ChartResult> {
    payload.chart?.result?.into_iter().next()
}

/// Quote from the chart `meta` block. Price falls back to the previous close
/// and the previous close falls back to the price.
pub fn normalize_quote(symbol: &Symbol, payload: ChartResponse) -> Result<Quote, FetchError> {
    let meta = first_result(payload)
        .and_then(|result| result.meta)
        .ok_or_else(|| FetchError::unusable(format!("no chart meta for '{symbol}'")))?;

    let price = meta
        .regular_market_price
        .or(meta.previous_close)
        .ok_or_else(|| FetchError::unusable(format!("no price for '{symbol}'")))?;
    let prev_close = meta
        .chart_previous_close
        .or(meta.previous_close)
        .unwrap_or(price);

    Quote::from_prices(
        symbol.clone(),
        price,
        prev_close,
        meta.regular_market_day_high,
        meta.regular_market_day_low,
        meta.regular_market_volume
            .filter(|volume| volume.is_finite())
            .map(|volume| volume.max(0.0) as u64),
        ProviderId::Yahoo,
    )
    .map_err(|e| FetchError::unusable(e.to_string()))
}

/// Close series in ascending time order. Points without a finite close are dropped.
pub fn normalize_history(payload: ChartResponse) -> Vec<HistoryPoint> {
    let Some(result) = first_result(payload) else {
        return Vec::new();
    };
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .and_then(|indicators| indicators.quote)
        .and_then(|quotes| quotes.into_iter().next())
        .unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut points = timestamps
        .iter()
        .enumerate()
        .filter_map(|(index, timestamp)| {
            let timestamp = (*timestamp)?;
            let close = closes
                .get(index)
                .copied()
                .flatten()
                .filter(|close| close.is_finite())?;
            let volume = volumes
                .get(index)
                .copied()
                .flatten()
                .filter(|volume| volume.is_finite())
                .map_or(0, |volume| volume.max(0.0) as u64);
            Some(HistoryPoint {
                date: date_label(timestamp),
                timestamp,
                price: round_price(close),
                volume,
            })
        })
        .collect::<Vec<_>>();

    points.sort_by_key(|point| point.timestamp);
    points
}

pub fn normalize_search(payload: SearchResponse) -> Vec<AssetMatch> {
    payload
        .quotes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|quote| {
            let symbol = quote.symbol.filter(|symbol| !symbol.trim().is_empty())?;
            Some(AssetMatch {
                name: quote
                    .longname
                    .or(quote.shortname)
                    .unwrap_or_else(|| symbol.clone()),
                asset_type: quote
                    .quote_type
                    .as_deref()
                    .map_or(AssetClass::Other, AssetClass::from_vendor),
                exchange: quote.exchange,
                symbol,
            })
        })
        .take(SEARCH_LIMIT)
        .collect()
}

/// Keyless chart and search source; reachable directly or through relays.
#[derive(Clone)]
pub struct YahooAdapter {
    client: ProviderClient,
}

impl YahooAdapter {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    pub async fn quote(&self, symbol: &Symbol, route: Route<'_>) -> Result<Quote, FetchError> {
        let payload = self.chart(symbol, "1d", "1d", route).await?;
        normalize_quote(symbol, payload)
    }

    pub async fn history(
        &self,
        symbol: &Symbol,
        range: HistoryRange,
        route: Route<'_>,
    ) -> Result<Vec<HistoryPoint>, FetchError> {
        let payload = self
            .chart(symbol, range.chart_interval(), range.as_str(), route)
            .await?;
        Ok(normalize_history(payload))
    }

    pub async fn search(&self, query: &str, route: Route<'_>) -> Result<Vec<AssetMatch>, FetchError> {
        let url = format!(
            "{SEARCH_URL}?q={}&quotesCount={SEARCH_LIMIT}&newsCount=0",
            urlencoding::encode(query)
        );
        let url = route.url(&url);
        let payload: SearchResponse = self.client.request_as(&url, HttpRequest::get(&url)).await?;
        Ok(normalize_search(payload))
    }

    async fn chart(
        &self,
        symbol: &Symbol,
        interval: &str,
        range: &str,
        route: Route<'_>,
    ) -> Result<ChartResponse, FetchError> {
        let url = format!(
            "{CHART_URL}/{}?interval={interval}&range={range}",
            urlencoding::encode(symbol.as_str())
        );
        let url = route.url(&url);
        self.client.request_as(&url, HttpRequest::get(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider_client::FetchErrorKind;

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("valid symbol")
    }

    fn chart(json: &str) -> ChartResponse {
        serde_json::from_str(json).expect("fixture parses")
    }

    #[test]
    fn quote_prefers_chart_previous_close() {
        let payload = chart(
            r#"{"chart":{"result":[{"meta":{"regularMarketPrice":5300.0,
                "previousClose":5250.0,"chartPreviousClose":5200.0,
                "regularMarketVolume":1200,"regularMarketDayHigh":5310.5}}]}}"#,
        );

        let quote = normalize_quote(&symbol("^GSPC"), payload).expect("quote normalizes");
        assert_eq!(quote.prev_close, 5200.0);
        assert_eq!(quote.change, 100.0);
        assert_eq!(quote.change_pct, 1.92);
        assert_eq!(quote.high, 5310.5);
        assert_eq!(quote.low, 5300.0);
        assert_eq!(quote.volume, 1200);
    }

    #[test]
    fn quote_falls_back_to_previous_close_for_price() {
        let payload = chart(r#"{"chart":{"result":[{"meta":{"previousClose":10.0}}]}}"#);

        let quote = normalize_quote(&symbol("X"), payload).expect("quote normalizes");
        assert_eq!(quote.price, 10.0);
        assert_eq!(quote.change, 0.0);
    }

    #[test]
    fn missing_result_is_unusable() {
        let payload = chart(r#"{"chart":{"result":null,"error":{"code":"Not Found"}}}"#);

        let error = normalize_quote(&symbol("NOPE"), payload).expect_err("no result");
        assert_eq!(error.kind(), FetchErrorKind::Unusable);
        assert!(normalize_history(chart("{}")).is_empty());
    }

    #[test]
    fn history_drops_null_closes_and_sorts() {
        let payload = chart(
            r#"{"chart":{"result":[{"timestamp":[1736121600,1736035200,1736208000],
                "indicators":{"quote":[{"close":[101.456,100.0,null],
                "volume":[10,null,30]}]}}]}}"#,
        );

        let points = normalize_history(payload);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp, 1_736_035_200);
        assert_eq!(points[0].date, "Jan 5");
        assert_eq!(points[0].volume, 0);
        assert_eq!(points[1].price, 101.46);
        assert_eq!(points[1].volume, 10);
    }

    #[test]
    fn search_prefers_long_name() {
        let payload: SearchResponse = serde_json::from_str(
            r#"{"quotes":[
                {"symbol":"SHOP","longname":"Shopify Inc.","shortname":"Shopify","quoteType":"EQUITY","exchange":"NYQ"},
                {"symbol":"SHOP.TO","shortname":"Shopify TSX","quoteType":"EQUITY"},
                {"longname":"No symbol"},
                {"symbol":"SHOPX","quoteType":"MUTUALFUND"}]}"#,
        )
        .expect("fixture parses");

        let matches = normalize_search(payload);
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].name, "Shopify Inc.");
        assert_eq!(matches[1].name, "Shopify TSX");
        assert_eq!(matches[1].exchange, None);
        assert_eq!(matches[2].name, "SHOPX");
        assert_eq!(matches[2].asset_type, AssetClass::Fund);
    }
}
