use serde::Deserialize;

use crate::adapters::parse_number;
use crate::http_client::HttpRequest;
use crate::provider_client::{FetchError, ProviderClient};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::QuotaGate;
use crate::{ProviderId, Quote, Symbol};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// `GLOBAL_QUOTE` response. Rate-limit notices arrive as HTTP 200 with a
/// `Note` or `Information` message instead of the quote object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    pub quote: Option<GlobalQuote>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalQuote {
    #[serde(rename = "03. high")]
    pub high: Option<String>,
    #[serde(rename = "04. low")]
    pub low: Option<String>,
    #[serde(rename = "05. price")]
    pub price: Option<String>,
    #[serde(rename = "06. volume")]
    pub volume: Option<String>,
    #[serde(rename = "08. previous close")]
    pub previous_close: Option<String>,
    #[serde(rename = "09. change")]
    pub change: Option<String>,
    #[serde(rename = "10. change percent")]
    pub change_percent: Option<String>,
}

pub fn normalize_quote(symbol: &Symbol, payload: GlobalQuoteResponse) -> Result<Quote, FetchError> {
    let quote = payload.quote.unwrap_or_default();
    let Some(price) = parse_number(quote.price.as_deref()) else {
        return Err(match payload.note.or(payload.information) {
            Some(notice) => FetchError::rate_limited(notice),
            None => FetchError::unusable(format!("no alphavantage quote for '{symbol}'")),
        });
    };

    let prev_close = parse_number(quote.previous_close.as_deref())
        .or_else(|| parse_number(quote.change.as_deref()).map(|change| price - change))
        .unwrap_or(price);

    Quote::from_prices(
        symbol.clone(),
        price,
        prev_close,
        parse_number(quote.high.as_deref()),
        parse_number(quote.low.as_deref()),
        parse_number(quote.volume.as_deref()).map(|volume| volume.max(0.0) as u64),
        ProviderId::Alphavantage,
    )
    .map_err(|e| FetchError::unusable(e.to_string()))
}

/// Keyed, quota-gated quote source.
#[derive(Clone)]
pub struct AlphaVantageAdapter {
    client: ProviderClient,
    api_key: Option<String>,
    gate: QuotaGate,
}

impl AlphaVantageAdapter {
    pub fn new(client: ProviderClient, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            gate: QuotaGate::from_policy(&ProviderPolicy::alphavantage_default()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn quote(&self, symbol: &Symbol) -> Result<Quote, FetchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(FetchError::unusable("alphavantage api key not configured"));
        };
        self.gate.try_acquire()?;

        let url = format!(
            "{BASE_URL}?function=GLOBAL_QUOTE&symbol={}&apikey={}",
            urlencoding::encode(symbol.as_str()),
            urlencoding::encode(api_key)
        );
        let payload: GlobalQuoteResponse = self
            .client
            .request_as(
                &format!("alphavantage GLOBAL_QUOTE {symbol}"),
                HttpRequest::get(url),
            )
            .await?;
        normalize_quote(symbol, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider_client::FetchErrorKind;

    fn symbol() -> Symbol {
        Symbol::parse("IBM").expect("valid symbol")
    }

    #[test]
    fn normalizes_string_encoded_quote() {
        let payload: GlobalQuoteResponse = serde_json::from_str(
            r#"{"Global Quote":{"01. symbol":"IBM","03. high":"187.00","04. low":"183.10",
                "05. price":"185.50","06. volume":"4213000","08. previous close":"184.00",
                "09. change":"1.5000","10. change percent":"0.8152%"}}"#,
        )
        .expect("fixture parses");

        let quote = normalize_quote(&symbol(), payload).expect("quote normalizes");
        assert_eq!(quote.price, 185.5);
        assert_eq!(quote.change, 1.5);
        assert_eq!(quote.change_pct, 0.82);
        assert_eq!(quote.volume, 4_213_000);
        assert_eq!(quote.high, 187.0);
        assert_eq!(quote.source, ProviderId::Alphavantage);
    }

    #[test]
    fn rate_limit_note_is_reported() {
        let payload: GlobalQuoteResponse =
            serde_json::from_str(r#"{"Note":"Thank you for using Alpha Vantage!"}"#)
                .expect("fixture parses");

        let error = normalize_quote(&symbol(), payload).expect_err("no quote");
        assert_eq!(error.kind(), FetchErrorKind::RateLimited);
    }

    #[test]
    fn empty_quote_object_is_unusable() {
        let payload: GlobalQuoteResponse =
            serde_json::from_str(r#"{"Global Quote":{}}"#).expect("fixture parses");

        let error = normalize_quote(&symbol(), payload).expect_err("no quote");
        assert_eq!(error.kind(), FetchErrorKind::Unusable);
    }
}
