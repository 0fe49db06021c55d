use std::collections::HashMap;

use serde::Deserialize;

use crate::catalog::FOREX_PAIRS;
use crate::http_client::HttpRequest;
use crate::provider_client::{FetchError, ProviderClient};
use crate::{ForexPair, ProviderId};

const LATEST_USD_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// `v4/latest/{base}` payload: units of each currency per one `base`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatestRates {
    pub base: Option<String>,
    #[serde(default)]
    pub rates: Option<HashMap<String, f64>>,
}

/// Resolves each `(base, quote)` pair, crossing through the payload base when
/// neither side is it. A pair whose currencies are missing gets `rate: None`.
pub fn normalize_pairs(
    payload: LatestRates,
    pairs: &[(&str, &str)],
) -> Result<Vec<ForexPair>, FetchError> {
    let rates = payload
        .rates
        .filter(|rates| !rates.is_empty())
        .ok_or_else(|| FetchError::unusable("exchange rate payload has no rates"))?;
    let payload_base = payload.base.unwrap_or_else(|| String::from("USD"));

    let per_base = |code: &str| -> Option<f64> {
        if code == payload_base {
            Some(1.0)
        } else {
            rates
                .get(code)
                .copied()
                .filter(|rate| rate.is_finite() && *rate > 0.0)
        }
    };

    Ok(pairs
        .iter()
        .map(|(base, quote)| {
            let rate = per_base(base)
                .zip(per_base(quote))
                .map(|(base_rate, quote_rate)| quote_rate / base_rate);
            ForexPair::new(*base, *quote, rate, ProviderId::Exchangerate)
        })
        .collect())
}

#[derive(Clone)]
pub struct ExchangeRateAdapter {
    client: ProviderClient,
}

impl ExchangeRateAdapter {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    pub async fn pairs(&self) -> Result<Vec<ForexPair>, FetchError> {
        let payload: LatestRates = self
            .client
            .request_as(LATEST_USD_URL, HttpRequest::get(LATEST_USD_URL))
            .await?;
        normalize_pairs(payload, FOREX_PAIRS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_direct_and_cross_rates() {
        let payload: LatestRates = serde_json::from_str(
            r#"{"base":"USD","rates":{"USD":1,"KRW":1325.43,"JPY":149.8234,"EUR":0.9223,"CNY":7.23418}}"#,
        )
        .expect("fixture parses");

        let pairs = normalize_pairs(payload, FOREX_PAIRS).expect("rates present");
        let rates = pairs.iter().map(|pair| pair.rate).collect::<Vec<_>>();

        assert_eq!(
            rates,
            vec![Some(1325.4), Some(149.8), Some(1.0842), Some(7.2342)]
        );
        assert_eq!(pairs[2].label, "EUR/USD");
        assert_eq!(pairs[2].base, "EUR");
    }

    #[test]
    fn missing_currency_leaves_rate_empty() {
        let payload: LatestRates =
            serde_json::from_str(r#"{"base":"USD","rates":{"KRW":1300.0}}"#).expect("fixture parses");

        let pairs = normalize_pairs(payload, FOREX_PAIRS).expect("rates present");
        assert_eq!(pairs[0].rate, Some(1300.0));
        assert_eq!(pairs[1].rate, None);
        assert_eq!(pairs[2].rate, None);
    }

    #[test]
    fn empty_rates_are_unusable() {
        let payload: LatestRates = serde_json::from_str(r#"{"base":"USD"}"#).expect("fixture parses");
        assert!(normalize_pairs(payload, FOREX_PAIRS).is_err());
    }
}
