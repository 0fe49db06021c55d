use serde::Deserialize;

use crate::adapters::parse_number;
use crate::catalog::MacroSeries;
use crate::http_client::HttpRequest;
use crate::provider_client::{FetchError, ProviderClient, Route};
use crate::{round_price, round_to, MacroIndicator, ProviderId};

const OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const OBSERVATION_LIMIT: usize = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Observations {
    #[serde(default)]
    pub observations: Option<Vec<Observation>>,
}

/// FRED encodes values as strings and uses `"."` for a missing observation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Observation {
    pub date: Option<String>,
    pub value: Option<String>,
}

/// Latest and previous valid observations of a newest-first payload.
pub fn normalize_indicator(
    series: &MacroSeries,
    payload: Observations,
) -> Result<MacroIndicator, FetchError> {
    let mut valid = payload
        .observations
        .unwrap_or_default()
        .into_iter()
        .filter_map(|observation| {
            parse_number(observation.value.as_deref()).map(|value| (observation.date, value))
        });

    let (date, value) = valid.next().ok_or_else(|| {
        FetchError::unusable(format!("no valid observation for {}", series.series_id))
    })?;
    let prev = valid.next().map(|(_, prev)| prev);

    let change = prev.map(|prev| round_to(value - prev, 3));
    let change_pct = prev
        .filter(|prev| *prev != 0.0)
        .map(|prev| round_price((value - prev) / prev.abs() * 100.0));

    Ok(MacroIndicator {
        key: series.key.to_owned(),
        label: series.label.to_owned(),
        unit: series.unit.to_owned(),
        value: Some(value),
        prev,
        change,
        change_pct,
        date,
        description: series.description.to_owned(),
        source: ProviderId::Fred,
    })
}

/// Keyed macro series source; reachable directly or through relays.
#[derive(Clone)]
pub struct FredAdapter {
    client: ProviderClient,
    api_key: Option<String>,
}

impl FredAdapter {
    pub fn new(client: ProviderClient, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn observations(
        &self,
        series: &MacroSeries,
        route: Route<'_>,
    ) -> Result<MacroIndicator, FetchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(FetchError::unusable("fred api key not configured"));
        };

        let url = format!(
            "{OBSERVATIONS_URL}?series_id={}&api_key={}&file_type=json&sort_order=desc&limit={OBSERVATION_LIMIT}",
            series.series_id,
            urlencoding::encode(api_key)
        );
        let payload: Observations = self
            .client
            .request_as(
                &format!("fred observations {}", series.series_id),
                route.apply(HttpRequest::get(url)),
            )
            .await?;
        normalize_indicator(series, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::macro_series;
    use crate::provider_client::FetchErrorKind;

    fn series(key: &str) -> &'static MacroSeries {
        macro_series(key).expect("known series")
    }

    fn observations(json: &str) -> Observations {
        serde_json::from_str(json).expect("fixture parses")
    }

    #[test]
    fn skips_missing_observations() {
        let payload = observations(
            r#"{"observations":[
                {"date":"2025-03-01","value":"."},
                {"date":"2025-02-01","value":"4.33"},
                {"date":"2025-01-01","value":"4.10"}]}"#,
        );

        let indicator = normalize_indicator(series("fedfunds"), payload).expect("normalizes");
        assert_eq!(indicator.value, Some(4.33));
        assert_eq!(indicator.prev, Some(4.1));
        assert_eq!(indicator.change, Some(0.23));
        assert_eq!(indicator.change_pct, Some(5.61));
        assert_eq!(indicator.date.as_deref(), Some("2025-02-01"));
        assert_eq!(indicator.label, "Fed Funds Rate");
        assert_eq!(indicator.source, ProviderId::Fred);
    }

    #[test]
    fn percent_change_uses_absolute_previous_value() {
        let payload = observations(
            r#"{"observations":[{"date":"2025-04-01","value":"1.0"},{"date":"2025-01-01","value":"-2.0"}]}"#,
        );

        let indicator = normalize_indicator(series("gdp"), payload).expect("normalizes");
        assert_eq!(indicator.change, Some(3.0));
        assert_eq!(indicator.change_pct, Some(150.0));
    }

    #[test]
    fn single_observation_has_no_change() {
        let payload = observations(r#"{"observations":[{"date":"2025-02-01","value":"4.1"}]}"#);

        let indicator = normalize_indicator(series("unemployment"), payload).expect("normalizes");
        assert_eq!(indicator.prev, None);
        assert_eq!(indicator.change, None);
        assert_eq!(indicator.change_pct, None);
    }

    #[test]
    fn no_valid_observation_is_unusable() {
        let payload = observations(r#"{"observations":[{"date":"2025-02-01","value":"."}]}"#);

        let error = normalize_indicator(series("cpi"), payload).expect_err("nothing valid");
        assert_eq!(error.kind(), FetchErrorKind::Unusable);
    }
}
