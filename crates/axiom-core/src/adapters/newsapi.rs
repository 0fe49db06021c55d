use serde::Deserialize;

use crate::http_client::HttpRequest;
use crate::provider_client::{FetchError, ProviderClient};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::QuotaGate;
use crate::NewsArticle;

const EVERYTHING_URL: &str = "https://newsapi.org/v2/everything";
const API_KEY_HEADER: &str = "x-api-key";
const REMOVED_TITLE: &str = "[Removed]";

/// `v2/everything` payload. Errors come back as `status: "error"` with a code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Everything {
    pub status: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub articles: Option<Vec<RawArticle>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub source: Option<ArticleSource>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleSource {
    pub name: Option<String>,
}

/// Articles classified from title plus description. Untitled and removed
/// articles are dropped.
pub fn normalize_articles(payload: Everything) -> Result<Vec<NewsArticle>, FetchError> {
    if payload.status.as_deref() == Some("error") {
        let message = payload
            .message
            .unwrap_or_else(|| String::from("newsapi returned an error"));
        return Err(match payload.code.as_deref() {
            Some("rateLimited") => FetchError::rate_limited(message),
            _ => FetchError::unusable(message),
        });
    }

    Ok(payload
        .articles
        .unwrap_or_default()
        .into_iter()
        .filter_map(|article| {
            let title = article
                .title
                .filter(|title| !title.trim().is_empty() && title != REMOVED_TITLE)?;
            let source_name = article
                .source
                .and_then(|source| source.name)
                .unwrap_or_else(|| String::from("NewsAPI"));
            Some(NewsArticle::classified(
                title,
                article.description,
                article.url,
                article.published_at,
                source_name,
            ))
        })
        .collect())
}

/// Keyed article search with a daily request allowance.
#[derive(Clone)]
pub struct NewsApiAdapter {
    client: ProviderClient,
    api_key: Option<String>,
    gate: QuotaGate,
}

impl NewsApiAdapter {
    pub fn new(client: ProviderClient, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            gate: QuotaGate::from_policy(&ProviderPolicy::newsapi_default()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn everything(
        &self,
        query: &str,
        page_size: usize,
    ) -> Result<Vec<NewsArticle>, FetchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(FetchError::unusable("newsapi api key not configured"));
        };
        self.gate.try_acquire()?;

        let url = format!(
            "{EVERYTHING_URL}?q={}&language=en&sortBy=publishedAt&pageSize={page_size}",
            urlencoding::encode(query)
        );
        let request = HttpRequest::get(&url).with_header(API_KEY_HEADER, api_key);
        let payload: Everything = self.client.request_as(&url, request).await?;
        normalize_articles(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider_client::FetchErrorKind;
    use crate::{Category, Sentiment};

    #[test]
    fn classifies_and_filters_articles() {
        let payload: Everything = serde_json::from_str(
            r#"{"status":"ok","totalResults":3,"articles":[
                {"source":{"id":null,"name":"Reuters"},"title":"Fed signals rate cut as markets rally",
                 "description":"Stocks surge on dovish remarks.","url":"https://example.com/a",
                 "publishedAt":"2025-03-01T12:00:00Z"},
                {"source":{"name":"Removed"},"title":"[Removed]"},
                {"title":"Quiet session","source":null}]}"#,
        )
        .expect("fixture parses");

        let articles = normalize_articles(payload).expect("normalizes");
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source_name, "Reuters");
        assert_eq!(articles[0].sentiment, Sentiment::Bullish);
        assert_eq!(articles[0].category, Category::Fed);
        assert_eq!(articles[0].published_at.as_deref(), Some("2025-03-01T12:00:00Z"));
        assert_eq!(articles[1].source_name, "NewsAPI");
        assert_eq!(articles[1].sentiment, Sentiment::Neutral);
    }

    #[test]
    fn error_status_maps_to_fetch_error() {
        let payload: Everything = serde_json::from_str(
            r#"{"status":"error","code":"rateLimited","message":"You have made too many requests"}"#,
        )
        .expect("fixture parses");

        let error = normalize_articles(payload).expect_err("error payload");
        assert_eq!(error.kind(), FetchErrorKind::RateLimited);
    }
}
