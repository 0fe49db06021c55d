use reqwest::Url;
use serde::Deserialize;

use crate::http_client::HttpRequest;
use crate::provider_client::{FetchError, ProviderClient};
use crate::{infer_category, infer_sentiment, NewsArticle};

const RSS2JSON_URL: &str = "https://api.rss2json.com/v1/api.json";
const DESCRIPTION_CHARS: usize = 200;
const FALLBACK_SOURCE: &str = "RSS";

/// rss2json conversion of an RSS feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rss2JsonFeed {
    pub status: Option<String>,
    pub message: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<FeedItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "pubDate")]
    pub pub_date: Option<String>,
}

/// How an item's `source_name` is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    /// Every item carries the same publisher name.
    Fixed(&'static str),
    /// Host of the item link, without a leading `www.`.
    FromLink,
}

impl FeedSource {
    fn name_for(self, link: Option<&str>) -> String {
        match self {
            Self::Fixed(name) => name.to_owned(),
            Self::FromLink => link
                .and_then(|link| Url::parse(link).ok())
                .and_then(|url| {
                    url.host_str()
                        .map(|host| host.strip_prefix("www.").unwrap_or(host).to_owned())
                })
                .unwrap_or_else(|| FALLBACK_SOURCE.to_owned()),
        }
    }
}

/// Feed items as articles. Tags come from the title alone and descriptions
/// lose their markup.
pub fn normalize_feed(
    payload: Rss2JsonFeed,
    limit: usize,
    source: FeedSource,
) -> Result<Vec<NewsArticle>, FetchError> {
    if payload.status.as_deref() == Some("error") {
        return Err(FetchError::unusable(
            payload
                .message
                .unwrap_or_else(|| String::from("rss2json returned an error")),
        ));
    }

    Ok(payload
        .items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let title = item.title.filter(|title| !title.trim().is_empty())?;
            let sentiment = infer_sentiment(&title);
            let category = infer_category(&title);
            let source_name = source.name_for(item.link.as_deref());
            Some(
                NewsArticle::classified(
                    title,
                    item.description.as_deref().map(plain_text),
                    item.link,
                    item.pub_date,
                    source_name,
                )
                .with_sentiment(sentiment)
                .with_category(category),
            )
        })
        .take(limit)
        .collect())
}

/// Removes every closed `<...>` run and keeps the first 200 characters.
/// A `<` with no closing `>` after it is ordinary text.
fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        text.push_str(&rest[..open]);
        rest = &rest[open + close + 1..];
    }
    text.push_str(rest);
    text.chars().take(DESCRIPTION_CHARS).collect()
}

/// Keyless feed reader over the rss2json conversion service.
#[derive(Clone)]
pub struct RssAdapter {
    client: ProviderClient,
}

impl RssAdapter {
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    pub async fn feed(
        &self,
        feed_url: &str,
        limit: usize,
        source: FeedSource,
    ) -> Result<Vec<NewsArticle>, FetchError> {
        let url = format!("{RSS2JSON_URL}?rss_url={}", urlencoding::encode(feed_url));
        let payload: Rss2JsonFeed = self
            .client
            .request_as(&format!("rss {feed_url}"), HttpRequest::get(url))
            .await?;
        normalize_feed(payload, limit, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Sentiment};

    fn feed(json: &str) -> Rss2JsonFeed {
        serde_json::from_str(json).expect("fixture parses")
    }

    #[test]
    fn strips_markup_and_names_source_from_host() {
        let payload = feed(
            r#"{"status":"ok","items":[
                {"title":"Oil prices plunge on recession fears","link":"https://www.bbc.co.uk/news/business-1",
                 "description":"<p>Markets <b>rally</b> later</p>","pubDate":"2025-03-01 09:30:00"}]}"#,
        );

        let articles = normalize_feed(payload, 15, FeedSource::FromLink).expect("normalizes");
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source_name, "bbc.co.uk");
        assert_eq!(articles[0].description.as_deref(), Some("Markets rally later"));
        assert_eq!(articles[0].sentiment, Sentiment::Bearish);
        assert_eq!(articles[0].published_at.as_deref(), Some("2025-03-01 09:30:00"));
    }

    #[test]
    fn sentiment_ignores_description() {
        let payload = feed(
            r#"{"items":[{"title":"Bitcoin update","link":"not a url",
                "description":"surge rally soar jump"}]}"#,
        );

        let articles =
            normalize_feed(payload, 8, FeedSource::Fixed("Yahoo Finance")).expect("normalizes");
        assert_eq!(articles[0].sentiment, Sentiment::Neutral);
        assert_eq!(articles[0].category, Category::Crypto);
        assert_eq!(articles[0].source_name, "Yahoo Finance");
        assert_eq!(FeedSource::FromLink.name_for(Some("not a url")), "RSS");
    }

    #[test]
    fn respects_limit_and_truncates_descriptions() {
        let long = "x".repeat(500);
        let items = (0..20)
            .map(|index| format!(r#"{{"title":"Story {index}","description":"{long}"}}"#))
            .collect::<Vec<_>>()
            .join(",");
        let payload = feed(&format!(r#"{{"items":[{items}]}}"#));

        let articles = normalize_feed(payload, 15, FeedSource::FromLink).expect("normalizes");
        assert_eq!(articles.len(), 15);
        assert_eq!(
            articles[0].description.as_deref().map(|text| text.chars().count()),
            Some(200)
        );
    }

    #[test]
    fn unclosed_angle_bracket_is_kept_as_text() {
        assert_eq!(
            plain_text("S&P futures hold < 5000 as traders wait"),
            "S&P futures hold < 5000 as traders wait"
        );
        assert_eq!(plain_text("<b>Yields</b> slip, 10y < 4%"), "Yields slip, 10y < 4%");
    }

    #[test]
    fn stray_closing_bracket_is_kept_as_text() {
        assert_eq!(plain_text("Gold > $2,400 <em>record</em>"), "Gold > $2,400 record");
        assert_eq!(plain_text("a <x<y> b"), "a  b");
    }

    #[test]
    fn error_status_is_unusable() {
        let payload = feed(r#"{"status":"error","message":"rss_url is invalid"}"#);
        assert!(normalize_feed(payload, 8, FeedSource::FromLink).is_err());
    }
}
