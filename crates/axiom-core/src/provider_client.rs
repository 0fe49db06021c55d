//! Single outbound request to one upstream API or one relay proxy.
//!
//! [`ProviderClient::request`] never surfaces a transport exception: timeouts,
//! non-2xx statuses and malformed bodies all become a [`FetchError`]. It does
//! not retry; ordering alternatives is the job of [`crate::routing`].

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::http_client::{HttpClient, HttpRequest};

/// Resource names are cut to this many characters in diagnostics.
const LOG_RESOURCE_CHARS: usize = 80;

/// Failure classification for a single provider request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    Status(u16),
    Transport,
    Parse,
    Unusable,
    RateLimited,
}

/// Structured failure of one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Timeout, message)
    }

    pub fn status(status: u16) -> Self {
        Self::new(
            FetchErrorKind::Status(status),
            format!("upstream returned HTTP {status}"),
        )
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Transport, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Parse, message)
    }

    pub fn unusable(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Unusable, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::RateLimited, message)
    }

    fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Timeout => "fetch.timeout",
            FetchErrorKind::Status(_) => "fetch.status",
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Parse => "fetch.parse",
            FetchErrorKind::Unusable => "fetch.unusable",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// URL-prefix relay: the target URL is appended percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayProxy {
    prefix: String,
}

impl RelayProxy {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn wrap(&self, target: &str) -> String {
        format!("{}{}", self.prefix, urlencoding::encode(target))
    }
}

/// How a strategy reaches its upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Direct,
    Relay(&'a RelayProxy),
}

impl Route<'_> {
    pub fn url(&self, target: &str) -> String {
        match self {
            Self::Direct => target.to_owned(),
            Self::Relay(relay) => relay.wrap(target),
        }
    }

    pub fn apply(&self, mut request: HttpRequest) -> HttpRequest {
        request.url = self.url(&request.url);
        request
    }
}

/// Timeout-bounded JSON fetcher shared by all adapters.
#[derive(Clone)]
pub struct ProviderClient {
    http: Arc<dyn HttpClient>,
    timeout: Duration,
}

impl ProviderClient {
    pub fn new(http: Arc<dyn HttpClient>, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issues `request` and parses the body as JSON.
    ///
    /// `resource` names the logical resource for diagnostics only; it may embed
    /// a full URL and is truncated before logging.
    pub async fn request(&self, resource: &str, request: HttpRequest) -> Result<Value, FetchError> {
        let result = self.send(request).await;
        if let Err(error) = &result {
            warn!(
                resource = %truncate(resource, LOG_RESOURCE_CHARS),
                reason = %error,
                "provider request failed"
            );
        }
        result
    }

    /// Same as [`request`](Self::request), then decodes into a typed payload.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        resource: &str,
        request: HttpRequest,
    ) -> Result<T, FetchError> {
        let value = self.request(resource, request).await?;
        serde_json::from_value(value).map_err(|e| {
            let error = FetchError::parse(format!("unexpected payload shape: {e}"));
            warn!(
                resource = %truncate(resource, LOG_RESOURCE_CHARS),
                reason = %error,
                "provider payload rejected"
            );
            error
        })
    }

    async fn send(&self, request: HttpRequest) -> Result<Value, FetchError> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let request = request.with_timeout_ms(timeout_ms);

        let response = match tokio::time::timeout(self.timeout, self.http.execute(request)).await {
            Err(_) => {
                return Err(FetchError::timeout(format!(
                    "no response within {timeout_ms} ms"
                )))
            }
            Ok(Err(error)) if error.timed_out() => return Err(FetchError::timeout(error.message())),
            Ok(Err(error)) => return Err(FetchError::transport(error.message())),
            Ok(Ok(response)) => response,
        };

        if !response.is_success() {
            return Err(FetchError::status(response.status));
        }

        serde_json::from_str(&response.body)
            .map_err(|e| FetchError::parse(format!("malformed JSON body: {e}")))
    }
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::{HttpError, HttpFuture, HttpResponse};

    struct Fixed(Result<HttpResponse, HttpError>);

    impl HttpClient for Fixed {
        fn execute<'a>(&'a self, _request: HttpRequest) -> HttpFuture<'a> {
            let result = self.0.clone();
            Box::pin(async move { result })
        }
    }

    struct Stalled;

    impl HttpClient for Stalled {
        fn execute<'a>(&'a self, _request: HttpRequest) -> HttpFuture<'a> {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(HttpResponse::ok_json("{}"))
            })
        }
    }

    fn client(http: impl HttpClient + 'static, timeout: Duration) -> ProviderClient {
        ProviderClient::new(Arc::new(http), timeout)
    }

    #[tokio::test]
    async fn parses_successful_json() {
        let client = client(
            Fixed(Ok(HttpResponse::ok_json(r#"{"rates":{"KRW":1325.4}}"#))),
            Duration::from_secs(1),
        );

        let value = client
            .request("forex", HttpRequest::get("https://example.test"))
            .await
            .expect("json should parse");
        assert_eq!(value["rates"]["KRW"], 1325.4);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let client = client(
            Fixed(Ok(HttpResponse::with_status(429, "slow down"))),
            Duration::from_secs(1),
        );

        let error = client
            .request("quote", HttpRequest::get("https://example.test"))
            .await
            .expect_err("429 must fail");
        assert_eq!(error.kind(), FetchErrorKind::Status(429));
        assert_eq!(error.code(), "fetch.status");
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let client = client(
            Fixed(Ok(HttpResponse::ok_json("<html>"))),
            Duration::from_secs(1),
        );

        let error = client
            .request("quote", HttpRequest::get("https://example.test"))
            .await
            .expect_err("html must fail");
        assert_eq!(error.kind(), FetchErrorKind::Parse);
    }

    #[tokio::test]
    async fn stalled_transport_is_bounded_by_timeout() {
        let client = client(Stalled, Duration::from_millis(50));

        let error = client
            .request("quote", HttpRequest::get("https://example.test"))
            .await
            .expect_err("stalled call must time out");
        assert_eq!(error.kind(), FetchErrorKind::Timeout);
    }

    #[tokio::test]
    async fn typed_decode_failure_is_a_parse_error() {
        let client = client(
            Fixed(Ok(HttpResponse::ok_json("[1,2,3]"))),
            Duration::from_secs(1),
        );

        let error = client
            .request_as::<std::collections::HashMap<String, f64>>(
                "forex",
                HttpRequest::get("https://example.test"),
            )
            .await
            .expect_err("array is not a map");
        assert_eq!(error.kind(), FetchErrorKind::Parse);
    }

    #[test]
    fn relay_route_percent_encodes_target() {
        let relay = RelayProxy::new("https://relay.example/?url=");
        let url = Route::Relay(&relay).url("https://query1.example/v8?a=1&b=2");

        assert_eq!(
            url,
            "https://relay.example/?url=https%3A%2F%2Fquery1.example%2Fv8%3Fa%3D1%26b%3D2"
        );
        assert_eq!(Route::Direct.url("https://x.test"), "https://x.test");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("가나다라", 2), "가나");
    }
}
