//! Ordered fetch strategies with a terminal synthetic fallback.
//!
//! A [`FallbackChain`] runs its attempts one after another and keeps the first
//! result that passes the record kind's [`Usable`] check. When every attempt
//! fails the synthetic generator supplies the value, so resolving a chain
//! always yields data.

use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::provider_client::FetchError;
use crate::{
    AssetMatch, CryptoAsset, ForexPair, HistoryPoint, MacroIndicator, NewsArticle, ProviderId,
    Quote,
};

/// "Looks usable" predicate applied to each strategy's result.
pub trait Usable {
    fn is_usable(&self) -> bool;
}

impl Usable for Quote {
    fn is_usable(&self) -> bool {
        self.price.is_finite() && self.prev_close.is_finite()
    }
}

impl Usable for Vec<HistoryPoint> {
    fn is_usable(&self) -> bool {
        !self.is_empty() && self.iter().all(|point| point.price.is_finite())
    }
}

impl Usable for Vec<ForexPair> {
    fn is_usable(&self) -> bool {
        self.iter().any(|pair| pair.rate.is_some())
    }
}

impl Usable for Vec<CryptoAsset> {
    fn is_usable(&self) -> bool {
        !self.is_empty() && self.iter().all(|asset| asset.price.is_finite())
    }
}

impl Usable for MacroIndicator {
    fn is_usable(&self) -> bool {
        self.value.is_some_and(f64::is_finite)
    }
}

impl Usable for Vec<NewsArticle> {
    fn is_usable(&self) -> bool {
        !self.is_empty()
    }
}

impl Usable for Vec<AssetMatch> {
    fn is_usable(&self) -> bool {
        !self.is_empty()
    }
}

/// One failed strategy, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptError {
    pub source: ProviderId,
    pub code: &'static str,
    pub message: String,
}

impl AttemptError {
    fn new(source: ProviderId, error: &FetchError) -> Self {
        Self {
            source,
            code: error.code(),
            message: error.message().to_owned(),
        }
    }
}

/// Resolved value plus the path the chain took to get it.
#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub source: ProviderId,
    pub source_chain: Vec<ProviderId>,
    pub errors: Vec<AttemptError>,
    pub latency_ms: u64,
}

impl<T> Fetched<T> {
    pub fn is_synthetic(&self) -> bool {
        self.source.is_synthetic()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        Fetched {
            data: f(self.data),
            source: self.source,
            source_chain: self.source_chain,
            errors: self.errors,
            latency_ms: self.latency_ms,
        }
    }
}

type AttemptFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// Ordered list of lazily evaluated fetch strategies for one resource.
pub struct FallbackChain<'a, T> {
    resource: String,
    attempts: Vec<(ProviderId, AttemptFuture<'a, T>)>,
}

impl<'a, T> FallbackChain<'a, T>
where
    T: Usable + Send + 'a,
{
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            attempts: Vec::new(),
        }
    }

    pub fn attempt<F>(mut self, source: ProviderId, attempt: F) -> Self
    where
        F: Future<Output = Result<T, FetchError>> + Send + 'a,
    {
        self.attempts.push((source, Box::pin(attempt)));
        self
    }

    /// Adds the strategy only when `enabled`, e.g. when its credential is configured.
    pub fn attempt_if<F, M>(self, enabled: bool, source: ProviderId, make: M) -> Self
    where
        M: FnOnce() -> F,
        F: Future<Output = Result<T, FetchError>> + Send + 'a,
    {
        if enabled {
            self.attempt(source, make())
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Runs the attempts in order; `synthetic` is only invoked if all of them fail.
    pub async fn resolve<S>(self, synthetic: S) -> Fetched<T>
    where
        S: FnOnce() -> T,
    {
        let started = Instant::now();
        let mut source_chain = Vec::with_capacity(self.attempts.len() + 1);
        let mut errors = Vec::new();

        for (source, attempt) in self.attempts {
            source_chain.push(source);
            let error = match attempt.await {
                Ok(data) if data.is_usable() => {
                    debug!(
                        resource = %self.resource,
                        source = %source,
                        failed_attempts = errors.len(),
                        "strategy succeeded"
                    );
                    return Fetched {
                        data,
                        source,
                        source_chain,
                        errors,
                        latency_ms: elapsed_ms(started),
                    };
                }
                Ok(_) => FetchError::unusable("payload failed the usability check"),
                Err(error) => error,
            };
            debug!(resource = %self.resource, source = %source, reason = %error, "strategy failed");
            errors.push(AttemptError::new(source, &error));
        }

        info!(
            resource = %self.resource,
            failed_attempts = errors.len(),
            "serving synthetic data"
        );
        source_chain.push(ProviderId::Mock);
        Fetched {
            data: synthetic(),
            source: ProviderId::Mock,
            source_chain,
            errors,
            latency_ms: elapsed_ms(started),
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
