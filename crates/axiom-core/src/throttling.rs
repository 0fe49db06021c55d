use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

use crate::provider_client::FetchError;
use crate::provider_policy::ProviderPolicy;
use crate::ProviderId;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Fail-fast request budget for a metered provider.
///
/// An exhausted gate never waits: the caller gets a `RateLimited` error and the
/// fallback chain moves on to the next strategy.
#[derive(Clone)]
pub struct QuotaGate {
    provider_id: ProviderId,
    limiter: Arc<DirectRateLimiter>,
}

impl QuotaGate {
    pub fn new(provider_id: ProviderId, quota_window: Duration, quota_limit: u32) -> Self {
        Self {
            provider_id,
            limiter: Arc::new(RateLimiter::direct(quota_from_window(
                quota_window,
                quota_limit,
            ))),
        }
    }

    pub fn from_policy(policy: &ProviderPolicy) -> Self {
        Self::new(policy.provider_id, policy.quota_window, policy.quota_limit)
    }

    pub fn try_acquire(&self) -> Result<(), FetchError> {
        self.limiter.check().map_err(|_| {
            FetchError::rate_limited(format!(
                "{} request budget exhausted",
                self.provider_id
            ))
        })
    }
}

fn quota_from_window(quota_window: Duration, quota_limit: u32) -> Quota {
    let burst = NonZeroU32::new(quota_limit).unwrap_or(NonZeroU32::MIN);

    let seconds_per_cell = (quota_window.as_secs_f64() / f64::from(burst.get())).max(0.001);
    let period = Duration::from_secs_f64(seconds_per_cell);

    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(burst))
        .allow_burst(burst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider_client::FetchErrorKind;

    #[test]
    fn rejects_once_budget_is_spent() {
        let gate = QuotaGate::new(ProviderId::Alphavantage, Duration::from_secs(60), 2);

        assert!(gate.try_acquire().is_ok());
        assert!(gate.try_acquire().is_ok());

        let error = gate.try_acquire().expect_err("third request exceeds budget");
        assert_eq!(error.kind(), FetchErrorKind::RateLimited);
        assert!(error.message().contains("alphavantage"));
    }

    #[test]
    fn policy_budget_matches_free_tier() {
        let gate = QuotaGate::from_policy(&ProviderPolicy::alphavantage_default());

        let granted = (0..10).filter(|_| gate.try_acquire().is_ok()).count();
        assert_eq!(granted, 5);
    }

    #[test]
    fn zero_limit_still_admits_one_request() {
        let gate = QuotaGate::new(ProviderId::Newsapi, Duration::from_secs(60), 0);
        assert!(gate.try_acquire().is_ok());
    }
}
