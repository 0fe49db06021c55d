use std::time::Duration;

use crate::ProviderId;

/// Request quota advertised by a provider's free tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPolicy {
    pub provider_id: ProviderId,
    pub quota_window: Duration,
    pub quota_limit: u32,
}

impl ProviderPolicy {
    pub fn alphavantage_default() -> Self {
        Self {
            provider_id: ProviderId::Alphavantage,
            quota_window: Duration::from_secs(60),
            quota_limit: 5,
        }
    }

    pub fn newsapi_default() -> Self {
        Self {
            provider_id: ProviderId::Newsapi,
            quota_window: Duration::from_secs(24 * 60 * 60),
            quota_limit: 100,
        }
    }

    /// Only metered providers have a policy; the rest are called unthrottled.
    pub fn default_for(provider_id: ProviderId) -> Option<Self> {
        match provider_id {
            ProviderId::Alphavantage => Some(Self::alphavantage_default()),
            ProviderId::Newsapi => Some(Self::newsapi_default()),
            ProviderId::Yahoo
            | ProviderId::Coingecko
            | ProviderId::Exchangerate
            | ProviderId::Fred
            | ProviderId::Rss
            | ProviderId::Mock => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphavantage_policy_matches_free_tier() {
        let policy = ProviderPolicy::alphavantage_default();

        assert_eq!(policy.provider_id, ProviderId::Alphavantage);
        assert_eq!(policy.quota_window, Duration::from_secs(60));
        assert_eq!(policy.quota_limit, 5);
    }

    #[test]
    fn unmetered_providers_have_no_policy() {
        assert!(ProviderPolicy::default_for(ProviderId::Yahoo).is_none());
        assert!(ProviderPolicy::default_for(ProviderId::Mock).is_none());
        assert_eq!(
            ProviderPolicy::default_for(ProviderId::Newsapi).map(|p| p.quota_limit),
            Some(100)
        );
    }
}
