use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Provenance tag carried by every canonical record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Alphavantage,
    Yahoo,
    Coingecko,
    Exchangerate,
    Fred,
    Newsapi,
    Rss,
    Mock,
}

impl ProviderId {
    pub const ALL: [Self; 8] = [
        Self::Alphavantage,
        Self::Yahoo,
        Self::Coingecko,
        Self::Exchangerate,
        Self::Fred,
        Self::Newsapi,
        Self::Rss,
        Self::Mock,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alphavantage => "alphavantage",
            Self::Yahoo => "yahoo",
            Self::Coingecko => "coingecko",
            Self::Exchangerate => "exchangerate",
            Self::Fred => "fred",
            Self::Newsapi => "newsapi",
            Self::Rss => "rss",
            Self::Mock => "mock",
        }
    }

    /// True for data produced by the bundled generator rather than a live provider.
    pub const fn is_synthetic(self) -> bool {
        matches!(self, Self::Mock)
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|provider| provider.as_str() == normalized)
            .ok_or(ValidationError::InvalidSource { value: normalized })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(" CoinGecko ".parse::<ProviderId>(), Ok(ProviderId::Coingecko));
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "polygon".parse::<ProviderId>().expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidSource { .. }));
    }

    #[test]
    fn only_mock_is_synthetic() {
        let synthetic = ProviderId::ALL
            .into_iter()
            .filter(|provider| provider.is_synthetic())
            .collect::<Vec<_>>();
        assert_eq!(synthetic, vec![ProviderId::Mock]);
    }
}
