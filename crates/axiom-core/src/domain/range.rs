use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Look-back window for price history requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryRange {
    #[serde(rename = "5d")]
    FiveDays,
    #[default]
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl HistoryRange {
    pub const ALL: [Self; 5] = [
        Self::FiveDays,
        Self::OneMonth,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FiveDays => "5d",
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
        }
    }

    /// Sampling interval requested from the chart endpoint for this window.
    pub const fn chart_interval(self) -> &'static str {
        match self {
            Self::FiveDays => "1h",
            Self::OneMonth | Self::ThreeMonths => "1d",
            Self::SixMonths | Self::OneYear => "1wk",
        }
    }
}

impl Display for HistoryRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|range| range.as_str() == normalized)
            .ok_or(ValidationError::InvalidRange { value: normalized })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_range() {
        let range = HistoryRange::from_str("3MO").expect("must parse");
        assert_eq!(range, HistoryRange::ThreeMonths);
        assert_eq!(range.chart_interval(), "1d");
    }

    #[test]
    fn rejects_invalid_range() {
        let err = HistoryRange::from_str("2y").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidRange { .. }));
    }

    #[test]
    fn default_is_one_month() {
        assert_eq!(HistoryRange::default().as_str(), "1mo");
    }
}
