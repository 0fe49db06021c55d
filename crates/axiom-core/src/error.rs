use thiserror::Error;

/// Validation and contract errors exposed by `axiom-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter, digit, or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid history range '{value}', expected one of 5d, 1mo, 3mo, 6mo, 1y")]
    InvalidRange { value: String },
    #[error(
        "invalid source '{value}', expected one of alphavantage, yahoo, coingecko, \
         exchangerate, fred, newsapi, rss, mock"
    )]
    InvalidSource { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("anomaly threshold must be a finite, non-negative number: {value}")]
    InvalidThreshold { value: String },
}
