use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 20;

/// Uppercase ticker in one of the vendor conventions the service deals in:
/// plain tickers (`AAPL`), index carets (`^GSPC`), futures (`GC=F`), exchange
/// suffixes (`005930.KS`) and crypto pairs (`BTC-USD`).
///
/// Symbols are embedded in cache keys and upstream URLs, so parsing is the
/// only way to obtain one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trims, uppercases, and checks the character set.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();

        let mut chars = normalized.chars();
        let first = chars.next().ok_or(ValidationError::EmptySymbol)?;
        if !is_leading(first) {
            return Err(ValidationError::SymbolInvalidStart { ch: first });
        }
        if let Some((offset, ch)) = chars.enumerate().find(|(_, ch)| !is_trailing(*ch)) {
            return Err(ValidationError::SymbolInvalidChar {
                ch,
                index: offset + 1,
            });
        }

        let len = normalized.len();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Index tickers such as `^GSPC`.
    pub fn is_index(&self) -> bool {
        self.0.starts_with('^')
    }
}

fn is_leading(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '^'
}

fn is_trailing(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '=')
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}
