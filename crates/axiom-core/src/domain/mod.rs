//! # Domain Models
//!
//! Canonical record types produced by the normalizers.
//!
//! Every record is an immutable value built fresh on each successful fetch and
//! tagged with the [`ProviderId`](crate::ProviderId) that produced it.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Quote`] | Last price with change versus previous close |
//! | [`IndexQuote`] | Quote plus display label for headline indices |
//! | [`HistoryPoint`] | One close of a price history |
//! | [`ForexPair`] | Currency pair rate |
//! | [`CryptoAsset`] | Crypto market snapshot |
//! | [`MacroIndicator`] | Latest macroeconomic observation |
//! | [`NewsArticle`] | Headline with derived sentiment and category |
//! | [`Interpretation`] | Rule-based reading of a headline |
//! | [`Tagged`] | History or news list with its provider |
//! | [`AssetMatch`] | Asset search hit |
//! | [`Symbol`] | Validated ticker |
//! | [`HistoryRange`] | History look-back window |

mod models;
mod range;
mod symbol;

pub use models::{
    date_label, rate_places, round_price, round_to, AssetClass, AssetMatch, Category,
    CryptoAsset, ForexPair, HistoryPoint, IndexQuote, Interpretation, MacroIndicator,
    NewsArticle, Quote, Sentiment, Tagged,
};
pub use range::HistoryRange;
pub use symbol::Symbol;
