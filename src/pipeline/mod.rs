pub mod stage1_order;
pub mod stage2_bundle;
pub mod stage3_price;
pub mod stage4_quote;

use crate::catalog::LookupError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    /// Item skipped; never aborts a quote on its own.
    #[error(transparent)]
    NotFound(#[from] LookupError),
    /// Aborts the quote.
    #[error("configuration error: {0}")]
    Config(String),
    /// The request is refused; an empty quote is produced instead.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
