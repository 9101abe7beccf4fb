use subtrack_exchange_rates::ExchangeRateError;
use thiserror::Error;

/// Errors raised while converting amounts between currencies.
#[derive(Error, Debug)]
pub enum FxError {
    /// The source table was fetched but has no entry for the target.
    #[error("Exchange rate not found for {from}/{to}")]
    RateNotFound { from: String, to: String },

    /// The converted amount does not fit in a `Decimal`.
    #[error("Converted amount out of range for {from}/{to}")]
    AmountOutOfRange { from: String, to: String },

    /// The source table could not be fetched at all.
    #[error("Rate fetch failed: {0}")]
    Fetch(#[from] ExchangeRateError),
}

impl FxError {
    pub(crate) fn rate_not_found(from: &str, to: &str) -> Self {
        FxError::RateNotFound {
            from: from.trim().to_uppercase(),
            to: to.trim().to_uppercase(),
        }
    }

    pub(crate) fn amount_out_of_range(from: &str, to: &str) -> Self {
        FxError::AmountOutOfRange {
            from: from.trim().to_uppercase(),
            to: to.trim().to_uppercase(),
        }
    }
}
