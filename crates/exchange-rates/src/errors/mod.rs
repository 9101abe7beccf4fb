//! Error types for the exchange rate crate.

use thiserror::Error;

/// Errors that can occur while obtaining exchange rate tables.
#[derive(Error, Debug)]
pub enum ExchangeRateError {
    /// Every configured source failed for this base currency.
    /// Carries the message of the last underlying failure.
    #[error("Failed to fetch exchange rates for '{base}': {message}")]
    RateFetchFailed {
        /// Lowercase base currency that was requested
        base: String,
        /// Message of the last source error
        message: String,
    },

    /// A single source answered with an error or an unusable response.
    /// The fetcher moves on to the next source.
    #[error("Rate source error: {source_id} - {message}")]
    SourceError {
        /// The source that failed
        source_id: String,
        /// What went wrong
        message: String,
    },

    /// The document was fetched but does not have the expected shape.
    #[error("Invalid rate document for '{base}': {message}")]
    InvalidPayload {
        /// Base currency the document was requested for
        base: String,
        /// Description of the shape mismatch
        message: String,
    },
}
