//! Core error types for the Subtrack engine.
//!
//! Persistence lives outside this crate, so repository failures are carried
//! as strings produced by the storage layer.

use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl Error {
    /// An amount grew past what `Decimal` can represent.
    pub(crate) fn amount_out_of_range(context: impl std::fmt::Display) -> Self {
        Error::Validation(ValidationError::AmountOutOfRange(context.to_string()))
    }
}

/// Validation errors for subscription records and query parameters.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Subscription {id}: end date {end} is before start date {start}")]
    EndBeforeStart {
        id: String,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("Subscription {id}: cost must be positive, got {cost}")]
    NonPositiveCost { id: String, cost: rust_decimal::Decimal },

    #[error("Invalid currency code: '{0}'")]
    InvalidCurrencyCode(String),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),
}
