//! Rate source trait definition.

use async_trait::async_trait;

use crate::errors::ExchangeRateError;
use crate::models::RateTable;

/// Trait for exchange rate sources.
///
/// Implement this trait to add a new place rate tables can come from.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use subtrack_exchange_rates::{ExchangeRateError, RateSource, RateTable};
///
/// struct MySource;
///
/// #[async_trait]
/// impl RateSource for MySource {
///     fn id(&self) -> &str {
///         "MY_SOURCE"
///     }
///
///     async fn fetch_table(&self, base: &str) -> Result<RateTable, ExchangeRateError> {
///         // ... call the upstream service
///     }
/// }
/// ```
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Identifier used in logs and error messages.
    fn id(&self) -> &str;

    /// Fetch the full rate table for `base`.
    ///
    /// `base` is already normalized to lowercase by the fetcher.
    async fn fetch_table(&self, base: &str) -> Result<RateTable, ExchangeRateError>;
}
