use super::fx_model::ConversionResult;
use super::rate_lookup::RateLookup;
use crate::errors::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait defining the contract for currency conversion.
#[async_trait]
pub trait CurrencyConverterTrait: Send + Sync {
    /// Convert `amount` from `from` to `to`.
    ///
    /// Equal codes (ignoring case) return `amount` without fetching anything.
    async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal>;

    /// Like [`convert`](Self::convert) but never fails; on error the original
    /// amount comes back with `success == false`.
    async fn convert_safe(&self, amount: Decimal, from: &str, to: &str) -> ConversionResult {
        match self.convert(amount, from, to).await {
            Ok(converted) => ConversionResult::converted(converted),
            Err(e) => {
                log::warn!("Falling back to unconverted {} {}: {}", amount, from, e);
                ConversionResult::fallback(amount, e)
            }
        }
    }

    /// Fetch every distinct source currency's rate to `to` up front, one
    /// request per currency, so later conversions are synchronous.
    /// Fails on the first currency that cannot be resolved.
    async fn prepare_lookup(&self, from_currencies: &[String], to: &str) -> Result<RateLookup>;

    /// Like [`prepare_lookup`](Self::prepare_lookup) but keeps whatever could
    /// be resolved and records the failures in the lookup.
    async fn prepare_lookup_lenient(&self, from_currencies: &[String], to: &str) -> RateLookup;
}
