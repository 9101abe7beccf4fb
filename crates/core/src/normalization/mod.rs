//! Frequency normalization - a subscription's cost as an average monthly
//! amount in the user's currency.
//!
//! Conversion always happens first, then the per-frequency factor from
//! [`BillingFrequency::to_monthly`]. Unknown frequencies are treated as
//! already monthly.

use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::fx::{ConversionResult, CurrencyConverterTrait, RateLookup};
use crate::subscriptions::{BillingFrequency, Subscription};

fn apply_frequency(converted: Decimal, frequency: &BillingFrequency) -> Result<Decimal> {
    frequency.to_monthly(converted).ok_or_else(|| {
        Error::amount_out_of_range(format!("{} billed {} as monthly", converted, frequency))
    })
}

/// Monthly-equivalent of `cost` billed at `frequency`, converted to `target`.
pub async fn normalize_to_monthly(
    converter: &dyn CurrencyConverterTrait,
    cost: Decimal,
    currency: &str,
    frequency: &BillingFrequency,
    target: &str,
) -> Result<Decimal> {
    let converted = converter.convert(cost, currency, target).await?;
    apply_frequency(converted, frequency)
}

/// Synchronous [`normalize_to_monthly`] over pre-fetched rates.
pub fn normalize_with_lookup(
    lookup: &RateLookup,
    cost: Decimal,
    currency: &str,
    frequency: &BillingFrequency,
) -> Result<Decimal> {
    let converted = lookup.convert(cost, currency)?;
    apply_frequency(converted, frequency)
}

/// Never fails: when the rate is missing the unconverted cost is still
/// frequency-adjusted. Only an out-of-range result leaves `cost` untouched.
pub fn normalize_with_lookup_safe(
    lookup: &RateLookup,
    cost: Decimal,
    currency: &str,
    frequency: &BillingFrequency,
) -> ConversionResult {
    let converted = lookup.convert_safe(cost, currency);
    match apply_frequency(converted.amount, frequency) {
        Ok(amount) => ConversionResult { amount, ..converted },
        Err(e) => ConversionResult::fallback(cost, e),
    }
}

/// Monthly-equivalent cost of `subscription` in the lookup's target currency.
pub fn monthly_cost(lookup: &RateLookup, subscription: &Subscription) -> Result<Decimal> {
    normalize_with_lookup(
        lookup,
        subscription.cost,
        &subscription.currency,
        &subscription.billing_frequency,
    )
}
