//! Spend analytics.
//!
//! Pure aggregators over a user's subscriptions (monthly buckets for one
//! year, yearly buckets across the subscriptions' lifetimes, and a spending
//! summary) plus the service that loads records and prepares exchange rates
//! for them.

mod analytics_model;
mod analytics_service;
mod analytics_traits;
mod monthly_aggregator;
mod spending_summary;
mod yearly_aggregator;

pub use analytics_model::*;
pub use analytics_service::*;
pub use analytics_traits::*;
pub use monthly_aggregator::aggregate_monthly;
pub use spending_summary::summarize;
pub use yearly_aggregator::aggregate_yearly;

use rust_decimal::{Decimal, RoundingStrategy};


/// Bucket values are whole units of the target currency, half away from zero.
pub(crate) fn round_to_integer(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
