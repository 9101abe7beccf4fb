use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::analytics_model::{CategorySummary, YearlyAnalytics, YearlyDataPoint};
use crate::errors::{Error, Result};
use crate::fx::RateLookup;
use crate::subscriptions::{BillingFrequency, Subscription};

/// Weeks per month used when prorating weekly subscriptions over part of a year.
fn weekly_proration_factor() -> Decimal {
    Decimal::new(433, 2)
}

/// One bucket per calendar year from each subscription's start year through
/// its end year (or `today`'s year while it is still running).
///
/// Years that a subscription only partially covers are prorated by whole
/// months, counting the start and end months as fully active.
pub fn aggregate_yearly(
    subscriptions: &[Subscription],
    lookup: &RateLookup,
    today: NaiveDate,
) -> Result<YearlyAnalytics> {
    let current_year = today.year();
    log::debug!(
        "Aggregating {} subscription(s) into years up to {} ({})",
        subscriptions.len(),
        current_year,
        lookup.target_currency()
    );

    let mut buckets: BTreeMap<i32, YearlyDataPoint> = BTreeMap::new();

    for sub in subscriptions {
        if sub.end_date.is_some_and(|end| end < sub.start_date) {
            log::debug!("Skipping subscription {}: ends before it starts", sub.id);
            continue;
        }

        let start_year = sub.start_date.year();
        // A subscription starting after this year still gets its start bucket.
        let last_year = sub.last_active_year(current_year).max(start_year);
        for year in start_year..=last_year {
            buckets
                .entry(year)
                .or_insert_with(|| YearlyDataPoint::new(year));
        }

        let out_of_range = || Error::amount_out_of_range(format!("subscription {}", sub.id));
        let converted = lookup.convert(sub.cost, &sub.currency)?;
        let nominal = converted
            .checked_mul(sub.billing_frequency.yearly_multiplier())
            .ok_or_else(out_of_range)?;

        if sub.billing_frequency == BillingFrequency::OneTime {
            if let Some(bucket) = buckets.get_mut(&start_year) {
                bucket.add(sub.category_id(), nominal)?;
            }
            continue;
        }

        for year in start_year..=last_year {
            let amount = prorated_amount(sub, year, converted, nominal).ok_or_else(out_of_range)?;
            if let Some(bucket) = buckets.get_mut(&year) {
                bucket.add(sub.category_id(), amount)?;
            }
        }
    }

    let yearly_data = buckets
        .into_values()
        .map(|mut point| {
            point.round();
            point
        })
        .collect();

    Ok(YearlyAnalytics {
        yearly_data,
        categories: CategorySummary::collect(subscriptions),
        currency: lookup.target_currency(),
    })
}

/// Share of a recurring subscription's cost that falls into `year`, or
/// `None` on overflow. The end date must not precede the start date.
fn prorated_amount(
    sub: &Subscription,
    year: i32,
    converted: Decimal,
    nominal: Decimal,
) -> Option<Decimal> {
    let start = sub.start_date;
    let ends_here = sub.end_date.filter(|end| end.year() == year);

    let active_months = match (start.year() == year, ends_here) {
        (true, Some(end)) => end.month0().checked_sub(start.month0())? + 1,
        (true, None) => 12 - start.month0(),
        (false, Some(end)) => end.month0() + 1,
        (false, None) => return Some(nominal),
    };
    let months = Decimal::from(active_months);

    match sub.billing_frequency {
        BillingFrequency::Weekly => converted
            .checked_mul(months)?
            .checked_mul(weekly_proration_factor()),
        _ => nominal.checked_mul(months)?.checked_div(Decimal::from(12)),
    }
}
