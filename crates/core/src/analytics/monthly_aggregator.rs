use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

use super::analytics_model::{CategorySummary, MonthlyAnalytics, MonthlyDataPoint};
use crate::constants::MONTH_LABELS;
use crate::errors::{Error, Result, ValidationError};
use crate::fx::RateLookup;
use crate::subscriptions::{BillingFrequency, Subscription};

/// Twelve monthly buckets for `year` in the lookup's target currency.
///
/// Each subscription adds its per-month contribution to every month of its
/// active interval clipped to the year. One-time charges land in their start
/// month only. Weekly subscriptions count four charges per month.
pub fn aggregate_monthly(
    subscriptions: &[Subscription],
    year: i32,
    lookup: &RateLookup,
) -> Result<MonthlyAnalytics> {
    let (year_start, year_end) = year_bounds(year)?;
    log::debug!(
        "Aggregating {} subscription(s) into months of {} ({})",
        subscriptions.len(),
        year,
        lookup.target_currency()
    );

    let mut monthly_data: Vec<MonthlyDataPoint> = MONTH_LABELS
        .iter()
        .map(|label| MonthlyDataPoint::new(label))
        .collect();

    for sub in subscriptions {
        let effective_start = sub.start_date.max(year_start);
        let effective_end = sub.end_date.map_or(year_end, |end| end.min(year_end));
        if effective_start > effective_end {
            continue;
        }

        let months = match sub.billing_frequency {
            BillingFrequency::OneTime => {
                if sub.start_date.year() != year {
                    continue;
                }
                let month = sub.start_date.month0() as usize;
                month..=month
            }
            _ => effective_start.month0() as usize..=effective_end.month0() as usize,
        };

        let converted = lookup.convert(sub.cost, &sub.currency)?;
        let contribution = converted
            .checked_mul(sub.billing_frequency.month_bucket_multiplier())
            .ok_or_else(|| Error::amount_out_of_range(format!("subscription {}", sub.id)))?;

        for point in &mut monthly_data[months] {
            point.add(sub.category_id(), contribution)?;
        }
    }

    for point in &mut monthly_data {
        point.round();
    }

    Ok(MonthlyAnalytics {
        years: years_with_activity(subscriptions),
        monthly_data,
        categories: CategorySummary::collect(subscriptions),
    })
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(ValidationError::InvalidInput(format!("Year out of range: {}", year)).into()),
    }
}

/// Distinct years of every start and end date, ascending.
fn years_with_activity(subscriptions: &[Subscription]) -> Vec<i32> {
    subscriptions
        .iter()
        .flat_map(|sub| {
            std::iter::once(sub.start_date.year()).chain(sub.end_date.map(|end| end.year()))
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
