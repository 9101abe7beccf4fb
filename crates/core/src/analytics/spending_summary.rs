use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::analytics_model::{CategorySpend, CategorySummary, SpendingSummary, SubscriptionSpend};
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::fx::RateLookup;
use crate::normalization::monthly_cost;
use crate::subscriptions::Subscription;

fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        DISPLAY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// `part` as a percentage of `total`; zero when the total is zero.
fn share_percentage(part: Decimal, total: Decimal) -> Option<Decimal> {
    if total.is_zero() {
        return Some(Decimal::ZERO);
    }
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(total))
        .or_else(|| part.checked_div(total)?.checked_mul(Decimal::ONE_HUNDRED))
}

/// Monthly and yearly run-rate of the subscriptions active on `today`.
pub fn summarize(
    subscriptions: &[Subscription],
    lookup: &RateLookup,
    today: NaiveDate,
) -> Result<SpendingSummary> {
    let active: Vec<&Subscription> = subscriptions
        .iter()
        .filter(|sub| sub.is_active_on(today))
        .collect();

    let out_of_range = || Error::amount_out_of_range("spending summary");
    let twelve = Decimal::from(12);

    let mut monthly_total = Decimal::ZERO;
    let mut categories: Vec<(CategorySummary, Decimal, usize)> = Vec::new();
    let mut most_expensive: Option<(&Subscription, Decimal)> = None;

    for &sub in &active {
        let monthly = monthly_cost(lookup, sub)?;
        monthly_total = monthly_total.checked_add(monthly).ok_or_else(out_of_range)?;

        match categories
            .iter_mut()
            .find(|(category, _, _)| category.id == sub.category_id())
        {
            Some((_, amount, count)) => {
                *amount = amount.checked_add(monthly).ok_or_else(out_of_range)?;
                *count += 1;
            }
            None => categories.push((
                CategorySummary::from(&sub.category_or_uncategorized()),
                monthly,
                1,
            )),
        }

        if most_expensive.map_or(true, |(_, max)| monthly > max) {
            most_expensive = Some((sub, monthly));
        }
    }

    let yearly_total = monthly_total.checked_mul(twelve).ok_or_else(out_of_range)?;

    let mut by_category = categories
        .into_iter()
        .map(|(category, monthly, count)| {
            let yearly = monthly.checked_mul(twelve).ok_or_else(out_of_range)?;
            let percentage = share_percentage(yearly, yearly_total).ok_or_else(out_of_range)?;
            Ok(CategorySpend {
                category,
                monthly_amount: round_display(monthly),
                yearly_amount: round_display(yearly),
                percentage: round_display(percentage),
                subscription_count: count,
            })
        })
        .collect::<Result<Vec<CategorySpend>>>()?;
    by_category.sort_by(|a, b| b.yearly_amount.cmp(&a.yearly_amount));

    Ok(SpendingSummary {
        currency: lookup.target_currency(),
        monthly_total: round_display(monthly_total),
        yearly_total: round_display(yearly_total),
        active_subscriptions: active.len(),
        by_category,
        most_expensive: most_expensive.map(|(sub, monthly)| SubscriptionSpend {
            id: sub.id.clone(),
            name: sub.name.clone(),
            monthly_cost: round_display(monthly),
        }),
    })
}
