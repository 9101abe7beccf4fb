//! Property-based integration tests for spend aggregation and renewal
//! projection.
//!
//! These tests check invariants that must hold for any set of valid
//! subscriptions, using the `proptest` crate for random test case generation.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use subtrack_core::analytics::{aggregate_monthly, aggregate_yearly, summarize};
use subtrack_core::fx::RateLookup;
use subtrack_core::renewals::{next_occurrences, next_renewal_date};
use subtrack_core::{BillingFrequency, Subscription};

// =============================================================================
// Generators
// =============================================================================

fn arb_frequency() -> impl Strategy<Value = BillingFrequency> {
    prop_oneof![
        Just(BillingFrequency::Daily),
        Just(BillingFrequency::Weekly),
        Just(BillingFrequency::Monthly),
        Just(BillingFrequency::Quarterly),
        Just(BillingFrequency::Yearly),
        Just(BillingFrequency::OneTime),
        Just(BillingFrequency::Custom),
        "[a-z]{4,10}".prop_map(BillingFrequency::from),
    ]
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2018i32..2028, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        // Clamp to the last valid day of the month.
        (0..4)
            .find_map(|back| NaiveDate::from_ymd_opt(y, m, d - back))
            .unwrap()
    })
}

/// Cost in cents, 0.01 to 999.99.
fn arb_cost() -> impl Strategy<Value = Decimal> {
    (1i64..100_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Any positive `Decimal`, up to `Decimal::MAX`.
fn arb_any_cost() -> impl Strategy<Value = Decimal> {
    (any::<u32>(), any::<u32>(), any::<u32>(), 0u32..=28)
        .prop_map(|(lo, mid, hi, scale)| Decimal::from_parts(lo, mid, hi, false, scale))
        .prop_filter("cost must be positive", |cost| *cost > Decimal::ZERO)
}

fn arb_subscription() -> impl Strategy<Value = Subscription> {
    (
        arb_cost(),
        prop_oneof![Just("USD"), Just("EUR"), Just("GBP")],
        arb_frequency(),
        arb_date(),
        proptest::option::of(0i64..2000), // days until end
        "[a-z]{3,12}",                    // name
    )
        .prop_map(|(cost, currency, frequency, start, end_days, name)| Subscription {
            id: format!("sub-{}", name),
            user_id: "user-1".to_string(),
            name,
            cost,
            currency: currency.to_string(),
            billing_frequency: frequency,
            start_date: start,
            end_date: end_days.map(|days| start + chrono::Duration::days(days)),
            category: None,
        })
}

fn arb_subscriptions() -> impl Strategy<Value = Vec<Subscription>> {
    proptest::collection::vec(arb_subscription(), 0..=12)
}

fn usd_lookup() -> RateLookup {
    RateLookup::new("USD")
        .with_rate("EUR", Decimal::new(108, 2))
        .with_rate("GBP", Decimal::new(127, 2))
}

fn is_integer(value: Decimal) -> bool {
    value == value.trunc()
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting into the lookup's own target never changes the amount.
    #[test]
    fn prop_identity_conversion(amount in arb_cost(), code in "[A-Za-z]{3}") {
        let lookup = RateLookup::new(&code);
        prop_assert_eq!(lookup.convert(amount, &code.to_uppercase()).unwrap(), amount);
    }

    /// Every monthly and yearly bucket value is a whole number.
    #[test]
    fn prop_bucket_values_are_integers(
        subs in arb_subscriptions(),
        year in 2018i32..2030,
        today in arb_date(),
    ) {
        let lookup = usd_lookup();

        let monthly = aggregate_monthly(&subs, year, &lookup).unwrap();
        prop_assert_eq!(monthly.monthly_data.len(), 12);
        for point in &monthly.monthly_data {
            prop_assert!(is_integer(point.total));
            prop_assert!(point.categories.values().all(|v| is_integer(*v)));
        }

        let yearly = aggregate_yearly(&subs, &lookup, today).unwrap();
        for point in &yearly.yearly_data {
            prop_assert!(is_integer(point.total));
            prop_assert!(point.categories.values().all(|v| is_integer(*v)));
        }
    }

    /// Year buckets are strictly ascending and unique.
    #[test]
    fn prop_yearly_buckets_ascending(subs in arb_subscriptions(), today in arb_date()) {
        let yearly = aggregate_yearly(&subs, &usd_lookup(), today).unwrap();
        let years: Vec<i32> = yearly.yearly_data.iter().map(|p| p.year).collect();
        prop_assert!(years.windows(2).all(|w| w[0] < w[1]));
    }

    /// A monthly subscription covering the whole year fills all twelve months
    /// with its cost, weekly ones with four times it.
    #[test]
    fn prop_full_year_coverage(cost in 1i64..500, year in 2019i32..2028, weekly in any::<bool>()) {
        let frequency = if weekly { BillingFrequency::Weekly } else { BillingFrequency::Monthly };
        let sub = Subscription {
            id: "sub-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Plan".to_string(),
            cost: Decimal::from(cost),
            currency: "USD".to_string(),
            billing_frequency: frequency.clone(),
            start_date: NaiveDate::from_ymd_opt(year - 1, 6, 1).unwrap(),
            end_date: None,
            category: None,
        };

        let monthly = aggregate_monthly(&[sub], year, &usd_lookup()).unwrap();
        let sum: Decimal = monthly.monthly_data.iter().map(|p| p.total).sum();
        let contribution = Decimal::from(cost) * frequency.month_bucket_multiplier();

        prop_assert_eq!(sum, contribution * Decimal::from(12));
    }

    /// Without categories everything lands in a single uncategorized bucket.
    #[test]
    fn prop_uncategorized_fallback(subs in arb_subscriptions(), today in arb_date()) {
        let lookup = usd_lookup();
        let monthly = aggregate_monthly(&subs, today.year(), &lookup).unwrap();
        let yearly = aggregate_yearly(&subs, &lookup, today).unwrap();

        if subs.is_empty() {
            prop_assert!(monthly.categories.is_empty());
        } else {
            prop_assert_eq!(monthly.categories.len(), 1);
            prop_assert_eq!(monthly.categories[0].id.as_str(), "uncategorized");
            prop_assert_eq!(&monthly.categories, &yearly.categories);
        }
    }

    /// Costs anywhere in the `Decimal` range produce a result or an error,
    /// never a panic.
    #[test]
    fn prop_large_costs_do_not_panic(
        subs in arb_subscriptions(),
        costs in proptest::collection::vec(arb_any_cost(), 12),
        today in arb_date(),
    ) {
        let subs: Vec<Subscription> = subs
            .into_iter()
            .zip(costs)
            .map(|(sub, cost)| Subscription { cost, ..sub })
            .collect();
        let lookup = usd_lookup();

        let _ = aggregate_monthly(&subs, today.year(), &lookup);
        let _ = aggregate_yearly(&subs, &lookup, today);
        let _ = summarize(&subs, &lookup, today);
    }

    /// Projected dates stay in the window, are ascending, and never pass
    /// the end date.
    #[test]
    fn prop_occurrences_within_window(
        sub in arb_subscription(),
        year in 2018i32..2030,
        month in proptest::option::of(1u32..=12),
    ) {
        let dates = next_occurrences(&sub, year, month);

        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        for date in &dates {
            prop_assert_eq!(date.year(), year);
            if let Some(month) = month {
                prop_assert_eq!(date.month(), month);
            }
            prop_assert!(*date >= sub.start_date);
            if let Some(end) = sub.end_date {
                prop_assert!(*date <= end);
            }
        }
    }

    /// Recurring monthly, yearly and weekly renewals are never in the past.
    #[test]
    fn prop_next_renewal_not_before_today(sub in arb_subscription(), today in arb_date()) {
        let next = next_renewal_date(&sub, today);
        match sub.billing_frequency {
            BillingFrequency::Monthly | BillingFrequency::Yearly | BillingFrequency::Weekly => {
                prop_assert!(next >= today);
                prop_assert!(next >= sub.start_date);
            }
            _ => prop_assert!(next == sub.start_date || next >= today),
        }
    }
}
