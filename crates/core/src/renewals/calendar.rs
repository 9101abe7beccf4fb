use chrono::{Days, NaiveDate};

use super::renewal_projector::{next_occurrences, next_renewal_date};
use super::renewals_model::{CalendarEntry, CalendarOverview, UpcomingRenewal};
use crate::subscriptions::Subscription;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Charge dates of every subscription in `year` (or one `month` of it).
/// Subscriptions without a date in the window are left out.
pub fn calendar_overview(
    subscriptions: &[Subscription],
    year: i32,
    month: Option<u32>,
) -> CalendarOverview {
    let overview = subscriptions
        .iter()
        .filter_map(|sub| {
            let dates = next_occurrences(sub, year, month);
            if dates.is_empty() {
                return None;
            }
            let category = sub.category_or_uncategorized();
            Some(CalendarEntry {
                id: sub.id.clone(),
                name: sub.name.clone(),
                billing_frequency: sub.billing_frequency.clone(),
                cost: sub.cost,
                currency: sub.currency.clone(),
                category: category.name,
                category_color: category.color,
                sub_dates: dates
                    .iter()
                    .map(|date| date.format(DATE_FORMAT).to_string())
                    .collect(),
            })
        })
        .collect();

    CalendarOverview { overview }
}

/// Next renewal of each subscription if it falls in
/// `[today, today + within_days]` and before the subscription ends.
/// Sorted by date, then name.
pub fn upcoming_renewals(
    subscriptions: &[Subscription],
    today: NaiveDate,
    within_days: i64,
) -> Vec<UpcomingRenewal> {
    let horizon = today
        .checked_add_days(Days::new(within_days.max(0).unsigned_abs()))
        .unwrap_or(NaiveDate::MAX);

    let mut upcoming: Vec<UpcomingRenewal> = subscriptions
        .iter()
        .filter_map(|sub| {
            let renewal_date = next_renewal_date(sub, today);
            if renewal_date < today || renewal_date > horizon {
                return None;
            }
            if sub.end_date.is_some_and(|end| renewal_date > end) {
                return None;
            }
            let category = sub.category_or_uncategorized();
            Some(UpcomingRenewal {
                subscription_id: sub.id.clone(),
                name: sub.name.clone(),
                cost: sub.cost,
                currency: sub.currency.clone(),
                billing_frequency: sub.billing_frequency.clone(),
                renewal_date,
                days_until: (renewal_date - today).num_days(),
                category_id: category.id,
                category_color: category.color,
            })
        })
        .collect();

    upcoming.sort_by(|a, b| {
        a.renewal_date
            .cmp(&b.renewal_date)
            .then_with(|| a.name.cmp(&b.name))
    });
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriptions::{BillingFrequency, Category};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sub(name: &str, frequency: &str, start: NaiveDate) -> Subscription {
        Subscription {
            id: format!("sub-{}", name.to_lowercase()),
            user_id: "user-1".to_string(),
            name: name.to_string(),
            cost: dec!(9.99),
            currency: "EUR".to_string(),
            billing_frequency: BillingFrequency::from(frequency),
            start_date: start,
            end_date: None,
            category: None,
        }
    }

    #[test]
    fn test_overview_payload_shape() {
        let mut music = sub("Music", "monthly", date(2024, 1, 5));
        music.category = Some(Category {
            id: "cat-music".to_string(),
            user_id: "user-1".to_string(),
            name: "Music".to_string(),
            color: "#22c55e".to_string(),
        });
        let subs = vec![music, sub("Domain", "yearly", date(2023, 9, 1))];

        let overview = calendar_overview(&subs, 2024, Some(3));
        let json = serde_json::to_value(&overview).unwrap();

        let entries = json["overview"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"], "sub-music");
        assert_eq!(entries[0]["billingFrequency"], "monthly");
        assert_eq!(entries[0]["category"], "Music");
        assert_eq!(entries[0]["category_color"], "#22c55e");
        assert_eq!(entries[0]["sub_dates"][0], "2024-03-05");
    }

    #[test]
    fn test_overview_uses_uncategorized_fallback() {
        let subs = vec![sub("Domain", "yearly", date(2023, 9, 1))];
        let overview = calendar_overview(&subs, 2024, None);

        assert_eq!(overview.overview.len(), 1);
        assert_eq!(overview.overview[0].category, "Uncategorized");
        assert_eq!(overview.overview[0].category_color, "#9ca3af");
        assert_eq!(overview.overview[0].sub_dates, vec!["2024-09-01".to_string()]);
    }

    #[test]
    fn test_upcoming_sorted_by_date_then_name() {
        let today = date(2024, 5, 20);
        let subs = vec![
            sub("Video", "monthly", date(2024, 1, 25)),
            sub("Audio", "monthly", date(2024, 2, 25)),
            sub("Gym", "weekly", date(2024, 5, 6)),
            sub("Domain", "yearly", date(2023, 9, 1)),
        ];

        let upcoming = upcoming_renewals(&subs, today, 7);

        let names: Vec<&str> = upcoming.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Gym", "Audio", "Video"]);
        assert_eq!(upcoming[0].renewal_date, date(2024, 5, 20));
        assert_eq!(upcoming[0].days_until, 0);
        assert_eq!(upcoming[1].days_until, 5);
        assert_eq!(upcoming[1].category_id, "uncategorized");
    }

    #[test]
    fn test_upcoming_skips_renewals_after_end() {
        let today = date(2024, 5, 20);
        let mut cancelled = sub("Cancelled", "monthly", date(2024, 1, 25));
        cancelled.end_date = Some(date(2024, 5, 22));

        assert!(upcoming_renewals(&[cancelled], today, 30).is_empty());
    }
}
