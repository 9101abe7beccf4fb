use chrono::{Datelike, Days, Months, NaiveDate};

use crate::subscriptions::{BillingFrequency, Subscription};

/// Inclusive date range a projection is restricted to.
#[derive(Clone, Copy, Debug)]
struct Window {
    first: NaiveDate,
    last: NaiveDate,
}

impl Window {
    fn new(year: i32, month: Option<u32>) -> Option<Self> {
        match month {
            Some(month) => {
                let first = NaiveDate::from_ymd_opt(year, month, 1)?;
                let last = if month == 12 {
                    NaiveDate::from_ymd_opt(year, 12, 31)?
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)?.pred_opt()?
                };
                Some(Window { first, last })
            }
            None => Some(Window {
                first: NaiveDate::from_ymd_opt(year, 1, 1)?,
                last: NaiveDate::from_ymd_opt(year, 12, 31)?,
            }),
        }
    }
}

/// `start` moved forward by `months` calendar months, clamping the day to the
/// end of shorter months. Always measured from `start`, so no drift builds up.
fn add_months(start: NaiveDate, months: i64) -> Option<NaiveDate> {
    let months = u32::try_from(months).ok()?;
    start.checked_add_months(Months::new(months))
}

/// Calendar months from `start`'s month to `date`'s month.
fn months_between(start: NaiveDate, date: NaiveDate) -> i64 {
    i64::from(date.year() - start.year()) * 12 + i64::from(date.month()) - i64::from(start.month())
}

/// Occurrences `start + n * step` months that fall inside the window.
fn month_stepped(start: NaiveDate, step: i64, window: Window) -> Vec<NaiveDate> {
    // Landing n*step months after start is always in that calendar month,
    // so whole-month offsets are enough to bound n.
    let first_offset = months_between(start, window.first);
    let last_offset = months_between(start, window.last);

    let first_n = if first_offset <= 0 {
        0
    } else {
        (first_offset + step - 1) / step
    };
    let last_n = last_offset.div_euclid(step);

    (first_n..=last_n)
        .filter_map(|n| add_months(start, n * step))
        .filter(|date| *date >= window.first && *date <= window.last)
        .collect()
}

/// Occurrences every `step_days` days from `start` inside the window.
fn day_stepped(start: NaiveDate, step_days: u64, window: Window) -> Vec<NaiveDate> {
    let first = if start >= window.first {
        Some(start)
    } else {
        let behind = (window.first - start).num_days().unsigned_abs();
        let steps = behind.div_ceil(step_days);
        start.checked_add_days(Days::new(steps * step_days))
    };

    let mut dates = Vec::new();
    let mut cursor = first;
    while let Some(date) = cursor.filter(|date| *date <= window.last) {
        dates.push(date);
        cursor = date.checked_add_days(Days::new(step_days));
    }
    dates
}

/// Charge dates of `subscription` in `year`, or in one month of it when
/// `month` (1-12) is given. Dates after the end date are dropped.
///
/// Custom and unrecognized frequencies have no projectable dates. An invalid
/// month yields no dates.
pub fn next_occurrences(
    subscription: &Subscription,
    year: i32,
    month: Option<u32>,
) -> Vec<NaiveDate> {
    let Some(window) = Window::new(year, month) else {
        return Vec::new();
    };
    let start = subscription.start_date;

    let dates = match subscription.billing_frequency {
        BillingFrequency::Monthly => month_stepped(start, 1, window),
        BillingFrequency::Quarterly => month_stepped(start, 3, window),
        BillingFrequency::Yearly => month_stepped(start, 12, window),
        BillingFrequency::Weekly => day_stepped(start, 7, window),
        BillingFrequency::Daily => day_stepped(start, 1, window),
        BillingFrequency::OneTime => {
            if start >= window.first && start <= window.last {
                vec![start]
            } else {
                Vec::new()
            }
        }
        BillingFrequency::Custom | BillingFrequency::Unrecognized(_) => Vec::new(),
    };

    match subscription.end_date {
        Some(end) => dates.into_iter().filter(|date| *date <= end).collect(),
        None => dates,
    }
}

/// First charge on or after `today`.
///
/// Only monthly, yearly and weekly subscriptions are advanced; every other
/// frequency reports its start date as is.
pub fn next_renewal_date(subscription: &Subscription, today: NaiveDate) -> NaiveDate {
    let start = subscription.start_date;
    if start >= today {
        return start;
    }

    match subscription.billing_frequency {
        BillingFrequency::Monthly => first_month_step_on_or_after(start, 1, today),
        BillingFrequency::Yearly => first_month_step_on_or_after(start, 12, today),
        BillingFrequency::Weekly => {
            let behind = (today - start).num_days().unsigned_abs();
            start
                .checked_add_days(Days::new(behind.div_ceil(7) * 7))
                .unwrap_or(start)
        }
        _ => start,
    }
}

fn first_month_step_on_or_after(start: NaiveDate, step: i64, today: NaiveDate) -> NaiveDate {
    let mut n = months_between(start, today).max(0) / step;
    loop {
        match add_months(start, n * step) {
            Some(date) if date >= today => return date,
            Some(_) => n += 1,
            None => return start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sub(frequency: &str, start: NaiveDate) -> Subscription {
        Subscription {
            id: "sub-1".to_string(),
            user_id: "user-1".to_string(),
            name: "Plan".to_string(),
            cost: dec!(10),
            currency: "USD".to_string(),
            billing_frequency: BillingFrequency::from(frequency),
            start_date: start,
            end_date: None,
            category: None,
        }
    }

    #[test]
    fn test_monthly_in_month_lands_once() {
        let s = sub("monthly", date(2024, 1, 15));
        assert_eq!(next_occurrences(&s, 2024, Some(4)), vec![date(2024, 4, 15)]);
        assert!(next_occurrences(&s, 2023, Some(12)).is_empty());
    }

    #[test]
    fn test_monthly_over_a_year() {
        let s = sub("monthly", date(2023, 11, 3));
        let dates = next_occurrences(&s, 2024, None);
        assert_eq!(dates.len(), 12);
        assert_eq!(dates[0], date(2024, 1, 3));
        assert_eq!(dates[11], date(2024, 12, 3));

        let dates = next_occurrences(&s, 2023, None);
        assert_eq!(dates, vec![date(2023, 11, 3), date(2023, 12, 3)]);
    }

    #[test]
    fn test_month_end_is_clamped_without_drift() {
        let s = sub("monthly", date(2024, 1, 31));
        assert_eq!(next_occurrences(&s, 2024, Some(2)), vec![date(2024, 2, 29)]);
        assert_eq!(next_occurrences(&s, 2024, Some(3)), vec![date(2024, 3, 31)]);
        assert_eq!(next_occurrences(&s, 2025, Some(2)), vec![date(2025, 2, 28)]);
    }

    #[test]
    fn test_weekly_steps_seven_days() {
        let s = sub("weekly", date(2024, 1, 1));
        let dates = next_occurrences(&s, 2024, Some(2));
        assert_eq!(
            dates,
            vec![
                date(2024, 2, 5),
                date(2024, 2, 12),
                date(2024, 2, 19),
                date(2024, 2, 26)
            ]
        );
        assert_eq!(next_occurrences(&s, 2024, None).len(), 53);
    }

    #[test]
    fn test_yearly_lands_on_anniversary() {
        let s = sub("yearly", date(2022, 6, 15));
        assert_eq!(next_occurrences(&s, 2024, None), vec![date(2024, 6, 15)]);
        assert_eq!(next_occurrences(&s, 2024, Some(6)), vec![date(2024, 6, 15)]);
        assert!(next_occurrences(&s, 2024, Some(7)).is_empty());
        assert!(next_occurrences(&s, 2021, None).is_empty());
    }

    #[test]
    fn test_quarterly_daily_and_one_time() {
        let quarterly = sub("quarterly", date(2024, 2, 10));
        assert_eq!(
            next_occurrences(&quarterly, 2024, None),
            vec![
                date(2024, 2, 10),
                date(2024, 5, 10),
                date(2024, 8, 10),
                date(2024, 11, 10)
            ]
        );
        assert!(next_occurrences(&quarterly, 2024, Some(3)).is_empty());

        let daily = sub("daily", date(2024, 2, 20));
        assert_eq!(next_occurrences(&daily, 2024, Some(2)).len(), 10);

        let once = sub("one-time", date(2024, 9, 9));
        assert_eq!(next_occurrences(&once, 2024, Some(9)), vec![date(2024, 9, 9)]);
        assert!(next_occurrences(&once, 2025, None).is_empty());
    }

    #[test]
    fn test_unprojectable_frequencies_and_bad_month() {
        assert!(next_occurrences(&sub("custom", date(2024, 1, 1)), 2024, None).is_empty());
        assert!(next_occurrences(&sub("biweekly", date(2024, 1, 1)), 2024, None).is_empty());
        assert!(next_occurrences(&sub("monthly", date(2024, 1, 1)), 2024, Some(13)).is_empty());
    }

    #[test]
    fn test_dates_after_end_are_dropped() {
        let mut s = sub("monthly", date(2024, 1, 10));
        s.end_date = Some(date(2024, 3, 10));
        assert_eq!(
            next_occurrences(&s, 2024, None),
            vec![date(2024, 1, 10), date(2024, 2, 10), date(2024, 3, 10)]
        );
    }

    #[test]
    fn test_next_renewal_advances_recurring() {
        let today = date(2024, 5, 20);
        assert_eq!(
            next_renewal_date(&sub("monthly", date(2024, 1, 15)), today),
            date(2024, 6, 15)
        );
        assert_eq!(
            next_renewal_date(&sub("monthly", date(2024, 1, 20)), today),
            date(2024, 5, 20)
        );
        assert_eq!(
            next_renewal_date(&sub("yearly", date(2021, 3, 1)), today),
            date(2025, 3, 1)
        );
        assert_eq!(
            next_renewal_date(&sub("weekly", date(2024, 5, 1)), today),
            date(2024, 5, 22)
        );
        assert_eq!(
            next_renewal_date(&sub("monthly", date(2024, 8, 1)), today),
            date(2024, 8, 1)
        );
    }

    #[test]
    fn test_projection_stops_at_last_representable_date() {
        let last_year = NaiveDate::MAX.year();
        let s = sub("daily", date(last_year, 12, 20));
        let dates = next_occurrences(&s, last_year, Some(12));
        assert_eq!(dates.first(), Some(&date(last_year, 12, 20)));
        assert_eq!(dates.last(), Some(&NaiveDate::MAX));
    }

    #[test]
    fn test_next_renewal_keeps_start_for_other_frequencies() {
        let today = date(2024, 5, 20);
        for frequency in ["daily", "quarterly", "one-time", "custom", "fortnightly"] {
            let s = sub(frequency, date(2023, 2, 2));
            assert_eq!(next_renewal_date(&s, today), date(2023, 2, 2));
        }
    }
}
