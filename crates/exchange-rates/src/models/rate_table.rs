use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::normalize_code;

/// Exchange rate table for a single base currency.
///
/// `rates` maps a lowercase currency code to the multiplier that converts one
/// unit of `base` into that currency.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    /// Lowercase base currency code
    pub base: String,

    /// Publication date reported by the source (`yyyy-MM-dd`)
    pub date: String,

    /// Target currency (lowercase) -> multiplier
    pub rates: HashMap<String, Decimal>,

    /// When this table was obtained
    pub fetched_at: DateTime<Utc>,
}

impl RateTable {
    /// Create a table stamped with the current time.
    pub fn new(base: &str, date: String, rates: HashMap<String, Decimal>) -> Self {
        Self {
            base: normalize_code(base),
            date,
            rates: rates
                .into_iter()
                .map(|(code, rate)| (normalize_code(&code), rate))
                .collect(),
            fetched_at: Utc::now(),
        }
    }

    /// Override the fetch timestamp.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }

    /// Multiplier from `base` to `target`, if the table has one.
    pub fn rate(&self, target: &str) -> Option<Decimal> {
        self.rates.get(&normalize_code(target)).copied()
    }

    /// True while the table is younger than `ttl` at `now`.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.fetched_at < ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> RateTable {
        let mut rates = HashMap::new();
        rates.insert("USD".to_string(), dec!(1.08));
        rates.insert("gbp".to_string(), dec!(0.85));
        RateTable::new("EUR", "2024-06-01".to_string(), rates)
    }

    #[test]
    fn test_codes_are_lowercased() {
        let table = table();
        assert_eq!(table.base, "eur");
        assert!(table.rates.contains_key("usd"));
        assert_eq!(table.rate("USD"), Some(dec!(1.08)));
        assert_eq!(table.rate(" Gbp "), Some(dec!(0.85)));
        assert_eq!(table.rate("jpy"), None);
    }

    #[test]
    fn test_freshness_window() {
        let now = Utc::now();
        let ttl = Duration::hours(24);

        let fresh = table().with_fetched_at(now - Duration::hours(23));
        assert!(fresh.is_fresh(ttl, now));

        let boundary = table().with_fetched_at(now - Duration::hours(24));
        assert!(!boundary.is_fresh(ttl, now));

        let stale = table().with_fetched_at(now - Duration::hours(30));
        assert!(!stale.is_fresh(ttl, now));
    }
}
