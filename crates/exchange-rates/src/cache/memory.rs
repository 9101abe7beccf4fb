//! Process-local rate cache.
//!
//! Each process keeps its own tables; horizontally scaled deployments may see
//! slightly different rates per instance until their entries expire.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::RateCache;
use crate::models::{normalize_code, RateTable};

/// In-memory [`RateCache`] guarded by a mutex.
#[derive(Debug, Default)]
pub struct InMemoryRateCache {
    tables: Mutex<HashMap<String, Arc<RateTable>>>,
}

impl InMemoryRateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached bases.
    pub fn len(&self) -> usize {
        self.lock_tables().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_tables().is_empty()
    }

    /// Lock the table map, recovering from poison.
    ///
    /// A poisoned lock can at worst hold a table that is about to be replaced
    /// anyway, so the data is still usable.
    fn lock_tables(&self) -> MutexGuard<'_, HashMap<String, Arc<RateTable>>> {
        self.tables.lock().unwrap_or_else(|poisoned| {
            log::warn!("Rate cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl RateCache for InMemoryRateCache {
    fn get(&self, base: &str) -> Option<Arc<RateTable>> {
        self.lock_tables().get(&normalize_code(base)).cloned()
    }

    fn set(&self, table: Arc<RateTable>) {
        let key = normalize_code(&table.base);
        self.lock_tables().insert(key, table);
    }

    fn clear(&self) {
        self.lock_tables().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn table(base: &str, usd: rust_decimal::Decimal) -> Arc<RateTable> {
        let mut rates = HashMap::new();
        rates.insert("usd".to_string(), usd);
        Arc::new(RateTable::new(base, "2024-06-01".to_string(), rates))
    }

    #[test]
    fn test_set_replaces_whole_entry() {
        let cache = InMemoryRateCache::new();
        cache.set(table("eur", dec!(1.08)));

        let mut replacement = HashMap::new();
        replacement.insert("gbp".to_string(), dec!(0.85));
        cache.set(Arc::new(RateTable::new(
            "EUR",
            "2024-06-02".to_string(),
            replacement,
        )));

        let cached = cache.get("eur").unwrap();
        assert_eq!(cached.date, "2024-06-02");
        assert_eq!(cached.rate("usd"), None);
        assert_eq!(cached.rate("gbp"), Some(dec!(0.85)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_has_valid_respects_ttl() {
        let cache = InMemoryRateCache::new();
        let now = Utc::now();
        let ttl = Duration::hours(24);

        assert!(!cache.has_valid("eur", ttl, now));

        let stale = RateTable::new("eur", String::new(), HashMap::new())
            .with_fetched_at(now - Duration::hours(25));
        cache.set(Arc::new(stale));
        assert!(cache.get("EUR").is_some());
        assert!(!cache.has_valid("eur", ttl, now));

        cache.set(table("eur", dec!(1.08)));
        assert!(cache.has_valid("eur", ttl, now + Duration::minutes(1)));
    }

    #[test]
    fn test_clear_evicts_everything() {
        let cache = InMemoryRateCache::new();
        cache.set(table("eur", dec!(1.08)));
        cache.set(table("gbp", dec!(1.27)));
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("eur").is_none());
    }
}
