use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::models::RateTable;

/// Storage for fetched rate tables, keyed by lowercase base currency.
///
/// Implementations must replace an existing entry wholesale on `set`.
pub trait RateCache: Send + Sync {
    /// The cached table for `base`, fresh or not.
    fn get(&self, base: &str) -> Option<Arc<RateTable>>;

    /// Store `table` under its base, replacing any previous entry.
    fn set(&self, table: Arc<RateTable>);

    /// Drop every entry.
    fn clear(&self);

    /// True when an entry exists for `base` and is younger than `ttl`.
    fn has_valid(&self, base: &str, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.get_valid(base, ttl, now).is_some()
    }

    /// The cached table for `base` if it is younger than `ttl`.
    fn get_valid(&self, base: &str, ttl: Duration, now: DateTime<Utc>) -> Option<Arc<RateTable>> {
        self.get(base).filter(|table| table.is_fresh(ttl, now))
    }
}
