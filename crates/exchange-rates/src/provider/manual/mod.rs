//! Manually supplied exchange rates.
//!
//! Useful for offline deployments, for pinning rates in reporting, and as the
//! last entry of a source chain. Rates are stored exactly as given; no inverse
//! rates are derived.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::errors::ExchangeRateError;
use crate::models::{normalize_code, RateTable};
use crate::provider::RateSource;

const SOURCE_ID: &str = "MANUAL";

/// Source serving fixed, user-supplied tables.
#[derive(Clone, Debug, Default)]
pub struct ManualRateSource {
    tables: HashMap<String, HashMap<String, Decimal>>,
}

impl ManualRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the multiplier from `base` to `target`.
    pub fn with_rate(mut self, base: &str, target: &str, rate: Decimal) -> Self {
        self.tables
            .entry(normalize_code(base))
            .or_default()
            .insert(normalize_code(target), rate);
        self
    }

    /// Bases this source can answer for.
    pub fn bases(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

#[async_trait]
impl RateSource for ManualRateSource {
    fn id(&self) -> &str {
        SOURCE_ID
    }

    async fn fetch_table(&self, base: &str) -> Result<RateTable, ExchangeRateError> {
        let rates = self
            .tables
            .get(&normalize_code(base))
            .ok_or_else(|| ExchangeRateError::SourceError {
                source_id: SOURCE_ID.to_string(),
                message: format!("no manual rates for '{}'", base),
            })?;

        let date = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        Ok(RateTable::new(base, date, rates.clone()))
    }
}
