use async_trait::async_trait;
use futures::future::{join_all, try_join_all};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;
use subtrack_exchange_rates::{normalize_code, ExchangeRateFetcher};

use super::fx_errors::FxError;
use super::fx_traits::CurrencyConverterTrait;
use super::rate_lookup::RateLookup;
use crate::errors::Result;

/// Converts amounts using live rate tables from an [`ExchangeRateFetcher`].
///
/// The source currency is always the table base: converting EUR to USD reads
/// the `eur` table's `usd` entry. No inverse or cross rates are derived.
#[derive(Clone)]
pub struct CurrencyConverter {
    fetcher: Arc<ExchangeRateFetcher>,
}

impl CurrencyConverter {
    pub fn new(fetcher: Arc<ExchangeRateFetcher>) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &Arc<ExchangeRateFetcher> {
        &self.fetcher
    }

    /// Multiplier from `from` to `to`, fetching the `from` table if needed.
    pub async fn rate(&self, from: &str, to: &str) -> std::result::Result<Decimal, FxError> {
        if same_currency(from, to) {
            return Ok(Decimal::ONE);
        }

        let table = self.fetcher.fetch_rates(from).await?;
        table
            .rate(to)
            .ok_or_else(|| FxError::rate_not_found(from, to))
    }
}

fn same_currency(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Distinct source currencies (case-insensitive) other than the target,
/// in first-seen order.
fn distinct_sources(from_currencies: &[String], to: &str) -> Vec<String> {
    let target = normalize_code(to);
    let mut seen = HashSet::new();
    from_currencies
        .iter()
        .map(|code| normalize_code(code))
        .filter(|code| *code != target && seen.insert(code.clone()))
        .collect()
}

#[async_trait]
impl CurrencyConverterTrait for CurrencyConverter {
    async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal> {
        if same_currency(from, to) {
            return Ok(amount);
        }

        let rate = self.rate(from, to).await?;
        amount
            .checked_mul(rate)
            .ok_or_else(|| FxError::amount_out_of_range(from, to).into())
    }

    async fn prepare_lookup(&self, from_currencies: &[String], to: &str) -> Result<RateLookup> {
        let sources = distinct_sources(from_currencies, to);
        log::debug!("Preparing {} rate(s) into {}", sources.len(), to);

        let rates = try_join_all(sources.iter().map(|from| self.rate(from, to))).await?;

        let mut lookup = RateLookup::new(to);
        for (from, rate) in sources.iter().zip(rates) {
            lookup.insert_rate(from, rate);
        }
        Ok(lookup)
    }

    async fn prepare_lookup_lenient(&self, from_currencies: &[String], to: &str) -> RateLookup {
        let sources = distinct_sources(from_currencies, to);
        let results = join_all(sources.iter().map(|from| self.rate(from, to))).await;

        let mut lookup = RateLookup::new(to);
        for (from, result) in sources.iter().zip(results) {
            match result {
                Ok(rate) => lookup.insert_rate(from, rate),
                Err(e) => {
                    log::warn!("No rate {} -> {}: {}", from, to, e);
                    lookup.insert_failure(from, e.to_string());
                }
            }
        }
        lookup
    }
}
