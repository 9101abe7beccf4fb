//! Exchange rate fetcher.
//!
//! Resolves a base currency to its rate table:
//! 1. Normalize the base to lowercase
//! 2. Return the cached table if it is younger than the TTL
//! 3. Otherwise try each source in order until one succeeds
//! 4. Replace the cache entry with the new table
//!
//! There is no retry beyond the source list and no backoff. Concurrent misses
//! for the same base may each fetch; the last write wins.

use chrono::{Duration, Utc};
use reqwest::Client;
use std::sync::Arc;

use crate::cache::RateCache;
use crate::config::{ExchangeRateConfig, DEFAULT_CACHE_TTL};
use crate::errors::ExchangeRateError;
use crate::models::{normalize_code, RateTable};
use crate::provider::currency_api::{
    CurrencyApiSource, MIRROR_URL_TEMPLATE, PRIMARY_URL_TEMPLATE,
};
use crate::provider::RateSource;

/// Fetches rate tables through an ordered source chain and a shared cache.
#[derive(Clone)]
pub struct ExchangeRateFetcher {
    sources: Vec<Arc<dyn RateSource>>,
    cache: Arc<dyn RateCache>,
    ttl: Duration,
}

impl ExchangeRateFetcher {
    /// Create a fetcher with the default 24 hour TTL.
    pub fn new(sources: Vec<Arc<dyn RateSource>>, cache: Arc<dyn RateCache>) -> Self {
        Self {
            sources,
            cache,
            ttl: to_chrono(DEFAULT_CACHE_TTL),
        }
    }

    /// Build the currency-api source chain described by `config`.
    pub fn from_config(config: &ExchangeRateConfig, cache: Arc<dyn RateCache>) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        let sources = config
            .source_urls
            .iter()
            .enumerate()
            .map(|(index, template)| {
                let source = match template.as_str() {
                    PRIMARY_URL_TEMPLATE => CurrencyApiSource::primary(client.clone()),
                    MIRROR_URL_TEMPLATE => CurrencyApiSource::mirror(client.clone()),
                    _ => CurrencyApiSource::new(
                        client.clone(),
                        format!("RATE_SOURCE_{}", index + 1),
                        template.clone(),
                    ),
                };
                Arc::new(source) as Arc<dyn RateSource>
            })
            .collect();

        Self::new(sources, cache).with_ttl(config.cache_ttl)
    }

    /// Override how long a cached table stays valid.
    pub fn with_ttl(mut self, ttl: std::time::Duration) -> Self {
        self.ttl = to_chrono(ttl);
        self
    }

    pub fn cache(&self) -> &Arc<dyn RateCache> {
        &self.cache
    }

    /// Evict every cached table.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Rate table for `base`, from cache when fresh, otherwise from the
    /// first source that answers.
    pub async fn fetch_rates(&self, base: &str) -> Result<Arc<RateTable>, ExchangeRateError> {
        let base = normalize_code(base);

        if let Some(table) = self.cache.get_valid(&base, self.ttl, Utc::now()) {
            log::debug!("Rate cache hit for '{}'", base);
            return Ok(table);
        }

        let mut last_error: Option<ExchangeRateError> = None;

        for source in &self.sources {
            match source.fetch_table(&base).await {
                Ok(table) => {
                    log::debug!(
                        "Fetched {} rates for '{}' from {}",
                        table.rates.len(),
                        base,
                        source.id()
                    );
                    let table = Arc::new(table);
                    self.cache.set(table.clone());
                    return Ok(table);
                }
                Err(e) => {
                    log::warn!("Rate source {} failed for '{}': {}", source.id(), base, e);
                    last_error = Some(e);
                }
            }
        }

        let message = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no rate sources configured".to_string());

        Err(ExchangeRateError::RateFetchFailed { base, message })
    }
}

fn to_chrono(ttl: std::time::Duration) -> Duration {
    Duration::from_std(ttl).unwrap_or_else(|_| Duration::hours(24))
}
