use std::time::Duration;

use crate::provider::currency_api::{MIRROR_URL_TEMPLATE, PRIMARY_URL_TEMPLATE};

/// Default lifetime of a cached rate table.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default per-request timeout for rate sources.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for building an [`ExchangeRateFetcher`](crate::ExchangeRateFetcher).
#[derive(Clone, Debug, PartialEq)]
pub struct ExchangeRateConfig {
    /// URL templates tried in order; `{base}` is replaced by the lowercase base.
    pub source_urls: Vec<String>,
    pub cache_ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        Self {
            source_urls: vec![
                PRIMARY_URL_TEMPLATE.to_string(),
                MIRROR_URL_TEMPLATE.to_string(),
            ],
            cache_ttl: DEFAULT_CACHE_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ExchangeRateConfig {
    /// Read the configuration from the environment.
    ///
    /// - `SUBTRACK_FX_SOURCES`: comma separated URL templates
    /// - `SUBTRACK_FX_CACHE_TTL_SECS`: cache lifetime in seconds
    /// - `SUBTRACK_FX_TIMEOUT_MS`: request timeout in milliseconds
    ///
    /// Missing or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let source_urls: Vec<String> = lookup("SUBTRACK_FX_SOURCES")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cache_ttl = lookup("SUBTRACK_FX_CACHE_TTL_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let request_timeout = lookup("SUBTRACK_FX_TIMEOUT_MS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.request_timeout);

        Self {
            source_urls: if source_urls.is_empty() {
                defaults.source_urls
            } else {
                source_urls
            },
            cache_ttl,
            request_timeout,
        }
    }
}
