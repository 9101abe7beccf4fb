//! Subtrack Exchange Rates Crate
//!
//! Fetches per-base-currency exchange rate tables and keeps them in a
//! caller-owned cache.
//!
//! # Overview
//!
//! - Ordered list of rate sources (primary CDN, then mirror) tried until one
//!   answers
//! - Full-table replacement in the cache on every successful fetch
//! - Cache entries expire after a configurable TTL (24 hours by default)
//!
//! # Architecture
//!
//! ```text
//! +--------------------+     +------------------+
//! | ExchangeRateFetcher| --> |    RateCache     |  (get / set / has_valid / clear)
//! +--------------------+     +------------------+
//!           |
//!           | cache miss or stale
//!           v
//! +--------------------+
//! |  RateSource chain  |  (CurrencyApiSource, ManualRateSource, ...)
//! +--------------------+
//!           |
//!           v
//! +--------------------+
//! |     RateTable      |  (base, date, rates, fetched_at)
//! +--------------------+
//! ```

pub mod cache;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod provider;

pub use cache::{InMemoryRateCache, RateCache};
pub use config::ExchangeRateConfig;
pub use errors::ExchangeRateError;
pub use fetcher::ExchangeRateFetcher;
pub use models::{normalize_code, RateTable};
pub use provider::currency_api::CurrencyApiSource;
pub use provider::manual::ManualRateSource;
pub use provider::RateSource;
