//! Exchange rate source abstractions and implementations.
//!
//! This module contains:
//! - The `RateSource` trait that all sources implement
//! - `CurrencyApiSource`: the static CDN-hosted JSON tables (primary and mirror)
//! - `ManualRateSource`: fixed, user-supplied tables
//!
//! Sources are tried by the fetcher in the order they were configured. A
//! source only knows how to obtain one table; fallback and caching live in
//! [`crate::fetcher`].

mod traits;

pub mod currency_api;
pub mod manual;

pub use traits::RateSource;
