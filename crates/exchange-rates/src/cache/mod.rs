//! Rate table caching.
//!
//! The fetcher only talks to the [`RateCache`] trait, so a deployment can keep
//! tables in process memory ([`InMemoryRateCache`]) or put them somewhere
//! shared without touching conversion or aggregation code.

mod memory;
mod traits;

pub use memory::InMemoryRateCache;
pub use traits::RateCache;
