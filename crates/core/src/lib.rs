//! Subtrack Core - subscription spend analytics.
//!
//! This crate turns a user's subscriptions into currency-normalized spending
//! figures: monthly and yearly bucketed series, category breakdowns, and
//! projected renewal dates. Persistence is behind
//! [`subscriptions::SubscriptionRepositoryTrait`]; exchange rates come from the
//! `subtrack-exchange-rates` crate.

pub mod analytics;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod normalization;
pub mod renewals;
pub mod subscriptions;

pub use subscriptions::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
