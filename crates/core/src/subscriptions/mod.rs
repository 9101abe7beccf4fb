//! Subscriptions module - records consumed by the analytics engine.

mod billing_frequency;
mod subscriptions_model;
mod subscriptions_traits;

pub use billing_frequency::BillingFrequency;
pub use subscriptions_model::{Category, Subscription};
pub use subscriptions_traits::SubscriptionRepositoryTrait;
