//! Analytics service implementation.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error};
use std::sync::Arc;

use super::analytics_model::{MonthlyAnalytics, SpendingSummary, YearlyAnalytics};
use super::analytics_traits::AnalyticsServiceTrait;
use super::{aggregate_monthly, aggregate_yearly, summarize};
use crate::errors::Result;
use crate::fx::{CurrencyConverterTrait, RateLookup};
use crate::subscriptions::{Subscription, SubscriptionRepositoryTrait};

/// Loads a user's subscriptions, prepares every exchange rate they need in
/// one batch and hands both to the pure aggregators.
pub struct AnalyticsService {
    converter: Arc<dyn CurrencyConverterTrait>,
    subscription_repository: Arc<dyn SubscriptionRepositoryTrait>,
}

impl AnalyticsService {
    pub fn new(
        converter: Arc<dyn CurrencyConverterTrait>,
        subscription_repository: Arc<dyn SubscriptionRepositoryTrait>,
    ) -> Self {
        Self {
            converter,
            subscription_repository,
        }
    }

    /// Validated subscriptions plus a lookup covering all their currencies.
    async fn load_with_rates(
        &self,
        user_id: &str,
        target_currency: &str,
    ) -> Result<(Vec<Subscription>, RateLookup)> {
        let subscriptions = self.subscription_repository.list_valid_for_user(user_id)?;
        let currencies: Vec<String> = subscriptions
            .iter()
            .map(|sub| sub.currency.clone())
            .collect();

        let lookup = self
            .converter
            .prepare_lookup(&currencies, target_currency)
            .await
            .map_err(|e| {
                error!(
                    "Failed to prepare {} rates for user {}: {}",
                    target_currency, user_id, e
                );
                e
            })?;

        debug!(
            "Loaded {} subscription(s) for user {} in {}",
            subscriptions.len(),
            user_id,
            lookup.target_currency()
        );
        Ok((subscriptions, lookup))
    }
}

#[async_trait]
impl AnalyticsServiceTrait for AnalyticsService {
    async fn get_monthly_analytics(
        &self,
        user_id: &str,
        target_currency: &str,
        year: i32,
    ) -> Result<MonthlyAnalytics> {
        let (subscriptions, lookup) = self.load_with_rates(user_id, target_currency).await?;
        aggregate_monthly(&subscriptions, year, &lookup).map_err(|e| {
            error!("Monthly analytics failed for user {}: {}", user_id, e);
            e
        })
    }

    async fn get_yearly_analytics(
        &self,
        user_id: &str,
        target_currency: &str,
        today: NaiveDate,
    ) -> Result<YearlyAnalytics> {
        let (subscriptions, lookup) = self.load_with_rates(user_id, target_currency).await?;
        aggregate_yearly(&subscriptions, &lookup, today).map_err(|e| {
            error!("Yearly analytics failed for user {}: {}", user_id, e);
            e
        })
    }

    async fn get_spending_summary(
        &self,
        user_id: &str,
        target_currency: &str,
        today: NaiveDate,
    ) -> Result<SpendingSummary> {
        let (subscriptions, lookup) = self.load_with_rates(user_id, target_currency).await?;
        summarize(&subscriptions, &lookup, today)
    }
}
