//! Analytics service traits.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::analytics_model::{MonthlyAnalytics, SpendingSummary, YearlyAnalytics};
use crate::errors::Result;

/// Spend analytics for one user, in the currency the caller asks for.
#[async_trait]
pub trait AnalyticsServiceTrait: Send + Sync {
    /// Twelve monthly buckets for `year`.
    async fn get_monthly_analytics(
        &self,
        user_id: &str,
        target_currency: &str,
        year: i32,
    ) -> Result<MonthlyAnalytics>;

    /// Yearly buckets from the earliest subscription through `today`'s year.
    async fn get_yearly_analytics(
        &self,
        user_id: &str,
        target_currency: &str,
        today: NaiveDate,
    ) -> Result<YearlyAnalytics>;

    /// Run-rate of the subscriptions active on `today`.
    async fn get_spending_summary(
        &self,
        user_id: &str,
        target_currency: &str,
        today: NaiveDate,
    ) -> Result<SpendingSummary>;
}
