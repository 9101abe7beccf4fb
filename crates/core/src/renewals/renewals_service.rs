use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

use super::renewals_model::{CalendarOverview, UpcomingRenewal};
use super::renewals_traits::RenewalServiceTrait;
use super::{calendar_overview, upcoming_renewals};
use crate::errors::{Result, ValidationError};
use crate::subscriptions::SubscriptionRepositoryTrait;

/// Projects renewal dates for stored subscriptions. Amounts are reported in
/// each subscription's own currency, so no exchange rates are needed.
pub struct RenewalService {
    subscription_repository: Arc<dyn SubscriptionRepositoryTrait>,
}

impl RenewalService {
    pub fn new(subscription_repository: Arc<dyn SubscriptionRepositoryTrait>) -> Self {
        Self {
            subscription_repository,
        }
    }
}

impl RenewalServiceTrait for RenewalService {
    fn get_calendar_overview(
        &self,
        user_id: &str,
        year: i32,
        month: Option<u32>,
    ) -> Result<CalendarOverview> {
        if let Some(month) = month {
            if !(1..=12).contains(&month) {
                return Err(ValidationError::InvalidInput(format!(
                    "Month must be between 1 and 12, got {}",
                    month
                ))
                .into());
            }
        }

        let subscriptions = self.subscription_repository.list_valid_for_user(user_id)?;
        debug!(
            "Projecting {} subscription(s) for user {} into {}{}",
            subscriptions.len(),
            user_id,
            year,
            month.map(|m| format!("-{:02}", m)).unwrap_or_default()
        );
        Ok(calendar_overview(&subscriptions, year, month))
    }

    fn get_upcoming_renewals(
        &self,
        user_id: &str,
        today: NaiveDate,
        within_days: i64,
    ) -> Result<Vec<UpcomingRenewal>> {
        if within_days < 0 {
            return Err(ValidationError::InvalidInput(format!(
                "Look-ahead window must not be negative, got {} days",
                within_days
            ))
            .into());
        }

        let subscriptions = self.subscription_repository.list_valid_for_user(user_id)?;
        Ok(upcoming_renewals(&subscriptions, today, within_days))
    }
}
