//! Renewal service traits.

use chrono::NaiveDate;

use super::renewals_model::{CalendarOverview, UpcomingRenewal};
use crate::errors::Result;

/// Renewal dates for one user's subscriptions.
pub trait RenewalServiceTrait: Send + Sync {
    /// Charge dates in `year`, or in `month` (1-12) of it when given.
    fn get_calendar_overview(
        &self,
        user_id: &str,
        year: i32,
        month: Option<u32>,
    ) -> Result<CalendarOverview>;

    /// Renewals due within `within_days` of `today`, soonest first.
    fn get_upcoming_renewals(
        &self,
        user_id: &str,
        today: NaiveDate,
        within_days: i64,
    ) -> Result<Vec<UpcomingRenewal>>;
}
