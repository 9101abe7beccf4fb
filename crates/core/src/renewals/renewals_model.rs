use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::subscriptions::BillingFrequency;

/// One subscription's charge dates in the requested window.
///
/// Field names follow the calendar payload clients already consume, which
/// mixes camelCase and snake_case.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalendarEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "billingFrequency")]
    pub billing_frequency: BillingFrequency,
    pub cost: Decimal,
    pub currency: String,
    /// Category name
    pub category: String,
    pub category_color: String,
    /// `yyyy-MM-dd`
    pub sub_dates: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CalendarOverview {
    pub overview: Vec<CalendarEntry>,
}

/// A renewal falling within the look-ahead window.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRenewal {
    pub subscription_id: String,
    pub name: String,
    pub cost: Decimal,
    pub currency: String,
    pub billing_frequency: BillingFrequency,
    pub renewal_date: NaiveDate,
    pub days_until: i64,
    pub category_id: String,
    pub category_color: String,
}
