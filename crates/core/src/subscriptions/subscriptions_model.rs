use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::BillingFrequency;
use crate::constants::{UNCATEGORIZED_COLOR, UNCATEGORIZED_ID, UNCATEGORIZED_NAME};
use crate::errors::ValidationError;

/// User-defined grouping for subscriptions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Hex color, e.g. `#4f46e5`
    pub color: String,
}

impl Category {
    /// The synthetic bucket for subscriptions without a category. Never persisted.
    pub fn uncategorized() -> Self {
        Category {
            id: UNCATEGORIZED_ID.to_string(),
            user_id: String::new(),
            name: UNCATEGORIZED_NAME.to_string(),
            color: UNCATEGORIZED_COLOR.to_string(),
        }
    }
}

/// A recurring (or one-time) charge tracked for a user.
///
/// `cost` is the price of one billing cycle in `currency`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub cost: Decimal,
    pub currency: String,
    pub billing_frequency: BillingFrequency,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub category: Option<Category>,
}

impl Subscription {
    /// Check the record invariants: positive cost, ISO-like currency code,
    /// and an end date that is not before the start date.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cost <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveCost {
                id: self.id.clone(),
                cost: self.cost,
            });
        }

        let code = self.currency.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrencyCode(self.currency.clone()));
        }

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::EndBeforeStart {
                    id: self.id.clone(),
                    start: self.start_date,
                    end,
                });
            }
        }

        Ok(())
    }

    /// Key under which this subscription is aggregated.
    pub fn category_id(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.id.as_str())
            .unwrap_or(UNCATEGORIZED_ID)
    }

    /// The subscription's category, or the synthetic uncategorized one.
    pub fn category_or_uncategorized(&self) -> Category {
        self.category.clone().unwrap_or_else(Category::uncategorized)
    }

    /// Started on or before `date` and not ended before it.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && self.end_date.map_or(true, |end| end >= date)
    }

    /// Last calendar year the subscription touches, using `current_year`
    /// for subscriptions that are still running.
    pub fn last_active_year(&self, current_year: i32) -> i32 {
        self.end_date.map_or(current_year, |end| end.year())
    }
}
