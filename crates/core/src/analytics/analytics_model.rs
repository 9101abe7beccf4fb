use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::round_to_integer;
use crate::errors::{Error, Result};
use crate::subscriptions::{Category, Subscription};

/// Adds `amount` to a bucket total and its category subtotal. Leaves both
/// untouched and returns `None` when either would overflow.
fn accumulate(
    total: &mut Decimal,
    categories: &mut BTreeMap<String, Decimal>,
    category_id: &str,
    amount: Decimal,
) -> Option<()> {
    let new_total = total.checked_add(amount)?;
    let subtotal = categories
        .get(category_id)
        .copied()
        .unwrap_or(Decimal::ZERO)
        .checked_add(amount)?;
    *total = new_total;
    categories.insert(category_id.to_string(), subtotal);
    Some(())
}

/// Category as it appears in chart legends.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl From<&Category> for CategorySummary {
    fn from(category: &Category) -> Self {
        CategorySummary {
            id: category.id.clone(),
            name: category.name.clone(),
            color: category.color.clone(),
        }
    }
}

impl CategorySummary {
    /// Distinct categories of `subscriptions` in first-seen order, with the
    /// uncategorized bucket standing in for subscriptions without one.
    pub fn collect(subscriptions: &[Subscription]) -> Vec<CategorySummary> {
        let mut seen = HashSet::new();
        subscriptions
            .iter()
            .filter(|sub| seen.insert(sub.category_id().to_string()))
            .map(|sub| CategorySummary::from(&sub.category_or_uncategorized()))
            .collect()
    }
}

/// One month of the monthly series. Category subtotals are flattened next to
/// `name` and `total`, keyed by category id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MonthlyDataPoint {
    pub name: String,
    pub total: Decimal,
    #[serde(flatten)]
    pub categories: BTreeMap<String, Decimal>,
}

impl MonthlyDataPoint {
    pub fn new(name: &str) -> Self {
        MonthlyDataPoint {
            name: name.to_string(),
            total: Decimal::ZERO,
            categories: BTreeMap::new(),
        }
    }

    pub(crate) fn add(&mut self, category_id: &str, amount: Decimal) -> Result<()> {
        accumulate(&mut self.total, &mut self.categories, category_id, amount)
            .ok_or_else(|| Error::amount_out_of_range(format!("{} total", self.name)))
    }

    pub(crate) fn round(&mut self) {
        self.total = round_to_integer(self.total);
        for value in self.categories.values_mut() {
            *value = round_to_integer(*value);
        }
    }
}

/// One calendar year of the yearly series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct YearlyDataPoint {
    pub year: i32,
    pub total: Decimal,
    #[serde(flatten)]
    pub categories: BTreeMap<String, Decimal>,
}

impl YearlyDataPoint {
    pub fn new(year: i32) -> Self {
        YearlyDataPoint {
            year,
            total: Decimal::ZERO,
            categories: BTreeMap::new(),
        }
    }

    pub(crate) fn add(&mut self, category_id: &str, amount: Decimal) -> Result<()> {
        accumulate(&mut self.total, &mut self.categories, category_id, amount)
            .ok_or_else(|| Error::amount_out_of_range(format!("{} total", self.year)))
    }

    pub(crate) fn round(&mut self) {
        self.total = round_to_integer(self.total);
        for value in self.categories.values_mut() {
            *value = round_to_integer(*value);
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAnalytics {
    /// Every year any subscription starts or ends in, ascending. Used by
    /// clients to offer a year picker.
    pub years: Vec<i32>,
    pub monthly_data: Vec<MonthlyDataPoint>,
    pub categories: Vec<CategorySummary>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct YearlyAnalytics {
    pub yearly_data: Vec<YearlyDataPoint>,
    pub categories: Vec<CategorySummary>,
    /// Target currency, uppercase.
    pub currency: String,
}

/// Spend attributed to one category in a [`SpendingSummary`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    #[serde(flatten)]
    pub category: CategorySummary,
    pub monthly_amount: Decimal,
    pub yearly_amount: Decimal,
    /// Share of the yearly total, 0-100.
    pub percentage: Decimal,
    pub subscription_count: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSpend {
    pub id: String,
    pub name: String,
    pub monthly_cost: Decimal,
}

/// Current run-rate of a user's active subscriptions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub currency: String,
    pub monthly_total: Decimal,
    pub yearly_total: Decimal,
    pub active_subscriptions: usize,
    /// Ordered by yearly amount, largest first.
    pub by_category: Vec<CategorySpend>,
    pub most_expensive: Option<SubscriptionSpend>,
}
