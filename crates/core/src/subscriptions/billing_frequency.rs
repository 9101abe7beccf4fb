use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a subscription is charged.
///
/// Unknown wire values are kept in [`BillingFrequency::Unrecognized`] instead
/// of failing to parse; every calculation has an explicit branch for them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillingFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    OneTime,
    /// User-defined cadence the engine cannot reason about.
    Custom,
    /// Any value outside the known set, kept verbatim.
    Unrecognized(String),
}

impl BillingFrequency {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
            Self::OneTime => "one-time",
            Self::Custom => "custom",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::OneTime)
    }

    /// Average monthly cost of one billing cycle costing `amount`, or `None`
    /// when the result does not fit in a `Decimal`.
    ///
    /// Weekly uses 52/12 here. The monthly buckets use a flat x4
    /// ([`Self::month_bucket_multiplier`]) and yearly proration uses x4.33 per
    /// month.
    pub fn to_monthly(&self, amount: Decimal) -> Option<Decimal> {
        let twelve = Decimal::from(12);
        match self {
            Self::Monthly => Some(amount),
            Self::Yearly => amount.checked_div(twelve),
            Self::Weekly => amount.checked_mul(Decimal::from(52))?.checked_div(twelve),
            Self::Daily => amount.checked_mul(Decimal::from(365))?.checked_div(twelve),
            Self::Quarterly => amount.checked_div(Decimal::from(3)),
            Self::OneTime | Self::Custom | Self::Unrecognized(_) => Some(amount),
        }
    }

    /// Per-month contribution factor used by the monthly bucket series.
    pub fn month_bucket_multiplier(&self) -> Decimal {
        match self {
            Self::Weekly => Decimal::from(4),
            Self::Monthly | Self::Yearly => Decimal::ONE,
            Self::Daily
            | Self::Quarterly
            | Self::OneTime
            | Self::Custom
            | Self::Unrecognized(_) => Decimal::ONE,
        }
    }

    /// Charges per year used by the yearly bucket series.
    pub fn yearly_multiplier(&self) -> Decimal {
        match self {
            Self::Weekly => Decimal::from(52),
            Self::Monthly => Decimal::from(12),
            Self::Yearly | Self::OneTime => Decimal::ONE,
            Self::Daily => Decimal::from(365),
            Self::Quarterly => Decimal::from(4),
            Self::Custom | Self::Unrecognized(_) => Decimal::from(12),
        }
    }
}

impl From<&str> for BillingFrequency {
    fn from(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "quarterly" => Self::Quarterly,
            "yearly" | "annual" | "annually" => Self::Yearly,
            "one-time" | "one_time" | "onetime" => Self::OneTime,
            "custom" => Self::Custom,
            _ => Self::Unrecognized(raw.to_string()),
        }
    }
}

impl From<String> for BillingFrequency {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<BillingFrequency> for String {
    fn from(frequency: BillingFrequency) -> Self {
        frequency.as_str().to_string()
    }
}

impl FromStr for BillingFrequency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for BillingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
