use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of a conversion that is not allowed to fail.
///
/// On failure `amount` is the original, unconverted amount.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub success: bool,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResult {
    pub fn converted(amount: Decimal) -> Self {
        ConversionResult {
            success: true,
            amount,
            error: None,
        }
    }

    pub fn fallback(original: Decimal, error: impl ToString) -> Self {
        ConversionResult {
            success: false,
            amount: original,
            error: Some(error.to_string()),
        }
    }
}
