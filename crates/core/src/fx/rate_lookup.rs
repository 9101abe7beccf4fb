use rust_decimal::Decimal;
use std::collections::HashMap;
use subtrack_exchange_rates::normalize_code;

use super::fx_errors::FxError;
use super::fx_model::ConversionResult;

/// Pre-fetched rates from several source currencies into one target.
///
/// Built once per request by
/// [`CurrencyConverterTrait::prepare_lookup`](super::CurrencyConverterTrait::prepare_lookup)
/// and then used synchronously for every subscription.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RateLookup {
    target: String,
    rates: HashMap<String, Decimal>,
    failures: HashMap<String, String>,
}

impl RateLookup {
    pub fn new(target: &str) -> Self {
        RateLookup {
            target: normalize_code(target),
            rates: HashMap::new(),
            failures: HashMap::new(),
        }
    }

    /// Record the multiplier from `from` into the target currency.
    pub fn with_rate(mut self, from: &str, rate: Decimal) -> Self {
        self.insert_rate(from, rate);
        self
    }

    pub(crate) fn insert_rate(&mut self, from: &str, rate: Decimal) {
        let key = normalize_code(from);
        self.failures.remove(&key);
        self.rates.insert(key, rate);
    }

    pub(crate) fn insert_failure(&mut self, from: &str, message: String) {
        self.failures.insert(normalize_code(from), message);
    }

    /// Target currency, uppercase.
    pub fn target_currency(&self) -> String {
        self.target.to_uppercase()
    }

    /// Source currencies that could not be resolved, with the reason.
    pub fn failures(&self) -> &HashMap<String, String> {
        &self.failures
    }

    /// Multiplier from `from` into the target; one for the target itself.
    pub fn rate(&self, from: &str) -> Option<Decimal> {
        let key = normalize_code(from);
        if key == self.target {
            return Some(Decimal::ONE);
        }
        self.rates.get(&key).copied()
    }

    pub fn convert(&self, amount: Decimal, from: &str) -> Result<Decimal, FxError> {
        let rate = self
            .rate(from)
            .ok_or_else(|| FxError::rate_not_found(from, &self.target))?;
        amount
            .checked_mul(rate)
            .ok_or_else(|| FxError::amount_out_of_range(from, &self.target))
    }

    /// Never fails; unresolved currencies keep their original amount.
    pub fn convert_safe(&self, amount: Decimal, from: &str) -> ConversionResult {
        match self.convert(amount, from) {
            Ok(converted) => ConversionResult::converted(converted),
            Err(e) => {
                let reason = self
                    .failures
                    .get(&normalize_code(from))
                    .cloned()
                    .unwrap_or_else(|| e.to_string());
                ConversionResult::fallback(amount, reason)
            }
        }
    }
}
