//! Exchange rate models
//!
//! - `rate_table` - One base currency's multipliers to every other currency

mod rate_table;

pub use rate_table::RateTable;

/// Normalizes a currency code for table lookups (`" EUR "` -> `"eur"`).
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}
