//! FX (Foreign Exchange) module - conversion of subscription costs between currencies.

pub mod currency_converter;
mod fx_errors;
mod fx_model;
mod fx_traits;
mod rate_lookup;

pub use currency_converter::CurrencyConverter;
pub use fx_errors::FxError;
pub use fx_model::ConversionResult;
pub use fx_traits::CurrencyConverterTrait;
pub use rate_lookup::RateLookup;
