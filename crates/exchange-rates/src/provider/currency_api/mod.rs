//! Static currency-api tables served from a CDN.
//!
//! The upstream publishes one JSON document per base currency, refreshed at
//! most daily:
//!
//! ```json
//! { "date": "2024-06-01", "eur": { "usd": 1.08, "gbp": 0.85, ... } }
//! ```
//!
//! The same documents are published on two hosts. Each host is configured as
//! its own source so the fetcher can fall back from one to the other.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::ExchangeRateError;
use crate::models::RateTable;
use crate::provider::RateSource;

/// Primary host (jsDelivr CDN).
pub const PRIMARY_URL_TEMPLATE: &str =
    "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/{base}.json";

/// Fallback host (Cloudflare Pages mirror).
pub const MIRROR_URL_TEMPLATE: &str =
    "https://latest.currency-api.pages.dev/v1/currencies/{base}.json";

/// Placeholder substituted with the lowercase base currency.
const BASE_PLACEHOLDER: &str = "{base}";

/// Currency-api source bound to one URL template.
pub struct CurrencyApiSource {
    client: Client,
    id: String,
    url_template: String,
}

impl CurrencyApiSource {
    /// Create a source for `url_template`, which must contain `{base}`.
    pub fn new(client: Client, id: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            client,
            id: id.into(),
            url_template: url_template.into(),
        }
    }

    /// Source for the primary CDN host.
    pub fn primary(client: Client) -> Self {
        Self::new(client, "CURRENCY_API_CDN", PRIMARY_URL_TEMPLATE)
    }

    /// Source for the mirror host.
    pub fn mirror(client: Client) -> Self {
        Self::new(client, "CURRENCY_API_MIRROR", MIRROR_URL_TEMPLATE)
    }

    fn url_for(&self, base: &str) -> String {
        self.url_template.replace(BASE_PLACEHOLDER, base)
    }

    fn source_error(&self, message: impl ToString) -> ExchangeRateError {
        ExchangeRateError::SourceError {
            source_id: self.id.clone(),
            message: message.to_string(),
        }
    }
}

/// Extract the `<base>` table out of a currency-api document.
///
/// Entries whose value is not a finite number representable as a decimal are
/// skipped rather than failing the whole table.
pub fn parse_rate_document(base: &str, document: &Value) -> Result<RateTable, ExchangeRateError> {
    let invalid = |message: &str| ExchangeRateError::InvalidPayload {
        base: base.to_string(),
        message: message.to_string(),
    };

    let date = document
        .get("date")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let entries = document
        .get(base)
        .and_then(Value::as_object)
        .ok_or_else(|| invalid(&format!("missing '{}' object", base)))?;

    let mut rates = HashMap::with_capacity(entries.len());
    for (code, value) in entries {
        match value.as_f64().map(Decimal::try_from) {
            Some(Ok(rate)) => {
                rates.insert(code.clone(), rate);
            }
            _ => log::debug!("Skipping unusable rate {}->{}: {}", base, code, value),
        }
    }

    Ok(RateTable::new(base, date, rates))
}

#[async_trait]
impl RateSource for CurrencyApiSource {
    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch_table(&self, base: &str) -> Result<RateTable, ExchangeRateError> {
        let url = self.url_for(base);
        log::debug!("Fetching {} rates from {}", base, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.source_error(e))?;

        let response = response
            .error_for_status()
            .map_err(|e| self.source_error(e))?;

        let document: Value = response.json().await.map_err(|e| self.source_error(e))?;

        parse_rate_document(base, &document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_url_substitution() {
        let source = CurrencyApiSource::primary(Client::new());
        assert_eq!(
            source.url_for("eur"),
            "https://cdn.jsdelivr.net/npm/@fawazahmed0/currency-api@latest/v1/currencies/eur.json"
        );

        let mirror = CurrencyApiSource::mirror(Client::new());
        assert_eq!(
            mirror.url_for("usd"),
            "https://latest.currency-api.pages.dev/v1/currencies/usd.json"
        );
        assert_eq!(mirror.id(), "CURRENCY_API_MIRROR");
    }

    #[test]
    fn test_parse_document() {
        let document = json!({
            "date": "2024-06-01",
            "eur": { "usd": 1.08, "gbp": 0.85, "jpy": 169.5 }
        });

        let table = parse_rate_document("eur", &document).unwrap();
        assert_eq!(table.base, "eur");
        assert_eq!(table.date, "2024-06-01");
        assert_eq!(table.rates.len(), 3);
        assert_eq!(table.rate("usd"), Some(dec!(1.08)));
        assert_eq!(table.rate("jpy"), Some(dec!(169.5)));
    }

    #[test]
    fn test_parse_skips_non_numeric_entries() {
        let document = json!({
            "date": "2024-06-01",
            "eur": { "usd": 1.08, "broken": "n/a", "nothing": null }
        });

        let table = parse_rate_document("eur", &document).unwrap();
        assert_eq!(table.rates.len(), 1);
        assert!(table.rate("broken").is_none());
    }

    #[test]
    fn test_parse_missing_base_object() {
        let document = json!({ "date": "2024-06-01", "usd": { "eur": 0.92 } });

        let err = parse_rate_document("eur", &document).unwrap_err();
        assert!(matches!(err, ExchangeRateError::InvalidPayload { .. }));
        assert!(err.to_string().contains("missing 'eur' object"));
    }
}
