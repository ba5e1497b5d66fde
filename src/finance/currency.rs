//! Static-table currency conversion

use serde::{Deserialize, Serialize};

use super::{round2, round_to};

/// Illustrative rates, expressed as units of each currency per US dollar.
pub static SUPPORTED_CURRENCIES: [(&str, f64); 10] = [
    ("USD", 1.0),
    ("EUR", 0.93),
    ("GBP", 0.78),
    ("JPY", 151.2),
    ("CAD", 1.37),
    ("AUD", 1.52),
    ("CHF", 0.91),
    ("CNY", 7.25),
    ("INR", 83.4),
    ("MXN", 16.8),
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeQuote {
    pub from_currency: String,
    pub to_currency: String,
    pub exchange_rate: f64,
    pub amount: f64,
    pub converted_amount: f64,
}

/// Error payload returned instead of failing when a code is not in the table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnsupportedCurrency {
    pub error: bool,
    pub message: String,
}

/// Either a quote or a soft error; callers must check before using it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ExchangeRateResult {
    Quote(ExchangeQuote),
    Unsupported(UnsupportedCurrency),
}

impl ExchangeRateResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ExchangeRateResult::Unsupported(_))
    }

    pub fn quote(&self) -> Option<&ExchangeQuote> {
        match self {
            ExchangeRateResult::Quote(quote) => Some(quote),
            ExchangeRateResult::Unsupported(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ExchangeRateResult::Quote(_) => None,
            ExchangeRateResult::Unsupported(err) => Some(&err.message),
        }
    }
}

fn rate_for(code: &str) -> Option<f64> {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|(supported, _)| *supported == code)
        .map(|(_, rate)| *rate)
}

/// Convert `amount` between two currency codes (case-insensitive).
pub fn get_exchange_rate(from_currency: &str, to_currency: &str, amount: f64) -> ExchangeRateResult {
    let from_currency = from_currency.to_uppercase();
    let to_currency = to_currency.to_uppercase();

    let (Some(from_rate), Some(to_rate)) = (rate_for(&from_currency), rate_for(&to_currency)) else {
        let codes: Vec<&str> = SUPPORTED_CURRENCIES.iter().map(|(code, _)| *code).collect();
        return ExchangeRateResult::Unsupported(UnsupportedCurrency {
            error: true,
            message: format!(
                "Currency not supported. Supported currencies: {}",
                codes.join(", ")
            ),
        });
    };

    let rate = to_rate / from_rate;

    ExchangeRateResult::Quote(ExchangeQuote {
        from_currency,
        to_currency,
        exchange_rate: round_to(rate, 6),
        amount,
        converted_amount: round2(amount * rate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion() {
        let result = get_exchange_rate("USD", "USD", 100.0);
        let quote = result.quote().unwrap();

        assert_eq!(quote.exchange_rate, 1.0);
        assert_eq!(quote.converted_amount, 100.00);
        assert_eq!(quote.amount, 100.0);
    }

    #[test]
    fn test_cross_rate_through_usd() {
        let result = get_exchange_rate("eur", "jpy", 100.0);
        let quote = result.quote().unwrap();

        assert_eq!(quote.from_currency, "EUR");
        assert_eq!(quote.to_currency, "JPY");
        assert_eq!(quote.exchange_rate, 162.580645);
        assert_eq!(quote.converted_amount, 16_258.06);

        let result = get_exchange_rate("EUR", "GBP", 250.0);
        assert_eq!(result.quote().unwrap().exchange_rate, 0.83871);
        assert_eq!(result.quote().unwrap().converted_amount, 209.68);
    }

    #[test]
    fn test_unsupported_currency_is_soft_error() {
        let result = get_exchange_rate("USD", "XYZ", 1.0);

        assert!(result.is_error());
        assert!(result.quote().is_none());
        let message = result.error_message().unwrap();
        assert!(message.starts_with("Currency not supported."));
        assert!(message.ends_with("USD, EUR, GBP, JPY, CAD, AUD, CHF, CNY, INR, MXN"));

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], serde_json::json!(true));
    }

    #[test]
    fn test_unsupported_source_currency() {
        assert!(get_exchange_rate("ABC", "USD", 1.0).is_error());
    }

    #[test]
    fn test_quote_serializes_flat() {
        let json = serde_json::to_value(get_exchange_rate("USD", "CAD", 10.0)).unwrap();
        assert_eq!(json["exchange_rate"], serde_json::json!(1.37));
        assert_eq!(json["converted_amount"], serde_json::json!(13.7));
        assert!(json.get("error").is_none());
    }
}
