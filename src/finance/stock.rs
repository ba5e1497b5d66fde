//! Synthetic stock quotes for demos
//!
//! The base price is a pure function of the ticker. Daily change, history
//! and volume are drawn from the supplied random source, so a seeded
//! generator makes the whole quote reproducible.

use chrono::{DateTime, Datelike, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::round2;

/// Maximum absolute daily change, in percent.
const MAX_CHANGE_PERCENT: f64 = 3.0;
/// Maximum absolute deviation of a historical price from the base.
const MAX_PRICE_DEVIATION: f64 = 0.05;
const MIN_VOLUME: u64 = 1_000_000;
const VOLUME_SPREAD: f64 = 10_000_000.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalPrice {
    /// `YYYY-MM-DD`
    pub date: String,
    pub price: f64,
    pub volume: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockQuote {
    pub ticker: String,
    pub company_name: String,
    pub current_price: f64,
    pub currency: String,
    pub change_percent: f64,
    pub market_cap: f64,
    pub timestamp: DateTime<Utc>,
    pub historical_data: Vec<HistoricalPrice>,
}

/// Error payload returned instead of failing when a quote cannot be built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockFetchError {
    pub error: bool,
    pub message: String,
}

/// Either a quote or a soft error; callers must check before using it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StockFetchResult {
    Quote(StockQuote),
    Failed(StockFetchError),
}

impl StockFetchResult {
    pub fn is_error(&self) -> bool {
        matches!(self, StockFetchResult::Failed(_))
    }

    pub fn quote(&self) -> Option<&StockQuote> {
        match self {
            StockFetchResult::Quote(quote) => Some(quote),
            StockFetchResult::Failed(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            StockFetchResult::Quote(_) => None,
            StockFetchResult::Failed(err) => Some(&err.message),
        }
    }
}

/// Deterministic price baseline in the range 50..350.
pub fn base_price(ticker_symbol: &str) -> f64 {
    let code_sum: u64 = ticker_symbol.chars().map(|c| u64::from(u32::from(c))).sum();
    (code_sum % 300 + 50) as f64
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_cased = false;
    for c in text.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_cased = c.is_lowercase() || c.is_uppercase();
    }
    out
}

/// Oldest history date must still fall in year 1 or later.
fn history_in_range(as_of: DateTime<Utc>, days_back: u32) -> bool {
    as_of
        .checked_sub_signed(Duration::days(i64::from(days_back)))
        .is_some_and(|oldest| oldest.year() >= 1)
}

/// Build a mock quote with `data_points - 1` days of history before `as_of`.
///
/// History reaching back before year 1 is reported as a soft error before
/// anything is generated.
pub fn fetch_stock_price<R: Rng + ?Sized>(
    ticker_symbol: &str,
    data_points: u32,
    rng: &mut R,
    as_of: DateTime<Utc>,
) -> StockFetchResult {
    let days_back = data_points.saturating_sub(1);
    if !history_in_range(as_of, days_back) {
        return StockFetchResult::Failed(StockFetchError {
            error: true,
            message: format!(
                "Failed to fetch stock data: {} days of history is out of the supported date range",
                days_back
            ),
        });
    }

    let base = base_price(ticker_symbol);
    let change_percent = round2(rng.gen::<f64>() * 2.0 * MAX_CHANGE_PERCENT - MAX_CHANGE_PERCENT);

    let historical_data = (1..data_points.max(1))
        .map(|days_ago| {
            let price_modifier =
                1.0 + (rng.gen::<f64>() * 2.0 * MAX_PRICE_DEVIATION - MAX_PRICE_DEVIATION);
            let volume = (rng.gen::<f64>() * VOLUME_SPREAD) as u64 + MIN_VOLUME;

            HistoricalPrice {
                date: (as_of - Duration::days(i64::from(days_ago)))
                    .format("%Y-%m-%d")
                    .to_string(),
                price: round2(base * price_modifier),
                volume,
            }
        })
        .collect();

    StockFetchResult::Quote(StockQuote {
        ticker: ticker_symbol.to_uppercase(),
        company_name: format!("{} Inc.", title_case(ticker_symbol)),
        current_price: round2(base),
        currency: "USD".to_string(),
        change_percent,
        market_cap: round2(base * 1e9 / 100.0),
        timestamp: as_of,
        historical_data,
    })
}
