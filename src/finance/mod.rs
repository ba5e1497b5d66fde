//! Deterministic financial calculators
//!
//! Every calculator is a pure function of its inputs. The only exception is
//! the mock stock fetcher, which takes its random source and clock as
//! arguments so callers decide whether output is reproducible.

mod currency;
mod investment;
mod loan;
mod mortgage;
mod stock;

pub use currency::{
    get_exchange_rate, ExchangeQuote, ExchangeRateResult, UnsupportedCurrency, SUPPORTED_CURRENCIES,
};
pub use investment::{calculate_investment_returns, InvestmentProjection, InvestmentTerms, YearlyGrowth};
pub use loan::{calculate_loan_payment, AmortizationEntry, LoanPayment, LoanTerms};
pub use mortgage::{calculate_mortgage_payment, pmi_annual_rate, MortgageOptions, MortgagePayment};
pub use stock::{
    base_price, fetch_stock_price, HistoricalPrice, StockFetchError, StockFetchResult, StockQuote,
};

/// Round to a fixed number of decimal places for display.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to cents.
pub(crate) fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Level payment for a fixed-rate annuity.
///
/// A zero periodic rate is its own branch: the payment is the principal
/// spread evenly over the periods.
pub(crate) fn annuity_payment(periodic_rate: f64, periods: u64, principal: f64) -> f64 {
    let n = periods as f64;
    if periodic_rate == 0.0 {
        return principal / n;
    }
    periodic_rate * principal / (1.0 - (1.0 + periodic_rate).powf(-n))
}
