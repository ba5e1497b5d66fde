//! Installment loan payment and amortization preview

use serde::{Deserialize, Serialize};

use super::{annuity_payment, round2};
use crate::error::GatewayError;
use crate::models::PaymentFrequency;
use crate::Result;

/// Number of periods shown in the amortization preview.
const PREVIEW_PERIODS: u32 = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual rate as a percentage (5.5 means 5.5%).
    pub annual_interest_rate: f64,
    pub loan_term_years: u32,
    pub payment_frequency: PaymentFrequency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AmortizationEntry {
    pub period: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoanPayment {
    pub payment_amount: f64,
    pub payment_frequency: PaymentFrequency,
    pub total_payments: u32,
    pub total_interest: f64,
    pub amortization_preview: Vec<AmortizationEntry>,
}

/// Payment amount, total interest and the first few amortization periods.
pub fn calculate_loan_payment(terms: &LoanTerms) -> Result<LoanPayment> {
    if terms.loan_term_years == 0 {
        return Err(GatewayError::InvalidArgument(
            "Loan term must be at least one year".to_string(),
        ));
    }

    let periods_per_year = terms.payment_frequency.periods_per_year();
    let periods = terms
        .loan_term_years
        .checked_mul(periods_per_year)
        .ok_or_else(|| {
            GatewayError::InvalidArgument(format!(
                "Loan term of {} years has too many payment periods",
                terms.loan_term_years
            ))
        })?;
    let periodic_rate = terms.annual_interest_rate / 100.0 / periods_per_year as f64;

    let payment = annuity_payment(periodic_rate, u64::from(periods), terms.principal);

    let mut balance = terms.principal;
    let amortization_preview = (1..=periods.min(PREVIEW_PERIODS))
        .map(|period| {
            let interest = balance * periodic_rate;
            let principal = payment - interest;
            balance -= principal;

            AmortizationEntry {
                period,
                payment: round2(payment),
                principal: round2(principal),
                interest: round2(interest),
                balance: round2(balance),
            }
        })
        .collect();

    Ok(LoanPayment {
        payment_amount: round2(payment),
        payment_frequency: terms.payment_frequency,
        total_payments: periods,
        total_interest: round2(payment * periods as f64 - terms.principal),
        amortization_preview,
    })
}
