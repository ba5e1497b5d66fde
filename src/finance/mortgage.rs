//! Full monthly housing payment: principal & interest, tax, insurance, PMI

use serde::{Deserialize, Serialize};

use super::{annuity_payment, round2};

/// Down payment percentage at or above which no PMI is charged.
const PMI_THRESHOLD_PERCENT: f64 = 20.0;
/// Annual PMI rate (percent) charged right at the threshold.
const PMI_FLOOR_RATE: f64 = 0.5;
/// Additional annual PMI rate per percentage point below the threshold.
const PMI_RATE_STEP: f64 = 0.025;

/// Optional mortgage inputs with their defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MortgageOptions {
    /// Annual property tax as a percentage of the home price. Default 1.0.
    pub property_tax_rate: f64,
    /// Annual homeowner's insurance premium. Default 1000.
    pub annual_insurance: f64,
    /// Charge PMI when the down payment is under 20%. Default true.
    pub include_pmi: bool,
}

impl Default for MortgageOptions {
    fn default() -> Self {
        Self {
            property_tax_rate: 1.0,
            annual_insurance: 1000.0,
            include_pmi: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MortgagePayment {
    pub loan_amount: f64,
    pub down_payment_percent: f64,
    pub monthly_principal_interest: f64,
    pub monthly_property_tax: f64,
    pub monthly_insurance: f64,
    pub monthly_pmi: f64,
    pub total_monthly_payment: f64,
    pub total_payment_over_term: f64,
}

/// Annual PMI rate in percent for a given down payment percentage.
///
/// Grows linearly as the down payment shrinks; returns `None` once the
/// down payment reaches the threshold.
pub fn pmi_annual_rate(down_payment_percent: f64) -> Option<f64> {
    if down_payment_percent < PMI_THRESHOLD_PERCENT {
        Some(PMI_FLOOR_RATE + (PMI_THRESHOLD_PERCENT - down_payment_percent) * PMI_RATE_STEP)
    } else {
        None
    }
}

/// Monthly payment breakdown for a home purchase.
///
/// Inputs are not sanity-checked: a down payment at or above the price
/// yields a zero or negative loan amount, which flows through unchanged.
pub fn calculate_mortgage_payment(
    home_price: f64,
    down_payment: f64,
    annual_interest_rate: f64,
    loan_term_years: u32,
    options: &MortgageOptions,
) -> MortgagePayment {
    let loan_amount = home_price - down_payment;
    let down_payment_percent = down_payment / home_price * 100.0;

    let monthly_rate = annual_interest_rate / 100.0 / 12.0;
    let num_payments = u64::from(loan_term_years) * 12;
    let monthly_pi = annuity_payment(monthly_rate, num_payments, loan_amount);

    let monthly_property_tax = home_price * options.property_tax_rate / 100.0 / 12.0;
    let monthly_insurance = options.annual_insurance / 12.0;

    let monthly_pmi = match pmi_annual_rate(down_payment_percent) {
        Some(pmi_rate) if options.include_pmi => loan_amount * pmi_rate / 100.0 / 12.0,
        _ => 0.0,
    };

    let total_monthly_payment = monthly_pi + monthly_property_tax + monthly_insurance + monthly_pmi;

    MortgagePayment {
        loan_amount: round2(loan_amount),
        down_payment_percent: round2(down_payment_percent),
        monthly_principal_interest: round2(monthly_pi),
        monthly_property_tax: round2(monthly_property_tax),
        monthly_insurance: round2(monthly_insurance),
        monthly_pmi: round2(monthly_pmi),
        total_monthly_payment: round2(total_monthly_payment),
        total_payment_over_term: round2(total_monthly_payment * num_payments as f64),
    }
}
