//! Compound growth projection with periodic contributions

use serde::{Deserialize, Serialize};

use super::round2;
use crate::error::GatewayError;
use crate::models::CompoundFrequency;
use crate::Result;

/// Years covered by the iterative yearly summary.
const SUMMARY_YEARS: u32 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InvestmentTerms {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    /// Expected annual return as a percentage; may be zero.
    pub annual_return_rate: f64,
    pub investment_period_years: u32,
    pub compound_frequency: CompoundFrequency,
    /// Tax on earnings as a percentage. `None` skips the after-tax view.
    pub tax_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct YearlyGrowth {
    pub year: u32,
    pub start_value: f64,
    pub contributions: f64,
    pub growth: f64,
    pub end_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentProjection {
    pub total_future_value: f64,
    pub total_contributions: f64,
    pub total_earnings: f64,
    pub after_tax_earnings: Option<f64>,
    pub after_tax_future_value: Option<f64>,
    pub compound_frequency: CompoundFrequency,
    pub yearly_summary: Vec<YearlyGrowth>,
}

/// Closed-form future value plus a year-by-year walk of the first years.
///
/// The yearly summary compounds period by period rather than slicing the
/// closed form, so the two only agree up to rounding.
pub fn calculate_investment_returns(terms: &InvestmentTerms) -> Result<InvestmentProjection> {
    let periods_per_year = terms.compound_frequency.periods_per_year();
    let periodic_rate = terms.annual_return_rate / 100.0 / periods_per_year as f64;
    let total_periods = terms
        .investment_period_years
        .checked_mul(periods_per_year)
        .ok_or_else(|| {
            GatewayError::InvalidArgument(format!(
                "Investment period of {} years has too many compounding periods",
                terms.investment_period_years
            ))
        })? as f64;

    // Contributions are normalized to the compounding cadence.
    let period_contribution = terms.monthly_contribution * (12.0 / periods_per_year as f64);

    let growth_factor = (1.0 + periodic_rate).powf(total_periods);
    let lump_sum_value = terms.initial_investment * growth_factor;
    let contribution_value = if periodic_rate > 0.0 {
        period_contribution * (growth_factor - 1.0) / periodic_rate
    } else {
        period_contribution * total_periods
    };

    let total_future_value = lump_sum_value + contribution_value;
    let total_contributions = terms.initial_investment
        + terms.monthly_contribution * 12.0 * terms.investment_period_years as f64;
    let total_earnings = total_future_value - total_contributions;

    let after_tax = terms.tax_rate.map(|tax_rate| {
        let earnings = total_earnings * (1.0 - tax_rate / 100.0);
        (earnings, total_contributions + earnings)
    });

    let yearly_contribution = terms.monthly_contribution * 12.0;
    let mut current_value = terms.initial_investment;
    let yearly_summary = (1..=terms.investment_period_years.min(SUMMARY_YEARS))
        .map(|year| {
            let start_value = current_value;
            for _ in 0..periods_per_year {
                current_value = current_value * (1.0 + periodic_rate) + period_contribution;
            }

            YearlyGrowth {
                year,
                start_value: round2(start_value),
                contributions: round2(yearly_contribution),
                growth: round2(current_value - start_value - yearly_contribution),
                end_value: round2(current_value),
            }
        })
        .collect();

    Ok(InvestmentProjection {
        total_future_value: round2(total_future_value),
        total_contributions: round2(total_contributions),
        total_earnings: round2(total_earnings),
        after_tax_earnings: after_tax.map(|(earnings, _)| round2(earnings)),
        after_tax_future_value: after_tax.map(|(_, value)| round2(value)),
        compound_frequency: terms.compound_frequency,
        yearly_summary,
    })
}
