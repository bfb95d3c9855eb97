//! Solver output

use super::rent::RentWarning;
use crate::amortization::AmortizationRow;
use crate::tax::TaxProfile;
use serde::{Deserialize, Serialize};

/// Outcome of one successful budget calculation.
///
/// Built once by the solver and not modified afterwards, except that the
/// calculator may attach the amortization table before returning it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorResults {
    /// Highest affordable purchase price
    pub max_property_value: f64,
    pub loan_amount: f64,
    /// Realized loan-to-value in percent; below the cap when income binds
    #[serde(rename = "actualLTV")]
    pub actual_ltv: f64,
    pub monthly_payment: f64,
    /// Monthly rent used (explicit or estimated), before recognition
    pub rent_income: f64,
    /// Monthly payment minus rent
    pub net_payment: f64,
    /// Purchase tax plus fees
    pub closing_costs: f64,
    pub total_interest: f64,
    /// Price, closing costs and interest over the term
    pub total_cost: f64,
    pub loan_term_years: u32,
    pub purchase_tax: f64,
    pub tax_profile: TaxProfile,
    pub equity_used: f64,
    pub equity_remaining: f64,
    #[serde(rename = "lawyerFeeTTC")]
    pub lawyer_fee_ttc: f64,
    #[serde(rename = "brokerFeeTTC")]
    pub broker_fee_ttc: f64,
    pub rent_warning: Option<RentWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amortization_table: Option<Vec<AmortizationRow>>,
}

impl CalculatorResults {
    pub fn loan_term_months(&self) -> u32 {
        self.loan_term_years.saturating_mul(12)
    }
}
