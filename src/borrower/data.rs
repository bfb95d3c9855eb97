//! Borrower profile and the solver's input record

use crate::config::PartnerConfig;
use crate::tax::{determine_tax_profile, TaxProfile};
use serde::{Deserialize, Serialize};

/// Fully resolved inputs for one calculation.
///
/// Percent fields use 0-100. Constructed once per calculation and never
/// mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInputs {
    /// Cash available for the purchase
    pub equity: f64,
    /// Maximum loan-to-value
    pub ltv: f64,
    /// Monthly net income
    pub net_income: f64,
    /// Maximum debt-to-income
    pub ratio: f64,
    pub age: u32,
    /// The loan must end by this age
    pub max_age: u32,
    /// Annual interest, may be 0
    pub interest: f64,
    pub is_rented: bool,
    /// Annual gross yield used when no explicit rent is given
    pub rental_yield: f64,
    /// Share of rent counted toward income
    pub rent_recognition: f64,
    /// Optional ceiling on the monthly payment
    pub budget_cap: Option<f64>,
    pub is_first_property: bool,
    pub is_israeli_tax_resident: bool,
    /// Optional explicit monthly rent
    pub expected_rent: Option<f64>,
    pub lawyer_pct: f64,
    pub broker_pct: f64,
    pub vat_pct: f64,
    pub advisor_fee: f64,
    pub other_fee: f64,
}

impl CalculatorInputs {
    pub fn tax_profile(&self) -> TaxProfile {
        determine_tax_profile(self.is_first_property, self.is_israeli_tax_resident)
    }

    /// Explicit rent, counted only when strictly positive
    pub fn explicit_rent(&self) -> Option<f64> {
        self.expected_rent.filter(|&rent| rent > 0.0)
    }

    /// Payment cap, ignored when absent or not positive
    pub fn effective_budget_cap(&self) -> Option<f64> {
        self.budget_cap.filter(|&cap| cap > 0.0)
    }
}

/// What a borrower enters, with optional overrides of partner defaults.
///
/// Overrides use the 0-100 percent convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorrowerProfile {
    pub equity: f64,
    pub net_income: f64,
    pub age: u32,
    pub is_first_property: bool,
    pub is_israeli_tax_resident: bool,
    pub is_rented: bool,

    pub expected_rent: Option<f64>,
    pub budget_cap: Option<f64>,

    pub ltv: Option<f64>,
    pub ratio: Option<f64>,
    pub max_age: Option<u32>,
    pub interest: Option<f64>,
    pub rental_yield: Option<f64>,
    pub rent_recognition: Option<f64>,
    pub lawyer_pct: Option<f64>,
    pub broker_pct: Option<f64>,
    pub vat_pct: Option<f64>,
    pub advisor_fee: Option<f64>,
    pub other_fee: Option<f64>,
}

impl BorrowerProfile {
    /// Merge the profile with partner defaults.
    ///
    /// Every override that is present wins; otherwise the partner value is
    /// used, converted from a fraction to a percent.
    pub fn to_inputs(&self, config: &PartnerConfig) -> CalculatorInputs {
        let profile = determine_tax_profile(self.is_first_property, self.is_israeli_tax_resident);

        let default_ltv = match profile {
            TaxProfile::SingleHome => config.max_ltv_first_property,
            TaxProfile::Investor => config.max_ltv_investment,
        };
        let default_recognition = if self.is_first_property {
            config.rent_recognition_first_property
        } else {
            config.rent_recognition_investment
        };

        CalculatorInputs {
            equity: self.equity,
            ltv: self.ltv.unwrap_or(default_ltv * 100.0),
            net_income: self.net_income,
            ratio: self.ratio.unwrap_or(config.max_dti_ratio * 100.0),
            age: self.age,
            max_age: self.max_age.unwrap_or(config.max_age),
            interest: self.interest.unwrap_or(config.default_interest * 100.0),
            is_rented: self.is_rented,
            rental_yield: self
                .rental_yield
                .unwrap_or(config.default_rental_yield * 100.0),
            rent_recognition: self.rent_recognition.unwrap_or(default_recognition * 100.0),
            budget_cap: self.budget_cap,
            is_first_property: self.is_first_property,
            is_israeli_tax_resident: self.is_israeli_tax_resident,
            expected_rent: self.expected_rent,
            lawyer_pct: self.lawyer_pct.unwrap_or(config.lawyer_pct * 100.0),
            broker_pct: self.broker_pct.unwrap_or(config.broker_pct * 100.0),
            vat_pct: self.vat_pct.unwrap_or(config.vat_pct * 100.0),
            advisor_fee: self.advisor_fee.unwrap_or(config.advisor_fee),
            other_fee: self.other_fee.unwrap_or(config.other_fee),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn first_home_buyer() -> BorrowerProfile {
        BorrowerProfile {
            equity: 1_000_000.0,
            net_income: 20_000.0,
            age: 35,
            is_first_property: true,
            is_israeli_tax_resident: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_converted_to_percent() {
        let inputs = first_home_buyer().to_inputs(&PartnerConfig::default());

        assert_abs_diff_eq!(inputs.ltv, 75.0, epsilon = 1e-9);
        assert_abs_diff_eq!(inputs.ratio, 33.0, epsilon = 1e-9);
        assert_abs_diff_eq!(inputs.interest, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(inputs.vat_pct, 18.0, epsilon = 1e-9);
        assert_eq!(inputs.max_age, 80);
        assert_eq!(inputs.advisor_fee, 9_000.0);
    }

    #[test]
    fn test_investor_gets_investment_ltv() {
        let mut borrower = first_home_buyer();
        borrower.is_israeli_tax_resident = false;
        let config = PartnerConfig {
            rent_recognition_first_property: 0.9,
            rent_recognition_investment: 0.6,
            ..Default::default()
        };

        // LTV follows the tax profile, rent recognition follows first-property status
        let inputs = borrower.to_inputs(&config);
        assert_abs_diff_eq!(inputs.ltv, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(inputs.rent_recognition, 90.0, epsilon = 1e-9);
        assert_eq!(inputs.tax_profile(), TaxProfile::Investor);
    }

    #[test]
    fn test_overrides_win() {
        let mut borrower = first_home_buyer();
        borrower.ltv = Some(60.0);
        borrower.interest = Some(0.0);
        borrower.max_age = Some(75);

        let inputs = borrower.to_inputs(&PartnerConfig::default());
        assert_eq!(inputs.ltv, 60.0);
        assert_eq!(inputs.interest, 0.0);
        assert_eq!(inputs.max_age, 75);
    }

    #[test]
    fn test_non_positive_rent_and_cap_ignored() {
        let mut borrower = first_home_buyer();
        borrower.expected_rent = Some(0.0);
        borrower.budget_cap = Some(-1.0);

        let inputs = borrower.to_inputs(&PartnerConfig::default());
        assert_eq!(inputs.explicit_rent(), None);
        assert_eq!(inputs.effective_budget_cap(), None);
    }
}
