//! Rent estimation and the advisory rent warning

use crate::borrower::CalculatorInputs;
use crate::config::PartnerConfig;
use serde::{Deserialize, Serialize};

/// How an explicit rent compares to the yield-based market estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentWarning {
    High,
    Low,
}

/// Monthly rent implied by the annual yield on `price`
pub fn market_rent(price: f64, rental_yield_percent: f64) -> f64 {
    price * rental_yield_percent / 100.0 / 12.0
}

/// Monthly rent used for a candidate price.
///
/// An explicit positive rent always wins over the yield estimate. Zero when
/// the property is not rented.
pub fn monthly_rent(inputs: &CalculatorInputs, price: f64) -> f64 {
    if !inputs.is_rented {
        return 0.0;
    }
    inputs
        .explicit_rent()
        .unwrap_or_else(|| market_rent(price, inputs.rental_yield))
}

/// Thresholds for flagging an implausible rent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentWarningPolicy {
    pub high_multiplier: f64,
    pub low_multiplier: f64,
}

impl RentWarningPolicy {
    /// `None` when the partner has rent validation switched off
    pub fn from_config(config: &PartnerConfig) -> Option<Self> {
        config.enable_rent_validation.then(|| Self {
            high_multiplier: config.rent_warning_high_multiplier,
            low_multiplier: config.rent_warning_low_multiplier,
        })
    }

    /// Compare the rent used at `price` against the market estimate
    pub fn evaluate(&self, inputs: &CalculatorInputs, price: f64) -> Option<RentWarning> {
        if !inputs.is_rented {
            return None;
        }
        let market = market_rent(price, inputs.rental_yield);
        let actual = monthly_rent(inputs, price);
        if actual > self.high_multiplier * market {
            Some(RentWarning::High)
        } else if actual < self.low_multiplier * market {
            Some(RentWarning::Low)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BorrowerProfile;

    fn rented_inputs(expected_rent: Option<f64>) -> CalculatorInputs {
        BorrowerProfile {
            equity: 1_000_000.0,
            net_income: 20_000.0,
            age: 40,
            is_rented: true,
            rental_yield: Some(3.0),
            expected_rent,
            ..Default::default()
        }
        .to_inputs(&PartnerConfig::default())
    }

    fn policy() -> RentWarningPolicy {
        RentWarningPolicy::from_config(&PartnerConfig::default()).unwrap()
    }

    #[test]
    fn test_explicit_rent_wins() {
        let inputs = rented_inputs(Some(9_000.0));
        assert_eq!(monthly_rent(&inputs, 2_000_000.0), 9_000.0);
    }

    #[test]
    fn test_yield_fallback() {
        let inputs = rented_inputs(None);
        // 2,000,000 * 3% / 12
        assert_eq!(monthly_rent(&inputs, 2_000_000.0), 5_000.0);
    }

    #[test]
    fn test_not_rented_means_no_rent() {
        let mut inputs = rented_inputs(Some(9_000.0));
        inputs.is_rented = false;
        assert_eq!(monthly_rent(&inputs, 2_000_000.0), 0.0);
        assert_eq!(policy().evaluate(&inputs, 2_000_000.0), None);
    }

    #[test]
    fn test_warning_thresholds() {
        // Market estimate at 2,000,000 is 5,000 a month
        let policy = policy();
        assert_eq!(
            policy.evaluate(&rented_inputs(Some(7_000.0)), 2_000_000.0),
            Some(RentWarning::High)
        );
        assert_eq!(
            policy.evaluate(&rented_inputs(Some(3_000.0)), 2_000_000.0),
            Some(RentWarning::Low)
        );
        assert_eq!(policy.evaluate(&rented_inputs(Some(5_500.0)), 2_000_000.0), None);
        assert_eq!(policy.evaluate(&rented_inputs(None), 2_000_000.0), None);
    }

    #[test]
    fn test_zero_yield_flags_any_explicit_rent_high() {
        let mut inputs = rented_inputs(Some(5_000.0));
        inputs.rental_yield = 0.0;
        assert_eq!(
            policy().evaluate(&inputs, 2_000_000.0),
            Some(RentWarning::High)
        );

        // No explicit rent: estimate and market are both zero
        inputs.expected_rent = None;
        assert_eq!(policy().evaluate(&inputs, 2_000_000.0), None);
    }

    #[test]
    fn test_disabled_by_config() {
        let config = PartnerConfig {
            enable_rent_validation: false,
            ..Default::default()
        };
        assert!(RentWarningPolicy::from_config(&config).is_none());
    }
}
