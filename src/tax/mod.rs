//! Purchase tax and closing costs
//!
//! Purchase tax is progressive over fixed bracket tables, one table per
//! tax profile. Closing costs add VAT-inclusive lawyer and broker fees and
//! flat advisor/other fees on top of the tax.

mod brackets;
mod closing;

pub use brackets::{compute_purchase_tax, BracketSchedule, TaxBracket};
pub use closing::{calculate_closing_costs, closing_cost_breakdown, ClosingCosts};

use serde::{Deserialize, Serialize};

/// Tax treatment of a purchase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxProfile {
    /// Resident buying their only home
    SingleHome,
    /// Everyone else
    Investor,
}

impl TaxProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxProfile::SingleHome => "SINGLE_HOME",
            TaxProfile::Investor => "INVESTOR",
        }
    }

    /// Bracket table for this profile
    pub fn schedule(self) -> &'static BracketSchedule {
        match self {
            TaxProfile::SingleHome => &brackets::SINGLE_HOME,
            TaxProfile::Investor => &brackets::INVESTOR,
        }
    }
}

/// `SingleHome` only for a tax resident buying a first property
pub fn determine_tax_profile(is_first_property: bool, is_israeli_tax_resident: bool) -> TaxProfile {
    if is_first_property && is_israeli_tax_resident {
        TaxProfile::SingleHome
    } else {
        TaxProfile::Investor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_classification() {
        assert_eq!(determine_tax_profile(true, true), TaxProfile::SingleHome);
        assert_eq!(determine_tax_profile(true, false), TaxProfile::Investor);
        assert_eq!(determine_tax_profile(false, true), TaxProfile::Investor);
        assert_eq!(determine_tax_profile(false, false), TaxProfile::Investor);
    }

    #[test]
    fn test_profile_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaxProfile::SingleHome).unwrap(),
            r#""SINGLE_HOME""#
        );
        let parsed: TaxProfile = serde_json::from_str(r#""INVESTOR""#).unwrap();
        assert_eq!(parsed, TaxProfile::Investor);
        assert_eq!(TaxProfile::Investor.as_str(), "INVESTOR");
    }
}
