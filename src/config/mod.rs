//! Partner configuration: regulatory limits and product defaults

pub mod loader;

pub use loader::{apply_entries, load_entries, DEFAULT_CONFIG_PATH};

use crate::error::{BudgetError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Regulatory and product defaults supplied by a partner.
///
/// Rate fields are fractions (0.33 means 33%). They are converted to the
/// percent convention of [`crate::CalculatorInputs`] when a borrower profile
/// is merged with this configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartnerConfig {
    /// Maximum debt-to-income ratio
    pub max_dti_ratio: f64,

    /// The loan must be repaid by this age
    pub max_age: u32,

    /// Maximum loan term offered
    pub max_loan_term_years: u32,

    /// LTV cap for the `SINGLE_HOME` tax profile, i.e. a tax resident's
    /// first property. A non-resident buying a first property falls under
    /// the investment cap.
    pub max_ltv_first_property: f64,

    /// LTV cap for every other purchase
    pub max_ltv_investment: f64,

    pub rent_recognition_first_property: f64,
    pub rent_recognition_investment: f64,

    /// Annual interest rate
    pub default_interest: f64,

    /// Annual gross rental yield used to estimate rent from price
    pub default_rental_yield: f64,

    pub lawyer_pct: f64,
    pub broker_pct: f64,
    pub vat_pct: f64,
    pub advisor_fee: f64,
    pub other_fee: f64,

    /// Explicit rent above this multiple of the market estimate is flagged high
    pub rent_warning_high_multiplier: f64,

    /// Explicit rent below this multiple of the market estimate is flagged low
    pub rent_warning_low_multiplier: f64,

    pub enable_rent_validation: bool,
    pub enable_amortization_table: bool,

    /// Row cap for generated amortization tables
    pub max_amortization_months: u32,
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            max_dti_ratio: 0.33,
            max_age: 80,
            max_loan_term_years: 30,
            max_ltv_first_property: 0.75,
            max_ltv_investment: 0.50,
            rent_recognition_first_property: 0.80,
            rent_recognition_investment: 0.80,
            default_interest: 0.05,
            default_rental_yield: 0.03,
            lawyer_pct: 0.01,
            broker_pct: 0.02,
            vat_pct: 0.18,
            advisor_fee: 9_000.0,
            other_fee: 3_000.0,
            rent_warning_high_multiplier: 1.3,
            rent_warning_low_multiplier: 0.7,
            enable_rent_validation: true,
            enable_amortization_table: true,
            max_amortization_months: 360,
        }
    }
}

impl PartnerConfig {
    /// Load configuration from the default CSV location (data/partner_config.csv)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from a `key,value` CSV file, starting from defaults.
    /// The loaded configuration is validated before it is returned.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let entries = load_entries(path)?;
        let mut config = Self::default();
        apply_entries(&mut config, &entries)?;
        config.validate()?;
        log::info!("Loaded partner configuration from {}", path.display());
        Ok(config)
    }

    /// Check every numeric bound. The solver assumes these hold.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("maxDtiRatio", self.max_dti_ratio),
            ("maxLtvFirstProperty", self.max_ltv_first_property),
            ("maxLtvInvestment", self.max_ltv_investment),
            ("rentRecognitionFirstProperty", self.rent_recognition_first_property),
            ("rentRecognitionInvestment", self.rent_recognition_investment),
            ("defaultInterest", self.default_interest),
            ("defaultRentalYield", self.default_rental_yield),
            ("lawyerPct", self.lawyer_pct),
            ("brokerPct", self.broker_pct),
            ("vatPct", self.vat_pct),
        ];
        for (field, value) in fractions {
            check_range(field, value, 0.0, 1.0)?;
        }

        check_range("advisorFee", self.advisor_fee, 0.0, f64::MAX)?;
        check_range("otherFee", self.other_fee, 0.0, f64::MAX)?;
        check_range("maxAge", self.max_age as f64, 18.0, 120.0)?;
        check_range("maxLoanTermYears", self.max_loan_term_years as f64, 1.0, 50.0)?;
        check_range(
            "maxAmortizationMonths",
            self.max_amortization_months as f64,
            1.0,
            600.0,
        )?;
        check_range(
            "rentWarningLowMultiplier",
            self.rent_warning_low_multiplier,
            f64::MIN_POSITIVE,
            self.rent_warning_high_multiplier,
        )?;
        check_range(
            "rentWarningHighMultiplier",
            self.rent_warning_high_multiplier,
            self.rent_warning_low_multiplier,
            10.0,
        )?;

        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(BudgetError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}
