//! CSV-based partner configuration loader
//!
//! The file is a two-column `key,value` table. Keys use the same camelCase
//! names as the JSON form; keys that are absent keep their defaults.

use super::PartnerConfig;
use crate::error::{BudgetError, Result};
use std::fs::File;
use std::path::Path;

/// Default path to the partner configuration file
pub const DEFAULT_CONFIG_PATH: &str = "data/partner_config.csv";

/// Read raw `(key, value)` pairs from a configuration CSV
pub fn load_entries(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path)?;
    load_entries_from_reader(file)
}

/// Read raw `(key, value)` pairs from any reader
pub fn load_entries_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<(String, String)>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut entries = Vec::new();

    for result in reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or_default().to_string();
        let value = record.get(1).unwrap_or_default().to_string();
        if key.is_empty() || key.starts_with('#') {
            continue;
        }
        entries.push((key, value));
    }

    Ok(entries)
}

/// Apply parsed entries on top of an existing configuration
pub fn apply_entries(config: &mut PartnerConfig, entries: &[(String, String)]) -> Result<()> {
    for (key, value) in entries {
        match key.as_str() {
            "maxDtiRatio" => config.max_dti_ratio = parse_f64(key, value)?,
            "maxAge" => config.max_age = parse_u32(key, value)?,
            "maxLoanTermYears" => config.max_loan_term_years = parse_u32(key, value)?,
            "maxLtvFirstProperty" => config.max_ltv_first_property = parse_f64(key, value)?,
            "maxLtvInvestment" => config.max_ltv_investment = parse_f64(key, value)?,
            "rentRecognitionFirstProperty" => {
                config.rent_recognition_first_property = parse_f64(key, value)?
            }
            "rentRecognitionInvestment" => {
                config.rent_recognition_investment = parse_f64(key, value)?
            }
            "defaultInterest" => config.default_interest = parse_f64(key, value)?,
            "defaultRentalYield" => config.default_rental_yield = parse_f64(key, value)?,
            "lawyerPct" => config.lawyer_pct = parse_f64(key, value)?,
            "brokerPct" => config.broker_pct = parse_f64(key, value)?,
            "vatPct" => config.vat_pct = parse_f64(key, value)?,
            "advisorFee" => config.advisor_fee = parse_f64(key, value)?,
            "otherFee" => config.other_fee = parse_f64(key, value)?,
            "rentWarningHighMultiplier" => {
                config.rent_warning_high_multiplier = parse_f64(key, value)?
            }
            "rentWarningLowMultiplier" => {
                config.rent_warning_low_multiplier = parse_f64(key, value)?
            }
            "enableRentValidation" => config.enable_rent_validation = parse_bool(key, value)?,
            "enableAmortizationTable" => {
                config.enable_amortization_table = parse_bool(key, value)?
            }
            "maxAmortizationMonths" => config.max_amortization_months = parse_u32(key, value)?,
            other => return Err(BudgetError::UnknownConfigKey(other.to_string())),
        }
    }
    Ok(())
}

fn parse_error(key: &str, value: &str) -> BudgetError {
    BudgetError::Parse {
        field: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value.parse().map_err(|_| parse_error(key, value))
}

fn parse_u32(key: &str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| parse_error(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(parse_error(key, value)),
    }
}
