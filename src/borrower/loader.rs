//! Load named borrower profiles from a CSV file for batch runs

use super::BorrowerProfile;
use crate::error::Result;
use csv::Reader;
use std::path::Path;

/// Default location of the sample borrower batch
pub const DEFAULT_BORROWERS_PATH: &str = "data/borrowers.csv";

/// Raw CSV row. Blank optional cells fall back to partner defaults.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Equity")]
    equity: f64,
    #[serde(rename = "NetIncome")]
    net_income: f64,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "FirstProperty")]
    is_first_property: bool,
    #[serde(rename = "TaxResident")]
    is_israeli_tax_resident: bool,
    #[serde(rename = "Rented")]
    is_rented: bool,
    #[serde(rename = "ExpectedRent")]
    expected_rent: Option<f64>,
    #[serde(rename = "BudgetCap")]
    budget_cap: Option<f64>,
    #[serde(rename = "LTV")]
    ltv: Option<f64>,
    #[serde(rename = "Interest")]
    interest: Option<f64>,
    #[serde(rename = "MaxAge")]
    max_age: Option<u32>,
}

impl CsvRow {
    fn into_named_profile(self) -> (String, BorrowerProfile) {
        let profile = BorrowerProfile {
            equity: self.equity,
            net_income: self.net_income,
            age: self.age,
            is_first_property: self.is_first_property,
            is_israeli_tax_resident: self.is_israeli_tax_resident,
            is_rented: self.is_rented,
            expected_rent: self.expected_rent,
            budget_cap: self.budget_cap,
            ltv: self.ltv,
            interest: self.interest,
            max_age: self.max_age,
            ..Default::default()
        };
        (self.name, profile)
    }
}

/// Load all borrowers from a CSV file
pub fn load_borrowers<P: AsRef<Path>>(path: P) -> Result<Vec<(String, BorrowerProfile)>> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load borrowers from any reader (e.g., string buffer, request body)
pub fn load_borrowers_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<(String, BorrowerProfile)>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<(String, BorrowerProfile)>> {
    let mut borrowers = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        borrowers.push(row.into_named_profile());
    }
    Ok(borrowers)
}
