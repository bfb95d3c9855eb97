//! Solve every borrower in a CSV file
//!
//! Outputs one results row per borrower; infeasible rows keep their name
//! with empty figures.

use anyhow::{Context, Result};
use clap::Parser;
use purchase_budget::borrower::{load_borrowers, DEFAULT_BORROWERS_PATH};
use purchase_budget::config::DEFAULT_CONFIG_PATH;
use purchase_budget::{validate_inputs, Calculator, CalculatorResults, PartnerConfig};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Batch purchase budget over a borrower CSV")]
struct Cli {
    #[arg(short = 'i', long, default_value = DEFAULT_BORROWERS_PATH)]
    input: PathBuf,

    #[arg(short = 'o', long, default_value = "batch_results.csv")]
    output: PathBuf,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct BatchRow {
    name: String,
    status: &'static str,
    tax_profile: Option<&'static str>,
    max_property_value: Option<f64>,
    loan_amount: Option<f64>,
    #[serde(rename = "ActualLTV")]
    actual_ltv: Option<f64>,
    monthly_payment: Option<f64>,
    net_payment: Option<f64>,
    purchase_tax: Option<f64>,
    closing_costs: Option<f64>,
    loan_term_years: Option<u32>,
    equity_remaining: Option<f64>,
}

impl BatchRow {
    fn empty(name: String, status: &'static str) -> Self {
        Self {
            name,
            status,
            tax_profile: None,
            max_property_value: None,
            loan_amount: None,
            actual_ltv: None,
            monthly_payment: None,
            net_payment: None,
            purchase_tax: None,
            closing_costs: None,
            loan_term_years: None,
            equity_remaining: None,
        }
    }

    fn solved(name: String, r: &CalculatorResults) -> Self {
        Self {
            name,
            status: "ok",
            tax_profile: Some(r.tax_profile.as_str()),
            max_property_value: Some(r.max_property_value),
            loan_amount: Some(r.loan_amount),
            actual_ltv: Some(r.actual_ltv),
            monthly_payment: Some(r.monthly_payment),
            net_payment: Some(r.net_payment),
            purchase_tax: Some(r.purchase_tax),
            closing_costs: Some(r.closing_costs),
            loan_term_years: Some(r.loan_term_years),
            equity_remaining: Some(r.equity_remaining),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let config = PartnerConfig::from_csv_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let borrowers = load_borrowers(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;
    println!("Loaded {} borrowers in {:?}", borrowers.len(), start.elapsed());

    let calculator = Calculator::new(config);

    let rows: Vec<BatchRow> = borrowers
        .into_par_iter()
        .map(|(name, borrower)| {
            let inputs = calculator.inputs_for(&borrower);
            let errors = validate_inputs(&inputs);
            if !errors.is_empty() {
                log::warn!("{}: {} invalid field(s), skipped", name, errors.len());
                return BatchRow::empty(name, "invalid");
            }
            match calculator.calculate(&inputs) {
                Some(results) => BatchRow::solved(name, &results),
                None => BatchRow::empty(name, "infeasible"),
            }
        })
        .collect();

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let solved = rows.iter().filter(|r| r.status == "ok").count();
    println!("Solved {}/{} borrowers", solved, rows.len());
    for row in rows.iter().filter(|r| r.status == "ok") {
        println!(
            "  {:<24} {:>14.0} ({})",
            row.name,
            row.max_property_value.unwrap_or_default(),
            row.tax_profile.unwrap_or_default()
        );
    }
    println!("Output written to {}", cli.output.display());
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
