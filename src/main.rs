//! Purchase Budget CLI
//!
//! Computes the maximum purchase price for one borrower

use anyhow::{Context, Result};
use clap::Parser;
use purchase_budget::amortization::{write_schedule_csv_path, AmortizationSummary};
use purchase_budget::config::DEFAULT_CONFIG_PATH;
use purchase_budget::{validate_inputs, BorrowerProfile, BudgetError, Calculator, PartnerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "purchase_budget", version, about = "Maximum property budget for a borrower")]
struct Cli {
    /// Cash available for the purchase
    #[arg(long)]
    equity: f64,

    /// Monthly net income
    #[arg(long)]
    net_income: f64,

    #[arg(long)]
    age: u32,

    /// Buyer already owns a property
    #[arg(long)]
    not_first_property: bool,

    /// Buyer is not an Israeli tax resident
    #[arg(long)]
    non_resident: bool,

    /// The property will be rented out
    #[arg(long)]
    rented: bool,

    /// Explicit monthly rent (overrides the yield estimate)
    #[arg(long)]
    expected_rent: Option<f64>,

    /// Ceiling on the monthly payment
    #[arg(long)]
    budget_cap: Option<f64>,

    /// LTV override, percent
    #[arg(long)]
    ltv: Option<f64>,

    /// Annual interest override, percent
    #[arg(long)]
    interest: Option<f64>,

    /// Partner configuration CSV
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Write the amortization schedule to this CSV
    #[arg(long)]
    schedule_out: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = if cli.config.exists() {
        PartnerConfig::from_csv_path(&cli.config)
            .with_context(|| format!("loading {}", cli.config.display()))?
    } else {
        log::warn!("{} not found, using built-in defaults", cli.config.display());
        PartnerConfig::default()
    };

    let borrower = BorrowerProfile {
        equity: cli.equity,
        net_income: cli.net_income,
        age: cli.age,
        is_first_property: !cli.not_first_property,
        is_israeli_tax_resident: !cli.non_resident,
        is_rented: cli.rented,
        expected_rent: cli.expected_rent,
        budget_cap: cli.budget_cap,
        ltv: cli.ltv,
        interest: cli.interest,
        ..Default::default()
    };

    let calculator = Calculator::new(config);
    let inputs = calculator.inputs_for(&borrower);
    let errors = validate_inputs(&inputs);
    if !errors.is_empty() {
        return Err(BudgetError::InvalidInput(errors).into());
    }

    let Some((results, schedule)) = calculator.calculate_with_schedule(&inputs) else {
        println!("No feasible budget for these inputs.");
        return Ok(());
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        let summary = AmortizationSummary::from_rows(&schedule);
        println!("Purchase Budget");
        println!("===============\n");
        println!("  Tax profile:        {}", results.tax_profile.as_str());
        println!("  Max property value: {:>14.2}", results.max_property_value);
        println!("  Loan amount:        {:>14.2}", results.loan_amount);
        println!("  Actual LTV:         {:>13.2}%", results.actual_ltv);
        println!(
            "  Loan term:          {:>11} yrs ({} months)",
            results.loan_term_years,
            results.loan_term_months()
        );
        println!("  Monthly payment:    {:>14.2}", results.monthly_payment);
        println!("  Rent income:        {:>14.2}", results.rent_income);
        println!("  Net payment:        {:>14.2}", results.net_payment);
        println!("  Purchase tax:       {:>14.2}", results.purchase_tax);
        println!("  Closing costs:      {:>14.2}", results.closing_costs);
        println!("  Equity used:        {:>14.2}", results.equity_used);
        println!("  Equity remaining:   {:>14.2}", results.equity_remaining);
        println!("  Total interest:     {:>14.2}", results.total_interest);
        println!("  Total cost:         {:>14.2}", results.total_cost);
        if let Some(warning) = results.rent_warning {
            println!("  Rent warning:       {:?}", warning);
        }
        println!(
            "\n  Schedule: {} months, {:.2} interest, final balance {:.2}",
            summary.months, summary.total_interest, summary.final_balance
        );
    }

    if let Some(path) = &cli.schedule_out {
        write_schedule_csv_path(path, &schedule)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Schedule written to {}", path.display());
    }

    Ok(())
}
