//! Purchase Budget - Maximum property price solver for mortgage borrowers
//!
//! This library provides:
//! - Partner configuration (LTV caps, fees, term limits) loaded from CSV
//! - Borrower profiles merged with partner defaults into calculator inputs
//! - Progressive purchase-tax brackets and closing-cost breakdowns
//! - A bisection solver for the highest affordable price
//! - Month-by-month amortization schedules
//! - A golden-reference scenario battery with snapshot drift checks

pub mod error;
pub mod config;
pub mod borrower;
pub mod tax;
pub mod solver;
pub mod amortization;
pub mod calculator;
pub mod golden;

// Re-export commonly used types
pub use error::{BudgetError, Result};
pub use config::PartnerConfig;
pub use borrower::{BorrowerProfile, CalculatorInputs, ValidationError, validate_inputs};
pub use tax::{TaxProfile, determine_tax_profile, compute_purchase_tax, calculate_closing_costs};
pub use solver::{BudgetSolver, CalculatorResults, RentWarning, SolverConfig, solve_maximum_budget};
pub use amortization::{AmortizationRow, generate_amortization_table};
pub use calculator::{Calculator, calculate};
