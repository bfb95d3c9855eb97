//! Budget solver: maximum purchase price under equity, income and LTV limits

mod engine;
mod factor;
mod rent;
mod results;

pub use engine::{
    factor_for, solve_maximum_budget, BudgetSolver, SolveOutcome, SolverConfig,
    DEFAULT_CEILING_MULTIPLE, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
pub use factor::{amortization_factor, loan_term_years, monthly_rate};
pub use rent::{market_rent, monthly_rent, RentWarning, RentWarningPolicy};
pub use results::CalculatorResults;
