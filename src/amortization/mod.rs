//! Month-by-month amortization schedule for a finalized loan

mod export;

pub use export::{write_schedule_csv, write_schedule_csv_path};

use crate::solver::{amortization_factor, monthly_rate};
use serde::{Deserialize, Serialize};

/// Default row cap for generated tables
pub const DEFAULT_MAX_ROWS: u32 = 360;

/// Balance below which the loan counts as repaid
const BALANCE_EPSILON: f64 = 0.1;

/// One month of the schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based
    pub month: u32,
    pub opening: f64,
    /// Constant nominal payment
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// `opening - principal`, floored at zero
    pub closing: f64,
}

/// Schedule for `loan_amount` over `years`, capped at [`DEFAULT_MAX_ROWS`] rows
pub fn generate_amortization_table(
    loan_amount: f64,
    annual_interest_percent: f64,
    years: u32,
) -> Vec<AmortizationRow> {
    generate_amortization_table_capped(loan_amount, annual_interest_percent, years, DEFAULT_MAX_ROWS)
}

/// Schedule with an explicit row cap.
///
/// The payment is recomputed from the loan, rate and term so this can be
/// called without a solver result. Stops early once the balance is repaid.
pub fn generate_amortization_table_capped(
    loan_amount: f64,
    annual_interest_percent: f64,
    years: u32,
    max_rows: u32,
) -> Vec<AmortizationRow> {
    let months = years.saturating_mul(12);
    if months == 0 || loan_amount <= 0.0 {
        return Vec::new();
    }

    let rate = monthly_rate(annual_interest_percent);
    let payment = loan_amount * amortization_factor(annual_interest_percent, months);
    let limit = months.min(max_rows);

    let mut rows = Vec::with_capacity(limit.min(DEFAULT_MAX_ROWS) as usize);
    let mut balance = loan_amount;

    for month in 1..=limit {
        if balance <= BALANCE_EPSILON {
            break;
        }
        let interest = balance * rate;
        let principal = payment - interest;
        let closing = (balance - principal).max(0.0);

        rows.push(AmortizationRow {
            month,
            opening: balance,
            payment,
            interest,
            principal,
            closing,
        });
        balance = closing;
    }

    rows
}

/// Totals over a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSummary {
    pub months: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub final_balance: f64,
}

impl AmortizationSummary {
    pub fn from_rows(rows: &[AmortizationRow]) -> Self {
        Self {
            months: rows.len() as u32,
            total_paid: rows.iter().map(|r| r.payment).sum(),
            total_interest: rows.iter().map(|r| r.interest).sum(),
            total_principal: rows.iter().map(|r| r.principal).sum(),
            final_balance: rows.last().map(|r| r.closing).unwrap_or(0.0),
        }
    }
}
