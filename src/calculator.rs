//! Top-level entry point binding the solver to a partner configuration
//!
//! Holds a [`PartnerConfig`] once, then runs any number of independent
//! calculations against it. Nothing is shared between calls, so a single
//! calculator can serve concurrent requests by reference.

use crate::amortization::{generate_amortization_table_capped, AmortizationRow};
use crate::borrower::{BorrowerProfile, CalculatorInputs};
use crate::config::PartnerConfig;
use crate::solver::{
    amortization_factor, loan_term_years, BudgetSolver, CalculatorResults, RentWarningPolicy,
    SolverConfig,
};

/// Budget calculator for one partner
///
/// # Example
/// ```ignore
/// let calculator = Calculator::new(PartnerConfig::from_csv()?);
/// if let Some((results, schedule)) = calculator.calculate_with_schedule(&inputs) {
///     println!("{:.0} over {} months", results.max_property_value, schedule.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Calculator {
    config: PartnerConfig,
    solver: BudgetSolver,
}

impl Calculator {
    pub fn new(config: PartnerConfig) -> Self {
        Self::with_solver_config(config, SolverConfig::default())
    }

    pub fn with_solver_config(config: PartnerConfig, solver_config: SolverConfig) -> Self {
        let solver = BudgetSolver::new(solver_config, RentWarningPolicy::from_config(&config));
        Self { config, solver }
    }

    /// Merge a borrower profile with this partner's defaults
    pub fn inputs_for(&self, borrower: &BorrowerProfile) -> CalculatorInputs {
        borrower.to_inputs(&self.config)
    }

    /// Maximum budget for the inputs.
    ///
    /// `None` when the borrower has no loan term left before the maximum
    /// age, or when no price is affordable.
    pub fn calculate(&self, inputs: &CalculatorInputs) -> Option<CalculatorResults> {
        let Some(years) =
            loan_term_years(self.config.max_loan_term_years, inputs.age, inputs.max_age)
        else {
            log::warn!(
                "No loan term left: age {} with maximum age {}",
                inputs.age,
                inputs.max_age
            );
            return None;
        };

        let months = years.saturating_mul(12);
        let factor = amortization_factor(inputs.interest, months);

        self.solver
            .solve(inputs, inputs.tax_profile(), factor, months)
    }

    /// Budget plus its schedule.
    ///
    /// The table is also attached to the results when the partner enables it.
    pub fn calculate_with_schedule(
        &self,
        inputs: &CalculatorInputs,
    ) -> Option<(CalculatorResults, Vec<AmortizationRow>)> {
        let mut results = self.calculate(inputs)?;
        let schedule = generate_amortization_table_capped(
            results.loan_amount,
            inputs.interest,
            results.loan_term_years,
            self.config.max_amortization_months,
        );
        if self.config.enable_amortization_table {
            results.amortization_table = Some(schedule.clone());
        }
        Some((results, schedule))
    }

    /// Run many independent calculations
    pub fn calculate_batch(&self, inputs: &[CalculatorInputs]) -> Vec<Option<CalculatorResults>> {
        inputs.iter().map(|i| self.calculate(i)).collect()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(PartnerConfig::default())
    }
}

/// One-off calculation with default solver tuning
pub fn calculate(inputs: &CalculatorInputs, config: &PartnerConfig) -> Option<CalculatorResults> {
    Calculator::new(config.clone()).calculate(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn borrower() -> BorrowerProfile {
        BorrowerProfile {
            equity: 1_200_000.0,
            net_income: 25_000.0,
            age: 40,
            is_first_property: true,
            is_israeli_tax_resident: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_age_exhausted_returns_none() {
        let calculator = Calculator::default();
        let mut inputs = calculator.inputs_for(&borrower());
        inputs.age = 80;
        inputs.max_age = 80;
        assert!(calculator.calculate(&inputs).is_none());
    }

    #[test]
    fn test_term_shortened_by_age() {
        let calculator = Calculator::default();
        let mut inputs = calculator.inputs_for(&borrower());
        inputs.age = 62;

        let results = calculator.calculate(&inputs).unwrap();
        assert_eq!(results.loan_term_years, 18);
    }

    #[test]
    fn test_unbounded_term_does_not_overflow() {
        let calculator = Calculator::new(PartnerConfig {
            max_loan_term_years: u32::MAX,
            ..Default::default()
        });
        let mut inputs = calculator.inputs_for(&borrower());
        inputs.max_age = u32::MAX;

        let results = calculator.calculate(&inputs).unwrap();
        assert_eq!(results.loan_term_years, u32::MAX / 12);
        assert!(results.max_property_value > 0.0);
    }

    #[test]
    fn test_schedule_attached_when_enabled() {
        let calculator = Calculator::default();
        let inputs = calculator.inputs_for(&borrower());

        let (results, schedule) = calculator.calculate_with_schedule(&inputs).unwrap();
        assert_eq!(schedule.len(), 360);
        assert_eq!(results.amortization_table.as_ref().map(Vec::len), Some(360));
        assert_eq!(schedule[0].opening, results.loan_amount);
    }

    #[test]
    fn test_schedule_not_attached_when_disabled() {
        let calculator = Calculator::new(PartnerConfig {
            enable_amortization_table: false,
            max_amortization_months: 120,
            ..Default::default()
        });
        let inputs = calculator.inputs_for(&borrower());

        let (results, schedule) = calculator.calculate_with_schedule(&inputs).unwrap();
        assert!(results.amortization_table.is_none());
        assert_eq!(schedule.len(), 120);
    }

    #[test]
    fn test_batch_preserves_order() {
        let calculator = Calculator::default();
        let ok = calculator.inputs_for(&borrower());
        let mut exhausted = ok.clone();
        exhausted.age = 90;

        let results = calculator.calculate_batch(&[ok, exhausted]);
        assert!(results[0].is_some());
        assert!(results[1].is_none());
    }
}
