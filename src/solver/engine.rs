//! Bisection search for the maximum affordable purchase price

use super::factor::amortization_factor;
use super::rent::{monthly_rent, RentWarningPolicy};
use super::results::CalculatorResults;
use crate::borrower::CalculatorInputs;
use crate::tax::{closing_cost_breakdown, compute_purchase_tax, ClosingCosts, TaxProfile};

/// Monetary tolerance of the search
pub const DEFAULT_TOLERANCE: f64 = 100.0;

/// Hard cap on bisection steps
pub const DEFAULT_MAX_ITERATIONS: u32 = 50;

/// Initial search ceiling as a multiple of equity
pub const DEFAULT_CEILING_MULTIPLE: f64 = 20.0;

/// Tuning for the price search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Stop once the bracket is this narrow; also the slack on the equity test
    pub tolerance: f64,

    /// Stop after this many bisection steps regardless of width
    pub max_iterations: u32,

    /// Search starts on `[0, equity * ceiling_multiple]`
    pub ceiling_multiple: f64,

    /// Times the ceiling may double while it is still affordable
    pub max_ceiling_expansions: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            ceiling_multiple: DEFAULT_CEILING_MULTIPLE,
            max_ceiling_expansions: 16,
        }
    }
}

/// Diagnostics of a search, alongside its result
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub results: Option<CalculatorResults>,
    pub iterations: u32,
    /// Whether the bracket narrowed below the tolerance
    pub converged: bool,
    /// Ceiling after any expansion
    pub search_ceiling: f64,
    pub ceiling_expansions: u32,
    /// `[low, high]` when the search stopped
    pub final_bracket: (f64, f64),
}

/// Every constraint evaluated at one candidate price
#[derive(Debug, Clone, Copy)]
struct Candidate {
    price: f64,
    closing: ClosingCosts,
    monthly_rent: f64,
    max_loan: f64,
    required_equity: f64,
}

/// Price search bound to a tuning and an optional rent-warning policy
#[derive(Debug, Clone, Default)]
pub struct BudgetSolver {
    config: SolverConfig,
    rent_policy: Option<RentWarningPolicy>,
}

impl BudgetSolver {
    pub fn new(config: SolverConfig, rent_policy: Option<RentWarningPolicy>) -> Self {
        Self { config, rent_policy }
    }

    /// Maximum affordable price, or `None` when no price passes the equity test
    pub fn solve(
        &self,
        inputs: &CalculatorInputs,
        tax_profile: TaxProfile,
        amortization_factor: f64,
        term_months: u32,
    ) -> Option<CalculatorResults> {
        self.solve_with_diagnostics(inputs, tax_profile, amortization_factor, term_months)
            .results
    }

    pub fn solve_with_diagnostics(
        &self,
        inputs: &CalculatorInputs,
        tax_profile: TaxProfile,
        amortization_factor: f64,
        term_months: u32,
    ) -> SolveOutcome {
        let tolerance = self.config.tolerance;

        let mut low = 0.0;
        let mut high = inputs.equity * self.config.ceiling_multiple;

        // Low-equity, high-LTV inputs can afford more than the initial ceiling
        let mut ceiling_expansions = 0;
        while high > 0.0
            && ceiling_expansions < self.config.max_ceiling_expansions
            && self.is_affordable(&self.evaluate(inputs, tax_profile, amortization_factor, high), inputs)
        {
            high *= 2.0;
            ceiling_expansions += 1;
            log::debug!("Search ceiling still affordable, expanded to {:.0}", high);
        }
        let search_ceiling = high;

        let mut best: Option<Candidate> = None;
        let mut iterations = 0;

        while high - low > tolerance && iterations < self.config.max_iterations {
            iterations += 1;
            let price = (low + high) / 2.0;
            let candidate = self.evaluate(inputs, tax_profile, amortization_factor, price);
            let affordable = self.is_affordable(&candidate, inputs);

            log::debug!(
                "iter {:>2}: price={:.0} required_equity={:.0} max_loan={:.0} affordable={}",
                iterations,
                price,
                candidate.required_equity,
                candidate.max_loan,
                affordable
            );

            if affordable {
                best = Some(candidate);
                low = price;
            } else {
                high = price;
            }
        }

        let converged = high - low <= tolerance;
        if !converged {
            log::warn!(
                "Price search stopped after {} iterations with bracket [{:.0}, {:.0}]",
                iterations,
                low,
                high
            );
        }

        let results = best.map(|candidate| {
            self.build_results(inputs, tax_profile, amortization_factor, term_months, &candidate)
        });

        match &results {
            Some(r) => log::info!(
                "Max property value {:.0} (loan {:.0}, LTV {:.2}%, payment {:.0}/month) in {} iterations",
                r.max_property_value,
                r.loan_amount,
                r.actual_ltv,
                r.monthly_payment,
                iterations
            ),
            None => log::info!("No affordable price found in {} iterations", iterations),
        }

        SolveOutcome {
            results,
            iterations,
            converged,
            search_ceiling,
            ceiling_expansions,
            final_bracket: (low, high),
        }
    }

    fn evaluate(
        &self,
        inputs: &CalculatorInputs,
        tax_profile: TaxProfile,
        amortization_factor: f64,
        price: f64,
    ) -> Candidate {
        let purchase_tax = compute_purchase_tax(price, tax_profile);
        let closing = closing_cost_breakdown(
            price,
            purchase_tax,
            inputs.lawyer_pct,
            inputs.broker_pct,
            inputs.vat_pct,
            inputs.advisor_fee,
            inputs.other_fee,
        );

        let rent = monthly_rent(inputs, price);
        let recognized_rent = rent * inputs.rent_recognition / 100.0;

        let income_max_payment = (inputs.net_income + recognized_rent) * inputs.ratio / 100.0;
        let max_payment = match inputs.effective_budget_cap() {
            Some(cap) => income_max_payment.min(cap),
            None => income_max_payment,
        };

        let max_loan_by_payment = max_payment / amortization_factor;
        let max_loan_by_ltv = price * inputs.ltv / 100.0;
        let max_loan = max_loan_by_payment.min(max_loan_by_ltv);

        Candidate {
            price,
            closing,
            monthly_rent: rent,
            max_loan,
            required_equity: price + closing.total() - max_loan,
        }
    }

    fn is_affordable(&self, candidate: &Candidate, inputs: &CalculatorInputs) -> bool {
        candidate.required_equity <= inputs.equity + self.config.tolerance
    }

    fn build_results(
        &self,
        inputs: &CalculatorInputs,
        tax_profile: TaxProfile,
        amortization_factor: f64,
        term_months: u32,
        candidate: &Candidate,
    ) -> CalculatorResults {
        let price = candidate.price;
        let loan_amount = candidate.max_loan;
        let closing_costs = candidate.closing.total();
        let monthly_payment = loan_amount * amortization_factor;
        let total_interest = (monthly_payment * term_months as f64 - loan_amount).max(0.0);
        let equity_used = price + closing_costs - loan_amount;

        let rent_warning = self
            .rent_policy
            .and_then(|policy| policy.evaluate(inputs, price));
        if let Some(warning) = rent_warning {
            log::warn!(
                "Rent {:.0}/month flagged {:?} against market estimate at price {:.0}",
                candidate.monthly_rent,
                warning,
                price
            );
        }

        CalculatorResults {
            max_property_value: price,
            loan_amount,
            actual_ltv: if price > 0.0 { loan_amount / price * 100.0 } else { 0.0 },
            monthly_payment,
            rent_income: candidate.monthly_rent,
            net_payment: monthly_payment - candidate.monthly_rent,
            closing_costs,
            total_interest,
            total_cost: price + closing_costs + total_interest,
            loan_term_years: term_months / 12,
            purchase_tax: candidate.closing.purchase_tax,
            tax_profile,
            equity_used,
            equity_remaining: (inputs.equity - equity_used).max(0.0),
            lawyer_fee_ttc: candidate.closing.lawyer_fee_ttc,
            broker_fee_ttc: candidate.closing.broker_fee_ttc,
            rent_warning,
            amortization_table: None,
        }
    }
}

/// Solve with default tuning and no rent warning.
///
/// `amortization_factor` must come from the same rate and `term_months`.
pub fn solve_maximum_budget(
    inputs: &CalculatorInputs,
    tax_profile: TaxProfile,
    amortization_factor: f64,
    term_months: u32,
) -> Option<CalculatorResults> {
    BudgetSolver::default().solve(inputs, tax_profile, amortization_factor, term_months)
}

/// Convenience for callers holding only a rate and term
pub fn factor_for(inputs: &CalculatorInputs, term_months: u32) -> f64 {
    amortization_factor(inputs.interest, term_months)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BorrowerProfile, PartnerConfig};
    use approx::assert_abs_diff_eq;

    fn inputs(equity: f64, net_income: f64) -> CalculatorInputs {
        BorrowerProfile {
            equity,
            net_income,
            age: 30,
            is_first_property: true,
            is_israeli_tax_resident: true,
            ..Default::default()
        }
        .to_inputs(&PartnerConfig::default())
    }

    fn solve(inputs: &CalculatorInputs) -> SolveOutcome {
        let factor = factor_for(inputs, 360);
        BudgetSolver::default().solve_with_diagnostics(inputs, inputs.tax_profile(), factor, 360)
    }

    #[test]
    fn test_converges_within_iteration_cap() {
        let outcome = solve(&inputs(1_500_000.0, 30_000.0));
        assert!(outcome.converged);
        assert!(outcome.iterations <= DEFAULT_MAX_ITERATIONS);
        assert_eq!(outcome.ceiling_expansions, 0);

        let (low, high) = outcome.final_bracket;
        assert!(high - low <= DEFAULT_TOLERANCE);
        assert_eq!(outcome.results.unwrap().max_property_value, low);
    }

    #[test]
    fn test_iteration_cap_leaves_wide_bracket() {
        let inputs = inputs(1_500_000.0, 30_000.0);
        let solver = BudgetSolver::new(
            SolverConfig {
                max_iterations: 3,
                ..Default::default()
            },
            None,
        );
        let outcome = solver.solve_with_diagnostics(
            &inputs,
            inputs.tax_profile(),
            factor_for(&inputs, 360),
            360,
        );
        assert_eq!(outcome.iterations, 3);
        assert!(!outcome.converged);
        let (low, high) = outcome.final_bracket;
        assert_abs_diff_eq!(high - low, outcome.search_ceiling / 8.0, epsilon = 1e-6);
    }

    #[test]
    fn test_free_function_matches_default_solver() {
        let mut rented = inputs(1_500_000.0, 20_000.0);
        rented.is_rented = true;
        rented.expected_rent = Some(40_000.0);
        let factor = amortization_factor(rented.interest, 360);

        let direct = solve_maximum_budget(&rented, rented.tax_profile(), factor, 360).unwrap();
        let solver = BudgetSolver::default()
            .solve(&rented, rented.tax_profile(), factor, 360)
            .unwrap();
        assert_eq!(direct, solver);
        // No rent policy, so even an implausible rent is not flagged
        assert_eq!(direct.rent_warning, None);
        assert_eq!(direct.loan_term_months(), 360);

        let mut broke = inputs(5_000.0, 30_000.0);
        broke.advisor_fee = 9_000.0;
        broke.other_fee = 3_000.0;
        let factor = amortization_factor(broke.interest, 360);
        assert!(solve_maximum_budget(&broke, broke.tax_profile(), factor, 360).is_none());
    }

    #[test]
    fn test_equity_constraint_tight_at_solution() {
        let inputs = inputs(1_500_000.0, 30_000.0);
        let results = solve(&inputs).results.unwrap();
        assert!(results.equity_used <= inputs.equity + DEFAULT_TOLERANCE);
        // The next tolerance step up is unaffordable, so equity is nearly exhausted
        assert!(results.equity_used > inputs.equity - 2_000.0);
    }

    #[test]
    fn test_fees_exceeding_equity_is_infeasible() {
        let mut inputs = inputs(5_000.0, 30_000.0);
        inputs.advisor_fee = 9_000.0;
        inputs.other_fee = 3_000.0;
        assert!(solve(&inputs).results.is_none());
    }

    #[test]
    fn test_zero_equity_is_infeasible() {
        let outcome = solve(&inputs(0.0, 30_000.0));
        assert!(outcome.results.is_none());
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn test_ceiling_expands_when_affordable() {
        // Full financing, no fees, huge income: the initial ceiling is affordable
        let mut inputs = inputs(10_000.0, 10_000_000.0);
        inputs.ltv = 100.0;
        inputs.lawyer_pct = 0.0;
        inputs.broker_pct = 0.0;
        inputs.advisor_fee = 0.0;
        inputs.other_fee = 0.0;
        inputs.is_israeli_tax_resident = true;

        let outcome = solve(&inputs);
        assert!(outcome.ceiling_expansions > 0);
        assert!(outcome.search_ceiling > inputs.equity * DEFAULT_CEILING_MULTIPLE);
        let results = outcome.results.unwrap();
        assert!(results.max_property_value > inputs.equity * DEFAULT_CEILING_MULTIPLE);
    }

    #[test]
    fn test_results_are_internally_consistent() {
        let inputs = inputs(2_000_000.0, 35_000.0);
        let results = solve(&inputs).results.unwrap();

        assert_abs_diff_eq!(
            results.closing_costs,
            results.purchase_tax
                + results.lawyer_fee_ttc
                + results.broker_fee_ttc
                + inputs.advisor_fee
                + inputs.other_fee,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            results.total_cost,
            results.max_property_value + results.closing_costs + results.total_interest,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            results.equity_used,
            results.max_property_value + results.closing_costs - results.loan_amount,
            epsilon = 1e-6
        );
        assert_eq!(results.loan_term_years, 30);
        assert_eq!(results.rent_income, 0.0);
        assert_eq!(results.net_payment, results.monthly_payment);
        assert!(results.amortization_table.is_none());
    }
}
