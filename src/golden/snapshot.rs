//! Snapshot capture, persistence and comparison

use super::{GoldenScenario, MONEY_TOLERANCE, RATIO_TOLERANCE};
use crate::amortization::AmortizationSummary;
use crate::calculator::Calculator;
use crate::error::Result;
use crate::solver::RentWarning;
use crate::tax::TaxProfile;
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Default location of the checked-in snapshot
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/golden/snapshot.json";

/// Key figures of one feasible scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFigures {
    pub max_property_value: f64,
    pub loan_amount: f64,
    pub monthly_payment: f64,
    /// Realized LTV as a fraction
    pub ltv_ratio: f64,
    pub purchase_tax: f64,
    pub closing_costs: f64,
    pub rent_income: f64,
    pub total_interest: f64,
    pub loan_term_years: u32,
    pub tax_profile: TaxProfile,
    pub rent_warning: Option<RentWarning>,
    pub schedule_months: u32,
    pub schedule_final_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub scenario: String,
    /// `None` when the scenario has no feasible price
    pub figures: Option<SnapshotFigures>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<SnapshotEntry>,
}

impl Snapshot {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

/// A field that moved beyond tolerance
#[derive(Debug, Clone, PartialEq)]
pub struct Drift {
    pub scenario: String,
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

/// Run every scenario (in parallel) and capture its figures
pub fn take_snapshot(calculator: &Calculator, scenarios: &[GoldenScenario]) -> Snapshot {
    let entries = scenarios
        .par_iter()
        .map(|scenario| {
            let inputs = calculator.inputs_for(&scenario.borrower);
            let figures = calculator
                .calculate_with_schedule(&inputs)
                .map(|(results, schedule)| {
                    let summary = AmortizationSummary::from_rows(&schedule);
                    SnapshotFigures {
                        max_property_value: results.max_property_value,
                        loan_amount: results.loan_amount,
                        monthly_payment: results.monthly_payment,
                        ltv_ratio: results.actual_ltv / 100.0,
                        purchase_tax: results.purchase_tax,
                        closing_costs: results.closing_costs,
                        rent_income: results.rent_income,
                        total_interest: results.total_interest,
                        loan_term_years: results.loan_term_years,
                        tax_profile: results.tax_profile,
                        rent_warning: results.rent_warning,
                        schedule_months: summary.months,
                        schedule_final_balance: summary.final_balance,
                    }
                });
            SnapshotEntry {
                scenario: scenario.name.to_string(),
                figures,
            }
        })
        .collect();

    Snapshot {
        generated_at: Utc::now(),
        entries,
    }
}

/// Every difference between `expected` and `actual` beyond tolerance
pub fn compare_snapshot(expected: &Snapshot, actual: &Snapshot) -> Vec<Drift> {
    let mut drifts = Vec::new();

    for want in &expected.entries {
        let Some(got) = actual.entries.iter().find(|e| e.scenario == want.scenario) else {
            drifts.push(Drift {
                scenario: want.scenario.clone(),
                field: "scenario",
                expected: "present".to_string(),
                actual: "missing".to_string(),
            });
            continue;
        };

        match (&want.figures, &got.figures) {
            (None, None) => {}
            (Some(w), Some(g)) => compare_figures(&want.scenario, w, g, &mut drifts),
            (w, g) => drifts.push(Drift {
                scenario: want.scenario.clone(),
                field: "feasible",
                expected: w.is_some().to_string(),
                actual: g.is_some().to_string(),
            }),
        }
    }

    drifts
}

fn compare_figures(
    scenario: &str,
    want: &SnapshotFigures,
    got: &SnapshotFigures,
    drifts: &mut Vec<Drift>,
) {
    let mut push = |field: &'static str, expected: String, actual: String| {
        drifts.push(Drift {
            scenario: scenario.to_string(),
            field,
            expected,
            actual,
        });
    };

    let money = [
        ("maxPropertyValue", want.max_property_value, got.max_property_value),
        ("loanAmount", want.loan_amount, got.loan_amount),
        ("monthlyPayment", want.monthly_payment, got.monthly_payment),
        ("purchaseTax", want.purchase_tax, got.purchase_tax),
        ("closingCosts", want.closing_costs, got.closing_costs),
        ("rentIncome", want.rent_income, got.rent_income),
        ("totalInterest", want.total_interest, got.total_interest),
        ("scheduleFinalBalance", want.schedule_final_balance, got.schedule_final_balance),
    ];
    for (field, w, g) in money {
        if (w - g).abs() > MONEY_TOLERANCE {
            push(field, format!("{:.2}", w), format!("{:.2}", g));
        }
    }

    if (want.ltv_ratio - got.ltv_ratio).abs() > RATIO_TOLERANCE {
        push(
            "ltvRatio",
            format!("{:.4}", want.ltv_ratio),
            format!("{:.4}", got.ltv_ratio),
        );
    }
    if want.loan_term_years != got.loan_term_years {
        push(
            "loanTermYears",
            want.loan_term_years.to_string(),
            got.loan_term_years.to_string(),
        );
    }
    if want.tax_profile != got.tax_profile {
        push(
            "taxProfile",
            want.tax_profile.as_str().to_string(),
            got.tax_profile.as_str().to_string(),
        );
    }
    if want.rent_warning != got.rent_warning {
        push(
            "rentWarning",
            format!("{:?}", want.rent_warning),
            format!("{:?}", got.rent_warning),
        );
    }
    if want.schedule_months != got.schedule_months {
        push(
            "scheduleMonths",
            want.schedule_months.to_string(),
            got.schedule_months.to_string(),
        );
    }
}
