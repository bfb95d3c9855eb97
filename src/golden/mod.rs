//! Golden-reference scenarios
//!
//! A fixed battery of named borrowers is run through the calculator and the
//! key figures are snapshotted to JSON. Later runs must stay within
//! [`MONEY_TOLERANCE`] on monetary fields and [`RATIO_TOLERANCE`] on ratios.

mod snapshot;

pub use snapshot::{
    compare_snapshot, take_snapshot, Drift, Snapshot, SnapshotEntry, SnapshotFigures,
    DEFAULT_SNAPSHOT_PATH,
};

use crate::borrower::BorrowerProfile;

/// Allowed drift on monetary fields
pub const MONEY_TOLERANCE: f64 = 100.0;

/// Allowed drift on ratio fields (fractions)
pub const RATIO_TOLERANCE: f64 = 0.005;

/// A named borrower in the battery
#[derive(Debug, Clone)]
pub struct GoldenScenario {
    pub name: &'static str,
    pub borrower: BorrowerProfile,
}

fn reference_borrower() -> BorrowerProfile {
    BorrowerProfile {
        equity: 3_000_000.0,
        net_income: 40_000.0,
        age: 30,
        is_first_property: true,
        is_israeli_tax_resident: true,
        is_rented: false,
        ltv: Some(75.0),
        ratio: Some(33.0),
        max_age: Some(80),
        interest: Some(5.0),
        lawyer_pct: Some(1.0),
        broker_pct: Some(2.0),
        vat_pct: Some(18.0),
        advisor_fee: Some(9_000.0),
        other_fee: Some(3_000.0),
        ..Default::default()
    }
}

/// The standard battery, in a fixed order
pub fn standard_battery() -> Vec<GoldenScenario> {
    let reference = reference_borrower();

    vec![
        GoldenScenario {
            name: "reference-single-home",
            borrower: reference.clone(),
        },
        GoldenScenario {
            name: "ltv-bound-high-income",
            borrower: BorrowerProfile {
                equity: 1_000_000.0,
                net_income: 200_000.0,
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "income-bound-high-equity",
            borrower: BorrowerProfile {
                net_income: 8_000.0,
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "budget-cap",
            borrower: BorrowerProfile {
                budget_cap: Some(6_000.0),
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "investor-yield-rent",
            borrower: BorrowerProfile {
                equity: 1_500_000.0,
                net_income: 20_000.0,
                is_first_property: false,
                is_rented: true,
                ltv: Some(50.0),
                rental_yield: Some(3.0),
                rent_recognition: Some(80.0),
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "investor-explicit-rent",
            borrower: BorrowerProfile {
                equity: 1_500_000.0,
                net_income: 20_000.0,
                is_first_property: false,
                is_rented: true,
                ltv: Some(50.0),
                rental_yield: Some(3.0),
                rent_recognition: Some(80.0),
                expected_rent: Some(12_000.0),
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "non-resident-first-property",
            borrower: BorrowerProfile {
                equity: 2_000_000.0,
                net_income: 30_000.0,
                is_israeli_tax_resident: false,
                ltv: Some(50.0),
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "zero-interest",
            borrower: BorrowerProfile {
                equity: 1_000_000.0,
                net_income: 15_000.0,
                interest: Some(0.0),
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "late-career-short-term",
            borrower: BorrowerProfile {
                equity: 1_800_000.0,
                net_income: 26_000.0,
                age: 70,
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "age-exhausted",
            borrower: BorrowerProfile {
                age: 80,
                ..reference.clone()
            },
        },
        GoldenScenario {
            name: "fees-exceed-equity",
            borrower: BorrowerProfile {
                equity: 10_000.0,
                ..reference
            },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_battery_names_unique() {
        let battery = standard_battery();
        let names: HashSet<_> = battery.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), battery.len());
    }
}
