//! Input checks run by callers before the solver is invoked

use super::CalculatorInputs;
use serde::Serialize;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Collect every contract violation in the inputs.
///
/// An empty result means the inputs are safe to hand to the solver.
pub fn validate_inputs(inputs: &CalculatorInputs) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut check = |condition: bool, field: &str, msg: &str| {
        if condition {
            errors.push(ValidationError {
                field: field.to_string(),
                message: msg.to_string(),
            });
        }
    };

    let amounts = [
        ("equity", inputs.equity),
        ("netIncome", inputs.net_income),
        ("advisorFee", inputs.advisor_fee),
        ("otherFee", inputs.other_fee),
    ];
    for (field, value) in amounts {
        check(!value.is_finite(), field, "must be a finite number");
        check(value < 0.0, field, "must not be negative");
    }

    let percents = [
        ("ltv", inputs.ltv),
        ("ratio", inputs.ratio),
        ("interest", inputs.interest),
        ("rentalYield", inputs.rental_yield),
        ("rentRecognition", inputs.rent_recognition),
        ("lawyerPct", inputs.lawyer_pct),
        ("brokerPct", inputs.broker_pct),
        ("vatPct", inputs.vat_pct),
    ];
    for (field, value) in percents {
        check(
            !value.is_finite() || !(0.0..=100.0).contains(&value),
            field,
            "must be a percentage between 0 and 100",
        );
    }

    if let Some(cap) = inputs.budget_cap {
        check(!cap.is_finite(), "budgetCap", "must be a finite number");
    }
    if let Some(rent) = inputs.expected_rent {
        check(!rent.is_finite(), "expectedRent", "must be a finite number");
        check(rent < 0.0, "expectedRent", "must not be negative");
    }

    check(
        inputs.age < 18 || inputs.age > 120,
        "age",
        "must be between 18 and 120",
    );
    check(inputs.max_age == 0, "maxAge", "must be positive");

    errors
}
