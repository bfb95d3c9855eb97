//! Loan term and level-payment amortization factor

/// Years available for the loan, or `None` when the borrower has already
/// reached the maximum age.
pub fn loan_term_years(max_loan_term_years: u32, age: u32, max_age: u32) -> Option<u32> {
    let remaining = i64::from(max_age) - i64::from(age);
    let years = i64::from(max_loan_term_years).min(remaining);
    if years <= 0 {
        None
    } else {
        u32::try_from(years).ok()
    }
}

/// Monthly rate from an annual percent
pub fn monthly_rate(annual_interest_percent: f64) -> f64 {
    annual_interest_percent / 100.0 / 12.0
}

/// Payment per unit of principal over `months` level payments.
///
/// A zero rate degenerates to straight-line repayment (`1 / n`).
pub fn amortization_factor(annual_interest_percent: f64, months: u32) -> f64 {
    let n = months as f64;
    let rate = monthly_rate(annual_interest_percent);
    if rate == 0.0 {
        1.0 / n
    } else {
        rate / (1.0 - (1.0 + rate).powf(-n))
    }
}
