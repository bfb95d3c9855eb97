//! Closing costs on top of the purchase price

use serde::{Deserialize, Serialize};

/// Itemized closing costs. Lawyer and broker fees include VAT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosingCosts {
    pub purchase_tax: f64,
    #[serde(rename = "lawyerFeeTTC")]
    pub lawyer_fee_ttc: f64,
    #[serde(rename = "brokerFeeTTC")]
    pub broker_fee_ttc: f64,
    pub advisor_fee: f64,
    pub other_fee: f64,
}

impl ClosingCosts {
    pub fn total(&self) -> f64 {
        self.purchase_tax + self.lawyer_fee_ttc + self.broker_fee_ttc + self.advisor_fee + self.other_fee
    }
}

/// Itemize closing costs for a price.
///
/// Percent arguments use 0-100. VAT applies to the lawyer and broker fees
/// only; advisor and other fees are taken as given.
pub fn closing_cost_breakdown(
    price: f64,
    purchase_tax: f64,
    lawyer_pct: f64,
    broker_pct: f64,
    vat_pct: f64,
    advisor_fee: f64,
    other_fee: f64,
) -> ClosingCosts {
    let vat_factor = 1.0 + vat_pct / 100.0;
    ClosingCosts {
        purchase_tax,
        lawyer_fee_ttc: price * lawyer_pct / 100.0 * vat_factor,
        broker_fee_ttc: price * broker_pct / 100.0 * vat_factor,
        advisor_fee,
        other_fee,
    }
}

/// Total closing costs for a price
pub fn calculate_closing_costs(
    price: f64,
    purchase_tax: f64,
    lawyer_pct: f64,
    broker_pct: f64,
    vat_pct: f64,
    advisor_fee: f64,
    other_fee: f64,
) -> f64 {
    closing_cost_breakdown(
        price,
        purchase_tax,
        lawyer_pct,
        broker_pct,
        vat_pct,
        advisor_fee,
        other_fee,
    )
    .total()
}
