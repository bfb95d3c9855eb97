//! Progressive purchase-tax brackets

use super::TaxProfile;

/// One marginal bracket. `max` is `f64::INFINITY` for the top bracket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub min: f64,
    pub max: f64,
    /// Marginal rate as a fraction
    pub rate: f64,
}

/// Ordered brackets covering `[0, inf)` with no gaps
#[derive(Debug, Clone, Copy)]
pub struct BracketSchedule {
    brackets: &'static [TaxBracket],
}

impl BracketSchedule {
    pub fn brackets(&self) -> &'static [TaxBracket] {
        self.brackets
    }

    /// Thresholds where the marginal rate changes
    pub fn boundaries(&self) -> impl Iterator<Item = f64> + '_ {
        self.brackets.iter().skip(1).map(|b| b.min)
    }

    /// Marginal rate applying just above `price`
    pub fn marginal_rate(&self, price: f64) -> f64 {
        self.brackets
            .iter()
            .find(|b| price >= b.min && price < b.max)
            .map(|b| b.rate)
            .unwrap_or(0.0)
    }

    /// Sum `rate * (min(price, max) - min)` over every bracket starting below `price`
    pub fn tax_for(&self, price: f64) -> f64 {
        let mut tax = 0.0;
        for bracket in self.brackets {
            if bracket.min >= price {
                break;
            }
            tax += bracket.rate * (price.min(bracket.max) - bracket.min);
        }
        tax
    }
}

pub(super) static SINGLE_HOME: BracketSchedule = BracketSchedule {
    brackets: &[
        TaxBracket { min: 0.0, max: 1_978_745.0, rate: 0.0 },
        TaxBracket { min: 1_978_745.0, max: 2_347_040.0, rate: 0.035 },
        TaxBracket { min: 2_347_040.0, max: 6_055_070.0, rate: 0.05 },
        TaxBracket { min: 6_055_070.0, max: 20_183_565.0, rate: 0.08 },
        TaxBracket { min: 20_183_565.0, max: f64::INFINITY, rate: 0.10 },
    ],
};

pub(super) static INVESTOR: BracketSchedule = BracketSchedule {
    brackets: &[
        TaxBracket { min: 0.0, max: 6_055_070.0, rate: 0.08 },
        TaxBracket { min: 6_055_070.0, max: f64::INFINITY, rate: 0.10 },
    ],
};

/// Purchase tax owed on `price` under `profile`
pub fn compute_purchase_tax(price: f64, profile: TaxProfile) -> f64 {
    profile.schedule().tax_for(price)
}
