//! Medicine and insurance plan reference records.
//!
//! Both are immutable once loaded. Numeric fields are `Option<f64>` because
//! the source tables may leave them blank; see [`crate::coerce`].

use serde::{Deserialize, Serialize};

use crate::coerce::or_zero;

/// One row of the medicines table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    /// Unique key, e.g. "Metformin".
    pub name: String,
    /// Drug class, e.g. "Biguanide".
    #[serde(rename = "type")]
    pub kind: String,
    /// Effectiveness on a 0–10 scale.
    pub effectiveness_rating: Option<f64>,
    pub side_effects: String,
    /// List price per month without insurance.
    pub average_cost_per_month: Option<f64>,
    /// Discount-card cash price per month. `None` means no cash price is
    /// configured for this medicine.
    pub goodrx_price: Option<f64>,
}

impl Medicine {
    /// The cash price per month, if one is configured and numeric.
    pub fn cash_price(&self) -> Option<f64> {
        self.goodrx_price.filter(|p| p.is_finite())
    }

    /// The average monthly price, with a missing value read as zero.
    pub fn average_monthly(&self) -> f64 {
        or_zero(self.average_cost_per_month)
    }

    /// The effectiveness rating, with a missing value read as zero.
    pub fn effectiveness(&self) -> f64 {
        or_zero(self.effectiveness_rating)
    }
}

/// One row of the insurance plans table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsurancePlan {
    /// Unique key, e.g. "Cigna".
    pub name: String,
    pub provider: String,
    pub copay_primary_care: Option<f64>,
    pub copay_specialist: Option<f64>,
    pub copay_emergency: Option<f64>,
    /// Flat annual deductible added once to a covered medicine's cost.
    pub deductible: Option<f64>,
    pub annual_max_copay: Option<f64>,
    pub coverage_percentage: Option<f64>,
}

impl InsurancePlan {
    /// The deductible, with a missing value read as zero.
    pub fn deductible_or_zero(&self) -> f64 {
        or_zero(self.deductible)
    }
}
