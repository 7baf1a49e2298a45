//! Derived comparison rows.
//!
//! A `Pairing` is built fresh for every request, enriched once, and then
//! treated as read-only. It is never persisted.

use serde::{Deserialize, Serialize};

use crate::{
    coverage::{CoverageRule, CoverageStatus},
    medicine::{InsurancePlan, Medicine},
};

/// Where a pairing's price comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// A row priced through an insurance plan (covered or not).
    Insurance,
    /// The synthetic out-of-pocket row injected when a medicine is selected
    /// without a plan and a cash price exists.
    Cash,
}

/// One (medicine, insurance) combination with its computed costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub medicine_name: String,
    /// Plan name, or the cash channel label for [`Channel::Cash`] rows.
    pub insurance_name: String,
    pub channel: Channel,
    pub medicine: Option<Medicine>,
    pub insurance: Option<InsurancePlan>,
    pub coverage: Option<CoverageRule>,
    /// Resolved cost over twelve months.
    pub annual_cost: f64,
    /// Always `annual_cost / 12`.
    pub monthly_cost: f64,
    /// Uninsured monthly baseline used for savings.
    pub full_monthly: f64,
    pub full_annual: f64,
    pub goodrx_price: Option<f64>,
    pub goodrx_eligible: bool,
    pub copay_amount: Option<f64>,
    pub monthly_savings: Option<f64>,
    pub annual_savings: Option<f64>,
    /// Annual price without prior authorization.
    pub unauth_annual: f64,
    /// Set only when the caller has already tried a reference medicine.
    pub is_higher_tier: Option<bool>,
}

impl Pairing {
    /// True for the injected cash-price row.
    pub fn is_cash(&self) -> bool {
        self.channel == Channel::Cash
    }

    /// Coverage signal for this row.
    pub fn coverage_status(&self) -> CoverageStatus {
        CoverageStatus::of(self.coverage.as_ref())
    }

    /// The row's formulary tier, if its coverage rule carries a parsable one.
    pub fn tier(&self) -> Option<i64> {
        self.coverage.as_ref().and_then(CoverageRule::tier)
    }
}

/// The "current selection" card shown above the pairing list when both a
/// medicine and a plan are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSummary {
    pub medicine: Medicine,
    pub insurance: InsurancePlan,
    pub coverage: Option<CoverageRule>,
    pub status: CoverageStatus,
    pub annual_cost: f64,
    pub monthly_cost: f64,
}
