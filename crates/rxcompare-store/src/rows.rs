//! Raw CSV rows and their conversion into typed records.
//!
//! Every cell is read as text. Numeric cells go through
//! [`rxcompare_contracts::coerce`] so a blank or malformed value becomes
//! `None` instead of failing the whole load. Missing columns read as blank.

use serde::Deserialize;

use rxcompare_contracts::{
    coerce,
    coverage::CoverageRule,
    medicine::{InsurancePlan, Medicine},
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MedicineRow {
    pub medicine_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub effectiveness_rating: Option<String>,
    pub side_effects: Option<String>,
    pub average_cost_per_month: Option<String>,
    pub goodrx_price: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct InsuranceRow {
    pub insurance_name: Option<String>,
    pub provider: Option<String>,
    pub copay_primary_care: Option<String>,
    pub copay_specialist: Option<String>,
    pub copay_emergency: Option<String>,
    pub deductible: Option<String>,
    pub annual_max_copay: Option<String>,
    pub coverage_percentage: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CoverageRow {
    pub insurance_name: Option<String>,
    pub medicine_name: Option<String>,
    pub covered: Option<String>,
    pub copay_amount: Option<String>,
    pub tier_level: Option<String>,
}

fn num(cell: &Option<String>) -> Option<f64> {
    cell.as_deref().and_then(coerce::number)
}

fn text_or_blank(cell: Option<String>) -> String {
    coerce::text(cell.as_deref()).unwrap_or_default()
}

impl MedicineRow {
    /// `None` when the name cell is blank.
    pub fn into_record(self) -> Option<Medicine> {
        let name = coerce::text(self.medicine_name.as_deref())?;
        Some(Medicine {
            name,
            effectiveness_rating: num(&self.effectiveness_rating),
            average_cost_per_month: num(&self.average_cost_per_month),
            goodrx_price: num(&self.goodrx_price),
            kind: text_or_blank(self.kind),
            side_effects: text_or_blank(self.side_effects),
        })
    }
}

impl InsuranceRow {
    /// `None` when the name cell is blank.
    pub fn into_record(self) -> Option<InsurancePlan> {
        let name = coerce::text(self.insurance_name.as_deref())?;
        Some(InsurancePlan {
            name,
            copay_primary_care: num(&self.copay_primary_care),
            copay_specialist: num(&self.copay_specialist),
            copay_emergency: num(&self.copay_emergency),
            deductible: num(&self.deductible),
            annual_max_copay: num(&self.annual_max_copay),
            coverage_percentage: num(&self.coverage_percentage),
            provider: text_or_blank(self.provider),
        })
    }
}

impl CoverageRow {
    /// `None` when either key cell is blank.
    ///
    /// `covered` and `tier_level` keep their raw text; interpretation
    /// happens on [`CoverageRule`].
    pub fn into_record(self) -> Option<CoverageRule> {
        let insurance_name = coerce::text(self.insurance_name.as_deref())?;
        let medicine_name = coerce::text(self.medicine_name.as_deref())?;
        Some(CoverageRule {
            insurance_name,
            medicine_name,
            copay_amount: num(&self.copay_amount),
            covered: self.covered,
            tier_level: coerce::text(self.tier_level.as_deref()),
        })
    }
}
