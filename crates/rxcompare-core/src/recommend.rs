//! Point comparisons and cheaper-alternative suggestions.
//!
//! Unlike the pairing builder, these are explicit queries about a named
//! medicine or plan, so an unknown name is an error rather than a skipped row.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::debug;

use rxcompare_contracts::{
    coverage::{CoverageRule, CoverageStatus},
    error::{CompareError, CompareResult},
    medicine::{InsurancePlan, Medicine},
};

use crate::{
    cost::{annual_cost, MONTHS_PER_YEAR},
    traits::DataStore,
};

/// Longest alternatives list returned by [`recommend`].
pub const MAX_ALTERNATIVES: usize = 5;

/// Effectiveness an alternative medicine may give up relative to the current one.
pub const EFFECTIVENESS_TOLERANCE: f64 = 1.0;

/// One medicine priced under a fixed plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicineCost {
    pub medicine: Medicine,
    pub coverage: Option<CoverageRule>,
    pub status: CoverageStatus,
    pub annual_cost: f64,
    pub monthly_cost: f64,
}

/// One plan pricing a fixed medicine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanCost {
    pub insurance: InsurancePlan,
    pub coverage: Option<CoverageRule>,
    pub status: CoverageStatus,
    pub annual_cost: f64,
    pub monthly_cost: f64,
}

/// A candidate replacement for the current medicine or plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub medicine_name: String,
    pub insurance_name: String,
    pub annual_cost: f64,
    /// Current annual cost minus this alternative's. Negative means the
    /// alternative costs more.
    pub savings: f64,
}

/// Output of [`recommend`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub medicine: String,
    pub insurance: String,
    pub current_annual_cost: f64,
    pub alternative_medicines: Vec<Alternative>,
    pub alternative_plans: Vec<Alternative>,
}

fn lookup_medicine<'s>(store: &'s dyn DataStore, name: &str) -> CompareResult<&'s Medicine> {
    store.medicine(name).ok_or_else(|| CompareError::UnknownMedicine {
        name: name.to_string(),
    })
}

fn lookup_insurance<'s>(store: &'s dyn DataStore, name: &str) -> CompareResult<&'s InsurancePlan> {
    store.insurance(name).ok_or_else(|| CompareError::UnknownInsurance {
        name: name.to_string(),
    })
}

fn by_annual_cost(a: f64, b: f64) -> Ordering {
    let key = |v: f64| if v.is_finite() { v } else { f64::INFINITY };
    key(a).total_cmp(&key(b))
}

/// Price every medicine (except `exclude`) under `insurance`, cheapest first.
pub fn compare_medicines(
    store: &dyn DataStore,
    insurance: &str,
    exclude: Option<&str>,
) -> CompareResult<Vec<MedicineCost>> {
    let plan = lookup_insurance(store, insurance)?;

    let mut rows: Vec<MedicineCost> = store
        .medicine_names()
        .iter()
        .filter(|name| Some(name.as_str()) != exclude)
        .filter_map(|name| store.medicine(name))
        .map(|medicine| {
            let coverage = store.coverage(insurance, &medicine.name);
            let annual = annual_cost(medicine, Some(plan), coverage);
            MedicineCost {
                medicine: medicine.clone(),
                coverage: coverage.cloned(),
                status: CoverageStatus::of(coverage),
                annual_cost: annual,
                monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
            }
        })
        .collect();

    rows.sort_by(|a, b| by_annual_cost(a.annual_cost, b.annual_cost));
    Ok(rows)
}

/// Price `medicine` under every plan (except `exclude`), cheapest first.
pub fn compare_insurance_plans(
    store: &dyn DataStore,
    medicine: &str,
    exclude: Option<&str>,
) -> CompareResult<Vec<PlanCost>> {
    let med = lookup_medicine(store, medicine)?;

    let mut rows: Vec<PlanCost> = store
        .insurance_names()
        .iter()
        .filter(|name| Some(name.as_str()) != exclude)
        .filter_map(|name| store.insurance(name))
        .map(|plan| {
            let coverage = store.coverage(&plan.name, medicine);
            let annual = annual_cost(med, Some(plan), coverage);
            PlanCost {
                insurance: plan.clone(),
                coverage: coverage.cloned(),
                status: CoverageStatus::of(coverage),
                annual_cost: annual,
                monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
            }
        })
        .collect();

    rows.sort_by(|a, b| by_annual_cost(a.annual_cost, b.annual_cost));
    Ok(rows)
}

/// Suggest comparable medicines under the current plan and other plans for
/// the current medicine.
///
/// A medicine is comparable when its rating is at least the current rating
/// minus [`EFFECTIVENESS_TOLERANCE`]; a missing rating on either side is
/// never comparable. Both lists are ordered by savings, largest first, and
/// cut to [`MAX_ALTERNATIVES`].
pub fn recommend(store: &dyn DataStore, medicine: &str, insurance: &str) -> CompareResult<Recommendations> {
    let med = lookup_medicine(store, medicine)?;
    let plan = lookup_insurance(store, insurance)?;
    let current = annual_cost(med, Some(plan), store.coverage(insurance, medicine));

    let floor = med.effectiveness_rating.map(|r| r - EFFECTIVENESS_TOLERANCE);

    let mut alternative_medicines: Vec<Alternative> = store
        .medicine_names()
        .iter()
        .filter(|name| name.as_str() != medicine)
        .filter_map(|name| store.medicine(name))
        .filter(|candidate| match (candidate.effectiveness_rating, floor) {
            (Some(rating), Some(floor)) => rating >= floor,
            _ => false,
        })
        .map(|candidate| {
            let cost = annual_cost(candidate, Some(plan), store.coverage(insurance, &candidate.name));
            Alternative {
                medicine_name: candidate.name.clone(),
                insurance_name: insurance.to_string(),
                annual_cost: cost,
                savings: current - cost,
            }
        })
        .collect();

    let mut alternative_plans: Vec<Alternative> = store
        .insurance_names()
        .iter()
        .filter(|name| name.as_str() != insurance)
        .filter_map(|name| store.insurance(name))
        .map(|other| {
            let cost = annual_cost(med, Some(other), store.coverage(&other.name, medicine));
            Alternative {
                medicine_name: medicine.to_string(),
                insurance_name: other.name.clone(),
                annual_cost: cost,
                savings: current - cost,
            }
        })
        .collect();

    for list in [&mut alternative_medicines, &mut alternative_plans] {
        list.sort_by(|a, b| b.savings.total_cmp(&a.savings));
        list.truncate(MAX_ALTERNATIVES);
    }

    debug!(
        medicine = %medicine,
        insurance = %insurance,
        current_annual_cost = current,
        medicines = alternative_medicines.len(),
        plans = alternative_plans.len(),
        "recommendations computed"
    );

    Ok(Recommendations {
        medicine: medicine.to_string(),
        insurance: insurance.to_string(),
        current_annual_cost: current,
        alternative_medicines,
        alternative_plans,
    })
}
