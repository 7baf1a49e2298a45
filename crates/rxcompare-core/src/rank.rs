//! Ordering of enriched pairing lists.

use std::cmp::Ordering;

use rxcompare_contracts::{
    pairing::Pairing,
    request::{SortKey, SortOrder},
};

/// Sort `pairings` in place by `key` and `order`.
///
/// Key extraction:
///
/// - `Medicine` / `Insurance`: lower-cased name;
/// - `Monthly` / `Annual`: cost, with a non-finite value sorting as +∞;
/// - `Savings`: annual savings, with a missing value sorting as −∞.
///
/// The sort is stable. `Desc` reverses the comparison only, so tied rows
/// keep their enumeration order in both directions.
pub fn sort_pairings(pairings: &mut [Pairing], key: SortKey, order: SortOrder) {
    let direct = |ord: Ordering| match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    };

    match key {
        SortKey::Medicine => pairings.sort_by(|a, b| {
            direct(a.medicine_name.to_lowercase().cmp(&b.medicine_name.to_lowercase()))
        }),
        SortKey::Insurance => pairings.sort_by(|a, b| {
            direct(a.insurance_name.to_lowercase().cmp(&b.insurance_name.to_lowercase()))
        }),
        SortKey::Monthly => pairings.sort_by(|a, b| {
            direct(cost_key(a.monthly_cost).total_cmp(&cost_key(b.monthly_cost)))
        }),
        SortKey::Annual => pairings.sort_by(|a, b| {
            direct(cost_key(a.annual_cost).total_cmp(&cost_key(b.annual_cost)))
        }),
        SortKey::Savings => pairings.sort_by(|a, b| {
            direct(savings_key(a.annual_savings).total_cmp(&savings_key(b.annual_savings)))
        }),
    }
}

fn cost_key(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::INFINITY
    }
}

fn savings_key(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(f64::NEG_INFINITY)
}
