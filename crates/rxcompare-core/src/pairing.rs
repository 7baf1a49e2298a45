//! Pairing enumeration and enrichment.
//!
//! `PairingBuilder::build` expands a selection into rows in a fixed order:
//! outer loop over medicines, inner loop over plans, both in source order.
//! The free functions below enrich an already-built list in place; each one
//! falls back locally so a bad row never aborts the rest.

use tracing::{debug, warn};

use rxcompare_contracts::{
    pairing::{Channel, Pairing},
    settings::UnauthorizedCosts,
};

use crate::{
    cost::{annual_cost, MONTHS_PER_YEAR},
    traits::DataStore,
};

/// Builds pairings against a borrowed store.
pub struct PairingBuilder<'a> {
    store: &'a dyn DataStore,
}

impl<'a> PairingBuilder<'a> {
    pub fn new(store: &'a dyn DataStore) -> Self {
        Self { store }
    }

    /// Expand a selection into pairings.
    ///
    /// - neither side given → every medicine × every plan;
    /// - only a medicine → that medicine × every plan;
    /// - only a plan → every medicine × that plan;
    /// - both → the single pairing.
    ///
    /// When no plan is selected, every row's uninsured baseline prefers the
    /// medicine's cash price. Rows naming an unknown medicine or plan are
    /// skipped.
    pub fn build(&self, medicine: Option<&str>, insurance: Option<&str>) -> Vec<Pairing> {
        let cash_baseline = insurance.is_none();

        let names: Vec<(&str, &str)> = match (medicine, insurance) {
            (None, None) => self
                .store
                .medicine_names()
                .iter()
                .flat_map(|m| {
                    self.store
                        .insurance_names()
                        .iter()
                        .map(move |i| (m.as_str(), i.as_str()))
                })
                .collect(),
            (Some(m), None) => self
                .store
                .insurance_names()
                .iter()
                .map(|i| (m, i.as_str()))
                .collect(),
            (None, Some(i)) => self
                .store
                .medicine_names()
                .iter()
                .map(|m| (m.as_str(), i))
                .collect(),
            (Some(m), Some(i)) => vec![(m, i)],
        };

        let pairings: Vec<Pairing> = names
            .into_iter()
            .filter_map(|(m, i)| self.pair(m, i, cash_baseline))
            .collect();

        debug!(
            medicine = ?medicine,
            insurance = ?insurance,
            rows = pairings.len(),
            "pairings built"
        );

        pairings
    }

    /// Build one insurance-backed row.
    fn pair(&self, medicine_name: &str, insurance_name: &str, cash_baseline: bool) -> Option<Pairing> {
        let Some(medicine) = self.store.medicine(medicine_name) else {
            warn!(medicine = %medicine_name, "unknown medicine; skipping pairing");
            return None;
        };
        let Some(insurance) = self.store.insurance(insurance_name) else {
            warn!(insurance = %insurance_name, "unknown insurance plan; skipping pairing");
            return None;
        };
        let coverage = self.store.coverage(insurance_name, medicine_name);

        let annual = annual_cost(medicine, Some(insurance), coverage);
        let goodrx_price = medicine.cash_price();

        let full_monthly = match goodrx_price {
            Some(cash) if cash_baseline => cash,
            _ => medicine.average_monthly(),
        };
        let full_annual = full_monthly * f64::from(MONTHS_PER_YEAR);

        let copay_amount = coverage.and_then(|c| c.copay_amount).filter(|c| c.is_finite());
        let monthly_savings = copay_amount.map(|copay| full_monthly - copay);

        Some(Pairing {
            medicine_name: medicine_name.to_string(),
            insurance_name: insurance_name.to_string(),
            channel: Channel::Insurance,
            medicine: Some(medicine.clone()),
            insurance: Some(insurance.clone()),
            coverage: coverage.cloned(),
            annual_cost: annual,
            monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
            full_monthly,
            full_annual,
            goodrx_price,
            goodrx_eligible: goodrx_price.is_some(),
            copay_amount,
            monthly_savings,
            annual_savings: Some(full_annual - annual),
            unauth_annual: full_annual,
            is_higher_tier: None,
        })
    }

    /// Build the synthetic cash-price row for `medicine_name`.
    ///
    /// Returns `None` when the medicine is unknown or has no cash price.
    /// The row is not derived from any coverage rule and carries no copay or
    /// savings.
    pub fn cash_pairing(&self, medicine_name: &str, label: &str) -> Option<Pairing> {
        let medicine = self.store.medicine(medicine_name)?;
        let cash = medicine.cash_price()?;

        let annual = annual_cost(medicine, None, None);
        let full_annual = cash * f64::from(MONTHS_PER_YEAR);

        Some(Pairing {
            medicine_name: medicine_name.to_string(),
            insurance_name: label.to_string(),
            channel: Channel::Cash,
            medicine: Some(medicine.clone()),
            insurance: None,
            coverage: None,
            annual_cost: annual,
            monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
            full_monthly: cash,
            full_annual,
            goodrx_price: Some(cash),
            goodrx_eligible: true,
            copay_amount: None,
            monthly_savings: None,
            annual_savings: None,
            unauth_annual: full_annual,
            is_higher_tier: None,
        })
    }
}

/// Set `unauth_annual` from the override table, or to `full_annual` when
/// the pair has no entry.
pub fn apply_unauthorized_costs(pairings: &mut [Pairing], costs: &UnauthorizedCosts) {
    for p in pairings.iter_mut() {
        p.unauth_annual = costs
            .get(&p.insurance_name, &p.medicine_name)
            .unwrap_or(p.full_annual);
    }
}

/// Flag rows whose tier is strictly above the tier of `tried_medicine`
/// under the same row's plan.
///
/// The comparison is per row: the tried medicine's tier is looked up under
/// each row's own plan, not a fixed one. Any missing or unparsable tier on
/// either side yields `Some(false)`.
pub fn flag_higher_tier(pairings: &mut [Pairing], store: &dyn DataStore, tried_medicine: &str) {
    for p in pairings.iter_mut() {
        let tried_tier = store
            .coverage(&p.insurance_name, tried_medicine)
            .and_then(|c| c.tier());
        let row_tier = p.tier();

        p.is_higher_tier = Some(matches!(
            (row_tier, tried_tier),
            (Some(row), Some(tried)) if row > tried
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_store;

    fn names(pairings: &[Pairing]) -> Vec<(String, String)> {
        pairings
            .iter()
            .map(|p| (p.medicine_name.clone(), p.insurance_name.clone()))
            .collect()
    }

    // ── enumeration ──────────────────────────────────────────────────────────

    #[test]
    fn no_selection_builds_full_cross_product_medicine_major() {
        let store = fixture_store();
        let pairings = PairingBuilder::new(&store).build(None, None);

        assert_eq!(pairings.len(), 4 * 3);
        let n = names(&pairings);
        assert_eq!(n[0], ("Metformin".to_string(), "Cigna".to_string()));
        assert_eq!(n[1], ("Metformin".to_string(), "Aetna".to_string()));
        assert_eq!(n[2], ("Metformin".to_string(), "Medicaid DC".to_string()));
        assert_eq!(n[3], ("Glipizide".to_string(), "Cigna".to_string()));
        assert_eq!(n[11], ("Empagliflozin".to_string(), "Medicaid DC".to_string()));
    }

    #[test]
    fn medicine_only_pairs_with_every_plan() {
        let store = fixture_store();
        let pairings = PairingBuilder::new(&store).build(Some("Januvia"), None);

        let plans: Vec<&str> = pairings.iter().map(|p| p.insurance_name.as_str()).collect();
        assert_eq!(plans, vec!["Cigna", "Aetna", "Medicaid DC"]);
        assert!(pairings.iter().all(|p| p.medicine_name == "Januvia"));
    }

    #[test]
    fn insurance_only_pairs_with_every_medicine() {
        let store = fixture_store();
        let pairings = PairingBuilder::new(&store).build(None, Some("Aetna"));

        let meds: Vec<&str> = pairings.iter().map(|p| p.medicine_name.as_str()).collect();
        assert_eq!(meds, vec!["Metformin", "Glipizide", "Januvia", "Empagliflozin"]);
    }

    #[test]
    fn both_selected_builds_single_pairing() {
        let store = fixture_store();
        let pairings = PairingBuilder::new(&store).build(Some("Metformin"), Some("Cigna"));

        assert_eq!(pairings.len(), 1);
        assert_eq!(pairings[0].annual_cost, 220.0);
    }

    #[test]
    fn unknown_names_are_skipped_not_fatal() {
        let store = fixture_store();
        let builder = PairingBuilder::new(&store);

        assert!(builder.build(Some("Insulin Z"), None).is_empty());
        assert!(builder.build(None, Some("Nowhere Mutual")).is_empty());
        assert!(builder.build(Some("Insulin Z"), Some("Cigna")).is_empty());
    }

    // ── derived fields ───────────────────────────────────────────────────────

    #[test]
    fn monthly_cost_is_always_annual_over_twelve() {
        let store = fixture_store();
        for p in PairingBuilder::new(&store).build(None, None) {
            assert_eq!(p.monthly_cost, p.annual_cost / 12.0, "{} / {}", p.medicine_name, p.insurance_name);
        }
    }

    #[test]
    fn annual_savings_is_full_annual_minus_annual_cost() {
        let store = fixture_store();
        for p in PairingBuilder::new(&store).build(None, Some("Cigna")) {
            assert_eq!(p.annual_savings, Some(p.full_annual - p.annual_cost));
        }
    }

    #[test]
    fn missing_copay_leaves_monthly_savings_undefined() {
        let store = fixture_store();
        let pairings = PairingBuilder::new(&store).build(Some("Empagliflozin"), Some("Cigna"));

        assert_eq!(pairings[0].copay_amount, None);
        assert_eq!(pairings[0].monthly_savings, None);
    }

    #[test]
    fn copay_is_read_even_from_uncovered_rules() {
        let store = fixture_store();
        let p = &PairingBuilder::new(&store).build(Some("Glipizide"), Some("Cigna"))[0];

        assert_eq!(p.copay_amount, Some(15.0));
        assert_eq!(p.monthly_savings, Some(10.0 - 15.0));
        // Not covered: priced at the average.
        assert_eq!(p.annual_cost, 120.0);
    }

    #[test]
    fn cash_baseline_applies_only_without_a_selected_plan() {
        let store = fixture_store();
        let builder = PairingBuilder::new(&store);

        let broad = builder.build(Some("Januvia"), None);
        assert!(broad.iter().all(|p| p.full_monthly == 25.0));
        assert!(broad.iter().all(|p| p.goodrx_eligible));

        let narrow = builder.build(Some("Januvia"), Some("Cigna"));
        assert_eq!(narrow[0].full_monthly, 480.0);
        assert_eq!(narrow[0].full_annual, 5760.0);
    }

    // ── cash row ─────────────────────────────────────────────────────────────

    #[test]
    fn cash_pairing_prices_at_cash_times_twelve() {
        let store = fixture_store();
        let cash = PairingBuilder::new(&store)
            .cash_pairing("Januvia", "GoodRx (CVS - DC)")
            .expect("Januvia has a cash price");

        assert!(cash.is_cash());
        assert_eq!(cash.insurance_name, "GoodRx (CVS - DC)");
        assert_eq!(cash.full_annual, 300.0);
        assert_eq!(cash.annual_cost, 300.0);
        assert_eq!(cash.monthly_cost, 25.0);
        assert_eq!(cash.copay_amount, None);
        assert_eq!(cash.monthly_savings, None);
        assert_eq!(cash.annual_savings, None);
        assert!(cash.insurance.is_none());
        assert!(cash.coverage.is_none());
    }

    #[test]
    fn cash_pairing_requires_a_cash_price() {
        let store = fixture_store();
        let builder = PairingBuilder::new(&store);
        assert!(builder.cash_pairing("Metformin", "cash").is_none());
        assert!(builder.cash_pairing("Insulin Z", "cash").is_none());
    }

    // ── unauthorized overrides ───────────────────────────────────────────────

    #[test]
    fn override_table_replaces_full_annual_for_listed_pairs() {
        let store = fixture_store();
        let mut pairings = PairingBuilder::new(&store).build(None, Some("Cigna"));

        let mut costs = UnauthorizedCosts::default();
        costs.insert("Cigna", "Januvia", 721.0);
        apply_unauthorized_costs(&mut pairings, &costs);

        for p in &pairings {
            if p.medicine_name == "Januvia" {
                assert_eq!(p.unauth_annual, 721.0);
            } else {
                assert_eq!(p.unauth_annual, p.full_annual);
            }
        }
    }

    // ── tier flag ────────────────────────────────────────────────────────────

    #[test]
    fn higher_tier_compares_against_tried_medicine_under_each_rows_plan() {
        let store = fixture_store();
        let mut pairings = PairingBuilder::new(&store).build(Some("Januvia"), None);
        flag_higher_tier(&mut pairings, &store, "Metformin");

        let flags: Vec<(&str, Option<bool>)> = pairings
            .iter()
            .map(|p| (p.insurance_name.as_str(), p.is_higher_tier))
            .collect();
        assert_eq!(
            flags,
            vec![
                // Tier 3 vs Tier 1.
                ("Cigna", Some(true)),
                // "Non-formulary" does not parse.
                ("Aetna", Some(false)),
                // Tier 2 vs Tier 1.
                ("Medicaid DC", Some(true)),
            ]
        );
    }

    #[test]
    fn tier_flag_is_false_when_either_side_is_missing() {
        let store = fixture_store();
        let mut pairings = PairingBuilder::new(&store).build(Some("Empagliflozin"), None);
        flag_higher_tier(&mut pairings, &store, "Metformin");
        assert!(pairings.iter().all(|p| p.is_higher_tier == Some(false)));
    }

    #[test]
    fn equal_tiers_are_not_higher() {
        let store = fixture_store();
        let mut pairings = PairingBuilder::new(&store).build(Some("Metformin"), Some("Cigna"));
        flag_higher_tier(&mut pairings, &store, "Metformin");
        assert_eq!(pairings[0].is_higher_tier, Some(false));
    }
}
