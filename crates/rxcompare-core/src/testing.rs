//! In-crate fixture store for unit tests.

use rxcompare_contracts::{
    coverage::CoverageRule,
    medicine::{InsurancePlan, Medicine},
};

use crate::traits::DataStore;

/// A `Vec`-backed store with linear lookups. Good enough for a dozen rows.
pub(crate) struct FixtureStore {
    medicines: Vec<Medicine>,
    plans: Vec<InsurancePlan>,
    rules: Vec<CoverageRule>,
    medicine_names: Vec<String>,
    insurance_names: Vec<String>,
}

impl FixtureStore {
    pub(crate) fn new(medicines: Vec<Medicine>, plans: Vec<InsurancePlan>, rules: Vec<CoverageRule>) -> Self {
        let medicine_names = medicines.iter().map(|m| m.name.clone()).collect();
        let insurance_names = plans.iter().map(|p| p.name.clone()).collect();
        Self { medicines, plans, rules, medicine_names, insurance_names }
    }
}

impl DataStore for FixtureStore {
    fn medicine(&self, name: &str) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.name == name)
    }

    fn insurance(&self, name: &str) -> Option<&InsurancePlan> {
        self.plans.iter().find(|p| p.name == name)
    }

    fn coverage(&self, insurance: &str, medicine: &str) -> Option<&CoverageRule> {
        self.rules
            .iter()
            .find(|r| r.insurance_name == insurance && r.medicine_name == medicine)
    }

    fn medicine_names(&self) -> &[String] {
        &self.medicine_names
    }

    fn insurance_names(&self) -> &[String] {
        &self.insurance_names
    }

    fn coverage_rules(&self) -> &[CoverageRule] {
        &self.rules
    }
}

pub(crate) fn medicine(name: &str, rating: f64, avg: f64, cash: Option<f64>) -> Medicine {
    Medicine {
        name: name.to_string(),
        kind: "Oral".to_string(),
        effectiveness_rating: Some(rating),
        side_effects: "Nausea".to_string(),
        average_cost_per_month: Some(avg),
        goodrx_price: cash,
    }
}

pub(crate) fn plan(name: &str, deductible: Option<f64>) -> InsurancePlan {
    InsurancePlan {
        name: name.to_string(),
        provider: format!("{name} Health"),
        copay_primary_care: Some(20.0),
        copay_specialist: Some(40.0),
        copay_emergency: Some(150.0),
        deductible,
        annual_max_copay: Some(5000.0),
        coverage_percentage: Some(80.0),
    }
}

pub(crate) fn rule(insurance: &str, medicine: &str, covered: &str, copay: Option<f64>, tier: Option<&str>) -> CoverageRule {
    CoverageRule {
        insurance_name: insurance.to_string(),
        medicine_name: medicine.to_string(),
        covered: Some(covered.to_string()),
        copay_amount: copay,
        tier_level: tier.map(str::to_string),
    }
}

/// Four medicines, three plans, seven rules.
///
/// - Metformin: avg 4, no cash price, rating 7.
/// - Glipizide: avg 10, cash 8, rating 6.5.
/// - Januvia: avg 480, cash 25, rating 7.5.
/// - Empagliflozin: avg 560, no cash price, rating 8, no coverage rules.
/// - Cigna (deductible 100), Aetna (deductible 250), Medicaid DC (no deductible).
pub(crate) fn fixture_store() -> FixtureStore {
    FixtureStore::new(
        vec![
            medicine("Metformin", 7.0, 4.0, None),
            medicine("Glipizide", 6.5, 10.0, Some(8.0)),
            medicine("Januvia", 7.5, 480.0, Some(25.0)),
            medicine("Empagliflozin", 8.0, 560.0, None),
        ],
        vec![
            plan("Cigna", Some(100.0)),
            plan("Aetna", Some(250.0)),
            plan("Medicaid DC", None),
        ],
        vec![
            rule("Cigna", "Metformin", "Yes", Some(10.0), Some("Tier 1")),
            rule("Cigna", "Glipizide", "No", Some(15.0), Some("Tier 2")),
            rule("Cigna", "Januvia", "Yes", Some(47.0), Some("Tier 3")),
            rule("Aetna", "Metformin", "Yes", Some(5.0), Some("Tier 1")),
            rule("Aetna", "Januvia", "No", None, Some("Non-formulary")),
            rule("Medicaid DC", "Metformin", " yes ", None, Some("Tier 1")),
            rule("Medicaid DC", "Januvia", "Yes", Some(4.0), Some("Tier 2")),
        ],
    )
}
