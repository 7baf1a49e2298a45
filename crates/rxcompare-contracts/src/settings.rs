//! Static comparison settings supplied at startup.
//!
//! These are plain values. `rxcompare-config` builds them from TOML; tests
//! and embedders may construct them directly.

use std::collections::HashMap;

/// Label used for the injected cash-price row when none is configured.
pub const DEFAULT_CASH_CHANNEL_LABEL: &str = "GoodRx (CVS - DC)";

/// Questionnaire order used when none is configured.
pub const DEFAULT_TRIAL_SEQUENCE: [&str; 7] = [
    "Metformin",
    "Glipizide",
    "Invokana",
    "Januvia",
    "Tirzepatide",
    "Semaglutide",
    "Jardiance",
];

/// Known annual prices without prior authorization, keyed by
/// `(insurance_name, medicine_name)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnauthorizedCosts {
    inner: HashMap<(String, String), f64>,
}

impl UnauthorizedCosts {
    /// Record an override. A later insert for the same pair replaces the
    /// earlier one.
    pub fn insert(&mut self, insurance: impl Into<String>, medicine: impl Into<String>, annual: f64) {
        self.inner.insert((insurance.into(), medicine.into()), annual);
    }

    /// The override for this pair, if any. Non-finite entries are ignored.
    pub fn get(&self, insurance: &str, medicine: &str) -> Option<f64> {
        self.inner
            .get(&(insurance.to_string(), medicine.to_string()))
            .copied()
            .filter(|v| v.is_finite())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Everything the comparator needs besides the reference tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Ordered medicine names for the "have you tried" questionnaire.
    pub trial_sequence: Vec<String>,
    pub unauthorized_costs: UnauthorizedCosts,
    /// `insurance_name` shown on the injected cash-price row.
    pub cash_channel_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        let mut unauthorized_costs = UnauthorizedCosts::default();
        unauthorized_costs.insert("Cigna", "Empagliflozin", 811.0);
        unauthorized_costs.insert("Cigna", "Januvia", 721.0);

        Self {
            trial_sequence: DEFAULT_TRIAL_SEQUENCE.iter().map(|s| s.to_string()).collect(),
            unauthorized_costs,
            cash_channel_label: DEFAULT_CASH_CHANNEL_LABEL.to_string(),
        }
    }
}
