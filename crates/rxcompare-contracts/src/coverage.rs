//! Coverage rules and formulary tiers.
//!
//! A `CoverageRule` says how one insurance plan treats one medicine. A
//! missing rule and an explicit "No" both price the medicine as uncovered,
//! but the UI distinguishes them through [`CoverageStatus`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One row of the coverage table, keyed by `(insurance_name, medicine_name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRule {
    pub insurance_name: String,
    pub medicine_name: String,
    /// Raw "covered" cell. Usually "Yes" or "No"; anything else is treated
    /// as not covered.
    pub covered: Option<String>,
    /// Per-month copay. Only meaningful when the rule is covered.
    pub copay_amount: Option<f64>,
    /// Ordinal formulary tier such as "Tier 2".
    pub tier_level: Option<String>,
}

impl CoverageRule {
    /// True iff the `covered` cell, trimmed and case-folded, is "yes".
    pub fn is_covered(&self) -> bool {
        self.covered
            .as_deref()
            .map(|c| c.trim().eq_ignore_ascii_case("yes"))
            .unwrap_or(false)
    }

    /// The numeric tier, or `None` when the tier is blank or unparsable.
    pub fn tier(&self) -> Option<i64> {
        self.tier_level.as_deref().and_then(parse_tier)
    }

    /// Project this rule onto a coverage-map cell.
    pub fn cell(&self) -> CoverageCell {
        CoverageCell {
            covered: self.covered.clone(),
            copay_amount: self.copay_amount,
            tier_level: self.tier_level.clone(),
        }
    }
}

/// Parse a tier label such as `"Tier 2"` into its ordinal.
///
/// The label is trimmed and lower-cased, the word "tier" is removed, and the
/// remainder must be an integer. Returns `None` for anything else.
pub fn parse_tier(label: &str) -> Option<i64> {
    let lowered = label.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }
    lowered.replace("tier", "").trim().parse::<i64>().ok()
}

/// Three-way coverage signal for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// A rule exists and marks the medicine as covered.
    Covered,
    /// A rule exists and does not mark the medicine as covered.
    NotCovered,
    /// No rule exists for the pair.
    Unlisted,
}

impl CoverageStatus {
    /// Classify an optional rule.
    pub fn of(rule: Option<&CoverageRule>) -> Self {
        match rule {
            Some(r) if r.is_covered() => CoverageStatus::Covered,
            Some(_) => CoverageStatus::NotCovered,
            None => CoverageStatus::Unlisted,
        }
    }

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            CoverageStatus::Covered => "Yes",
            CoverageStatus::NotCovered => "No",
            CoverageStatus::Unlisted => "Not specifically listed (likely not covered)",
        }
    }
}

/// One cell of the coverage map handed to presentation code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageCell {
    pub covered: Option<String>,
    pub copay_amount: Option<f64>,
    pub tier_level: Option<String>,
}

/// `medicine_name → insurance_name → cell`, covering every rule in the table.
pub type CoverageMap = BTreeMap<String, BTreeMap<String, CoverageCell>>;
