//! Configuration schema.
//!
//! Example:
//! ```toml
//! cash_channel_label = "GoodRx (CVS - DC)"
//! trial_sequence = ["Metformin", "Glipizide", "Januvia"]
//!
//! [data]
//! medicines = "medicines.csv"
//! insurance = "insurance.csv"
//! coverage  = "insurance_medicine_coverage.csv"
//!
//! [[unauthorized_costs]]
//! insurance = "Cigna"
//! medicine  = "Januvia"
//! annual    = 721.0
//! ```
//!
//! Every key is optional. An omitted `unauthorized_costs` means no
//! overrides, not the built-in ones.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rxcompare_contracts::settings::{DEFAULT_CASH_CHANNEL_LABEL, DEFAULT_TRIAL_SEQUENCE};

fn default_cash_channel_label() -> String {
    DEFAULT_CASH_CHANNEL_LABEL.to_string()
}

fn default_trial_sequence() -> Vec<String> {
    DEFAULT_TRIAL_SEQUENCE.iter().map(|s| s.to_string()).collect()
}

/// Top-level comparator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparatorConfig {
    /// Shown as the plan name of the injected cash-price row.
    #[serde(default = "default_cash_channel_label")]
    pub cash_channel_label: String,

    /// Questionnaire order. Must not be empty.
    #[serde(default = "default_trial_sequence")]
    pub trial_sequence: Vec<String>,

    #[serde(default)]
    pub data: DataFiles,

    /// Annual prices without prior authorization. Later entries for the
    /// same pair replace earlier ones.
    #[serde(default)]
    pub unauthorized_costs: Vec<UnauthorizedCostEntry>,
}

/// One `[[unauthorized_costs]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnauthorizedCostEntry {
    pub insurance: String,
    pub medicine: String,
    pub annual: f64,
}

/// Locations of the three reference tables.
///
/// Relative paths are resolved against a base directory by
/// [`DataFiles::resolved`]; absolute paths are kept as they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub medicines: PathBuf,
    pub insurance: PathBuf,
    pub coverage: PathBuf,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            medicines: PathBuf::from("medicines.csv"),
            insurance: PathBuf::from("insurance.csv"),
            coverage: PathBuf::from("insurance_medicine_coverage.csv"),
        }
    }
}

impl DataFiles {
    /// Join each path onto `base`.
    pub fn resolved(&self, base: &Path) -> Self {
        Self {
            medicines: base.join(&self.medicines),
            insurance: base.join(&self.insurance),
            coverage: base.join(&self.coverage),
        }
    }
}
