//! In-memory implementation of `DataStore`.
//!
//! `InMemoryStore` loads the three CSV tables once, indexes them by name,
//! and is shared read-only across requests afterwards. Source order of
//! medicines and plans is kept alongside the indexes because enumeration
//! order is part of the output contract.

use std::{
    collections::HashMap,
    fs,
    path::Path,
};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use rxcompare_contracts::{
    coverage::CoverageRule,
    error::{CompareError, CompareResult},
    medicine::{InsurancePlan, Medicine},
};
use rxcompare_core::traits::DataStore;

use crate::{
    fingerprint::DatasetFingerprint,
    rows::{CoverageRow, InsuranceRow, MedicineRow},
};

/// Default file name of the medicines table.
pub const MEDICINES_FILE: &str = "medicines.csv";
/// Default file name of the insurance plans table.
pub const INSURANCE_FILE: &str = "insurance.csv";
/// Default file name of the coverage table.
pub const COVERAGE_FILE: &str = "insurance_medicine_coverage.csv";

// ── Parsing ───────────────────────────────────────────────────────────────────

fn parse_rows<R: DeserializeOwned>(table: &str, source: &str) -> CompareResult<Vec<R>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(source.as_bytes());

    reader
        .deserialize()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| CompareError::DataLoad {
                reason: format!("failed to parse {table} row {}: {e}", idx + 1),
            })
        })
        .collect()
}

fn read_source(path: &Path) -> CompareResult<String> {
    fs::read_to_string(path).map_err(|e| CompareError::DataLoad {
        reason: format!("failed to read {}: {e}", path.display()),
    })
}

fn require_rows<T>(table: &str, rows: &[T]) -> CompareResult<()> {
    if rows.is_empty() {
        return Err(CompareError::EmptyDataset {
            table: table.to_string(),
        });
    }
    Ok(())
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// The three reference tables, indexed for exact-name lookup.
pub struct InMemoryStore {
    medicines: HashMap<String, Medicine>,
    plans: HashMap<String, InsurancePlan>,
    /// `insurance → medicine → position in rules`.
    coverage_index: HashMap<String, HashMap<String, usize>>,
    rules: Vec<CoverageRule>,
    medicine_names: Vec<String>,
    insurance_names: Vec<String>,
    fingerprint: DatasetFingerprint,
}

impl InMemoryStore {
    /// Build a store from the raw text of the three tables.
    ///
    /// # Errors
    ///
    /// `DataLoad` when a table is not valid CSV, `EmptyDataset` when a table
    /// has no usable rows. Blank numeric cells never fail the load.
    pub fn from_sources(medicines: &str, insurance: &str, coverage: &str) -> CompareResult<Self> {
        let fingerprint = DatasetFingerprint::compute(medicines, insurance, coverage);

        let medicine_rows: Vec<Medicine> = parse_rows::<MedicineRow>("medicines", medicines)?
            .into_iter()
            .filter_map(MedicineRow::into_record)
            .collect();
        let plan_rows: Vec<InsurancePlan> = parse_rows::<InsuranceRow>("insurance", insurance)?
            .into_iter()
            .filter_map(InsuranceRow::into_record)
            .collect();
        let rule_rows: Vec<CoverageRule> = parse_rows::<CoverageRow>("coverage", coverage)?
            .into_iter()
            .filter_map(CoverageRow::into_record)
            .collect();

        require_rows("medicines", &medicine_rows)?;
        require_rows("insurance", &plan_rows)?;
        require_rows("coverage", &rule_rows)?;

        let mut store = Self {
            medicines: HashMap::new(),
            plans: HashMap::new(),
            coverage_index: HashMap::new(),
            rules: Vec::new(),
            medicine_names: Vec::new(),
            insurance_names: Vec::new(),
            fingerprint,
        };

        for medicine in medicine_rows {
            if store.medicines.contains_key(&medicine.name) {
                warn!(medicine = %medicine.name, "duplicate medicine row; keeping the first");
                continue;
            }
            store.medicine_names.push(medicine.name.clone());
            store.medicines.insert(medicine.name.clone(), medicine);
        }

        for plan in plan_rows {
            if store.plans.contains_key(&plan.name) {
                warn!(insurance = %plan.name, "duplicate insurance row; keeping the first");
                continue;
            }
            store.insurance_names.push(plan.name.clone());
            store.plans.insert(plan.name.clone(), plan);
        }

        for rule in rule_rows {
            let by_medicine = store.coverage_index.entry(rule.insurance_name.clone()).or_default();
            if by_medicine.contains_key(&rule.medicine_name) {
                warn!(
                    insurance = %rule.insurance_name,
                    medicine = %rule.medicine_name,
                    "duplicate coverage row; keeping the first"
                );
                continue;
            }
            by_medicine.insert(rule.medicine_name.clone(), store.rules.len());
            store.rules.push(rule);
        }

        info!(
            medicines = store.medicine_names.len(),
            plans = store.insurance_names.len(),
            rules = store.rules.len(),
            fingerprint = %store.fingerprint.short(),
            "reference data loaded"
        );

        Ok(store)
    }

    /// Read the three tables from explicit paths.
    pub fn from_paths(medicines: &Path, insurance: &Path, coverage: &Path) -> CompareResult<Self> {
        let medicines = read_source(medicines)?;
        let insurance = read_source(insurance)?;
        let coverage = read_source(coverage)?;
        Self::from_sources(&medicines, &insurance, &coverage)
    }

    /// Read the three tables from `dir` under their default file names.
    pub fn from_dir(dir: &Path) -> CompareResult<Self> {
        Self::from_paths(
            &dir.join(MEDICINES_FILE),
            &dir.join(INSURANCE_FILE),
            &dir.join(COVERAGE_FILE),
        )
    }

    pub fn fingerprint(&self) -> &DatasetFingerprint {
        &self.fingerprint
    }
}

impl DataStore for InMemoryStore {
    fn medicine(&self, name: &str) -> Option<&Medicine> {
        self.medicines.get(name)
    }

    fn insurance(&self, name: &str) -> Option<&InsurancePlan> {
        self.plans.get(name)
    }

    fn coverage(&self, insurance: &str, medicine: &str) -> Option<&CoverageRule> {
        let idx = *self.coverage_index.get(insurance)?.get(medicine)?;
        self.rules.get(idx)
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
