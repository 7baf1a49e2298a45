//! # rxcompare-ref-data
//!
//! The bundled reference dataset: medicines, plans, and coverage rules for
//! Washington DC, plus the comparator configuration that goes with them.
//!
//! Prices and formulary tiers are illustrative. The tables are compiled into
//! the binary so the tools work without a data directory.

use std::sync::Arc;

use rxcompare_config::ComparatorConfig;
use rxcompare_contracts::error::CompareResult;
use rxcompare_core::Comparator;
use rxcompare_store::InMemoryStore;

pub const MEDICINES_CSV: &str = include_str!("../data/medicines.csv");
pub const INSURANCE_CSV: &str = include_str!("../data/insurance.csv");
pub const COVERAGE_CSV: &str = include_str!("../data/insurance_medicine_coverage.csv");
pub const COMPARATOR_TOML: &str = include_str!("../config/comparator.toml");

/// Load the bundled tables.
pub fn reference_store() -> CompareResult<InMemoryStore> {
    InMemoryStore::from_sources(MEDICINES_CSV, INSURANCE_CSV, COVERAGE_CSV)
}

/// Parse the bundled configuration.
pub fn reference_config() -> CompareResult<ComparatorConfig> {
    ComparatorConfig::from_toml_str(COMPARATOR_TOML)
}

/// A comparator over the bundled tables and configuration.
pub fn reference_comparator() -> CompareResult<Comparator> {
    let store = reference_store()?;
    let settings = reference_config()?.to_settings();
    Ok(Comparator::new(Arc::new(store), settings))
}
