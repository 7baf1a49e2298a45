//! # rxcompare-store
//!
//! CSV-backed reference tables for rxcompare.
//!
//! ## Overview
//!
//! Three tables feed every comparison: medicines, insurance plans, and the
//! per-pair coverage rules. `InMemoryStore` parses them once at startup,
//! refuses to start on an empty table, and fingerprints the raw sources so a
//! run can be tied back to the exact data it used.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rxcompare_store::InMemoryStore;
//! use rxcompare_core::DataStore;
//!
//! let store = InMemoryStore::from_dir(Path::new("data"))?;
//! println!("{} medicines, fingerprint {}", store.medicine_names().len(), store.fingerprint());
//! ```

pub mod fingerprint;
pub mod memory;
mod rows;

pub use fingerprint::DatasetFingerprint;
pub use memory::{InMemoryStore, COVERAGE_FILE, INSURANCE_FILE, MEDICINES_FILE};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::fs;

    use rxcompare_contracts::error::CompareError;
    use rxcompare_core::DataStore;

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const MEDICINES: &str = "\
medicine_name,type,effectiveness_rating,side_effects,average_cost_per_month,goodrx_price
Metformin,Biguanide,7,GI upset,4.00,
Januvia,DPP-4 inhibitor,7.5,Headache,480.00,25.00
Glipizide,Sulfonylurea,6.5,Hypoglycemia,10.00,8.00
";

    const INSURANCE: &str = "\
insurance_name,provider,copay_primary_care,copay_specialist,copay_emergency,deductible,annual_max_copay,coverage_percentage
Cigna,Cigna Healthcare,25,50,250,100,4000,80
Medicaid DC,DC DHCF,0,0,0,,0,100
";

    const COVERAGE: &str = "\
insurance_name,medicine_name,covered,copay_amount,tier_level
Cigna,Metformin,Yes,10,Tier 1
Cigna,Januvia,Yes,47,Tier 3
Medicaid DC,Januvia,No,,Tier 2
";

    fn store() -> InMemoryStore {
        InMemoryStore::from_sources(MEDICINES, INSURANCE, COVERAGE).expect("fixture tables load")
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Names come back in file order, not hash order.
    #[test]
    fn test_source_order_is_preserved() {
        let store = store();
        assert_eq!(store.medicine_names(), ["Metformin", "Januvia", "Glipizide"]);
        assert_eq!(store.insurance_names(), ["Cigna", "Medicaid DC"]);
    }

    /// Blank numeric cells load as `None` rather than failing.
    #[test]
    fn test_blank_cells_are_absent() {
        let store = store();
        assert_eq!(store.medicine("Metformin").unwrap().goodrx_price, None);
        assert_eq!(store.medicine("Januvia").unwrap().goodrx_price, Some(25.0));
        assert_eq!(store.insurance("Medicaid DC").unwrap().deductible, None);
        assert_eq!(store.coverage("Medicaid DC", "Januvia").unwrap().copay_amount, None);
    }

    /// Coverage lookups are keyed by (insurance, medicine), not the reverse.
    #[test]
    fn test_coverage_lookup_by_pair() {
        let store = store();
        let rule = store.coverage("Cigna", "Januvia").expect("rule exists");
        assert_eq!(rule.copay_amount, Some(47.0));
        assert_eq!(rule.tier(), Some(3));
        assert!(store.coverage("Januvia", "Cigna").is_none());
        assert!(store.coverage("Cigna", "Glipizide").is_none());
        assert_eq!(store.coverage_rules().len(), 3);
    }

    /// The first of two rows with the same key wins.
    #[test]
    fn test_duplicate_rows_keep_first() {
        let medicines = format!("{MEDICINES}Metformin,Biguanide,9,None,99.00,\n");
        let coverage = format!("{COVERAGE}Cigna,Metformin,No,99,Tier 4\n");
        let store = InMemoryStore::from_sources(&medicines, INSURANCE, &coverage).unwrap();

        assert_eq!(store.medicine_names().len(), 3);
        assert_eq!(store.medicine("Metformin").unwrap().average_cost_per_month, Some(4.0));
        assert!(store.coverage("Cigna", "Metformin").unwrap().is_covered());
        assert_eq!(store.coverage_rules().len(), 3);
    }

    /// A header-only table is fatal.
    #[test]
    fn test_empty_table_is_rejected() {
        let header_only = "insurance_name,provider\n";
        let err = InMemoryStore::from_sources(MEDICINES, header_only, COVERAGE)
            .err()
            .expect("empty insurance table must fail");
        assert!(
            matches!(err, CompareError::EmptyDataset { ref table } if table == "insurance"),
            "got {err:?}"
        );
    }

    /// Missing optional columns read as blank.
    #[test]
    fn test_missing_columns_read_as_blank() {
        let medicines = "medicine_name,average_cost_per_month\nMetformin,4\n";
        let store = InMemoryStore::from_sources(medicines, INSURANCE, COVERAGE).unwrap();
        let med = store.medicine("Metformin").unwrap();
        assert_eq!(med.effectiveness_rating, None);
        assert_eq!(med.goodrx_price, None);
        assert_eq!(med.kind, "");
    }

    // ── Files ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_from_dir_reads_default_file_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MEDICINES_FILE), MEDICINES).unwrap();
        fs::write(dir.path().join(INSURANCE_FILE), INSURANCE).unwrap();
        fs::write(dir.path().join(COVERAGE_FILE), COVERAGE).unwrap();

        let from_dir = InMemoryStore::from_dir(dir.path()).unwrap();
        assert_eq!(from_dir.medicine_names().len(), 3);
        assert_eq!(
            from_dir.fingerprint(),
            store().fingerprint(),
            "same bytes must give the same fingerprint"
        );
    }

    #[test]
    fn test_missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = InMemoryStore::from_dir(dir.path()).err().expect("no files present");
        match err {
            CompareError::DataLoad { reason } => assert!(reason.contains(MEDICINES_FILE), "{reason}"),
            other => panic!("expected DataLoad, got {other:?}"),
        }
    }

    // ── Fingerprint ───────────────────────────────────────────────────────────

    #[test]
    fn test_fingerprint_tracks_content() {
        let edited = COVERAGE.replace("Cigna,Metformin,Yes,10", "Cigna,Metformin,Yes,11");
        let other = InMemoryStore::from_sources(MEDICINES, INSURANCE, &edited).unwrap();
        assert_ne!(other.fingerprint(), store().fingerprint());
    }
}
