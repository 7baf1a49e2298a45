//! The reference-data seam.
//!
//! The core never reads files. It asks a `DataStore` for records, and every
//! lookup may come back empty. Callers treat an empty lookup as "no data for
//! this row" rather than as an error.

use rxcompare_contracts::{
    coverage::CoverageRule,
    medicine::{InsurancePlan, Medicine},
};

/// Read-only access to the three reference tables.
///
/// Implementations are loaded once at startup and shared across requests
/// without locking, so every method takes `&self` and must not mutate.
pub trait DataStore: Send + Sync {
    /// Look up a medicine by exact name.
    fn medicine(&self, name: &str) -> Option<&Medicine>;

    /// Look up an insurance plan by exact name.
    fn insurance(&self, name: &str) -> Option<&InsurancePlan>;

    /// Look up the coverage rule for a `(plan, medicine)` pair.
    fn coverage(&self, insurance: &str, medicine: &str) -> Option<&CoverageRule>;

    /// Every medicine name, in source order.
    fn medicine_names(&self) -> &[String];

    /// Every insurance plan name, in source order.
    fn insurance_names(&self) -> &[String];

    /// Every coverage rule, in source order.
    fn coverage_rules(&self) -> &[CoverageRule];
}
