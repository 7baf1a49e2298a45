//! Error types for the rxcompare workspace.
//!
//! Only startup and explicit point queries can fail. Enumeration, cost
//! resolution, and enrichment never return errors: malformed data degrades
//! to a safe default at the point of use instead.

use thiserror::Error;

/// The unified error type for rxcompare.
#[derive(Debug, Error)]
pub enum CompareError {
    /// A reference table loaded with zero rows.
    ///
    /// This is fatal at startup. No comparison can be served without data.
    #[error("reference table '{table}' is empty")]
    EmptyDataset { table: String },

    /// A reference table could not be read or decoded.
    #[error("failed to load reference data: {reason}")]
    DataLoad { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A point query named a medicine the store does not know.
    #[error("unknown medicine '{name}'")]
    UnknownMedicine { name: String },

    /// A point query named an insurance plan the store does not know.
    #[error("unknown insurance plan '{name}'")]
    UnknownInsurance { name: String },
}

/// Convenience alias used throughout the rxcompare crates.
pub type CompareResult<T> = Result<T, CompareError>;
