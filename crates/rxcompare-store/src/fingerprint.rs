//! Dataset fingerprinting.
//!
//! Hash input layout (bytes, in order), once per table:
//!   1. source length as 8-byte little-endian
//!   2. source bytes, exactly as read
//!
//! Tables are fed in the fixed order medicines, insurance, coverage. The
//! length prefix keeps `("ab", "c")` and `("a", "bc")` apart.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// SHA-256 over the three raw reference tables, as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetFingerprint(String);

impl DatasetFingerprint {
    pub fn compute(medicines: &str, insurance: &str, coverage: &str) -> Self {
        let mut hasher = Sha256::new();
        for source in [medicines, insurance, coverage] {
            hasher.update((source.len() as u64).to_le_bytes());
            hasher.update(source.as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// The full 64-character hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first twelve hex characters, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for DatasetFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_hex() {
        let a = DatasetFingerprint::compute("m", "i", "c");
        let b = DatasetFingerprint::compute("m", "i", "c");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(a.short().len(), 12);
    }

    #[test]
    fn table_boundaries_are_part_of_the_hash() {
        let a = DatasetFingerprint::compute("ab", "c", "");
        let b = DatasetFingerprint::compute("a", "bc", "");
        assert_ne!(a, b, "length prefix must separate tables");
    }

    #[test]
    fn any_byte_change_changes_the_hash() {
        let a = DatasetFingerprint::compute("Metformin,4.00", "Cigna", "Yes");
        let b = DatasetFingerprint::compute("Metformin,4.01", "Cigna", "Yes");
        assert_ne!(a, b);
    }
}
