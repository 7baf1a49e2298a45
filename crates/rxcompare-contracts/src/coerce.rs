//! Coerce-to-number-or-default helpers.
//!
//! Reference tables are hand-edited spreadsheets. A cell that is blank,
//! non-numeric, or `NaN` reads as "absent", and absent values read as zero
//! wherever a cost is computed. Nothing in this module ever fails.

/// Parse a raw table cell into a finite number.
///
/// Leading and trailing whitespace is ignored. Blank cells, unparsable text,
/// `NaN`, and infinities all yield `None`.
pub fn number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read an optional number, treating absence as zero.
pub fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parse an optional raw cell, collapsing blank text to `None`.
pub fn text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
