//! Request-side types: what the caller asks the comparator for.

use serde::{Deserialize, Serialize};

/// Unique identifier for a single comparison request.
///
/// Appears in every log line emitted while the request is processed and in
/// the resulting `ComparisonView`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    /// Create a new, unique request ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

/// The field a pairing list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Medicine,
    Insurance,
    Monthly,
    Savings,
    #[default]
    Annual,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Annual,
        SortKey::Monthly,
        SortKey::Savings,
        SortKey::Medicine,
        SortKey::Insurance,
    ];

    /// Parse a user-supplied key. Unknown or blank values fall back to
    /// [`SortKey::Annual`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "medicine" => SortKey::Medicine,
            "insurance" => SortKey::Insurance,
            "monthly" => SortKey::Monthly,
            "savings" => SortKey::Savings,
            _ => SortKey::Annual,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Medicine => "medicine",
            SortKey::Insurance => "insurance",
            SortKey::Monthly => "monthly",
            SortKey::Savings => "savings",
            SortKey::Annual => "annual",
        }
    }

    /// The next key in [`SortKey::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let pos = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(pos + 1) % Self::ALL.len()]
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only "desc" (any case) selects descending order.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// An answer to "have you already tried this medicine?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialAnswer {
    Yes,
    No,
}

impl TrialAnswer {
    /// Read free-form input. Only "no" (trimmed, any case) is `No`; every
    /// other answer advances the questionnaire.
    pub fn from_input(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("no") {
            TrialAnswer::No
        } else {
            TrialAnswer::Yes
        }
    }
}

/// One questionnaire step submitted by the caller.
///
/// The comparator keeps no session state; the caller threads `index` from
/// the previous response back into the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialInput {
    pub index: usize,
    pub answer: TrialAnswer,
}

/// Everything a single comparison needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub medicine: Option<String>,
    pub insurance: Option<String>,
    /// The caller has already tried the selected medicine; flag rows on a
    /// higher tier than it.
    pub tried: bool,
    pub sort_by: SortKey,
    pub order: SortOrder,
    pub trial: Option<TrialInput>,
}

impl ComparisonRequest {
    /// A request for the given selection, blank names collapsed to `None`.
    pub fn for_selection(medicine: Option<&str>, insurance: Option<&str>) -> Self {
        Self {
            medicine: crate::coerce::text(medicine),
            insurance: crate::coerce::text(insurance),
            ..Self::default()
        }
    }
}
