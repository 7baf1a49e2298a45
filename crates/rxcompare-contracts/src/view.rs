//! The response handed to presentation code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    coverage::CoverageMap,
    pairing::{Pairing, SelectionSummary},
    request::RequestId,
};

/// A pending questionnaire prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialQuestion {
    /// Position in the trial sequence; send it back with the answer.
    pub index: usize,
    /// The medicine being asked about.
    pub medicine: String,
}

/// The full result of one comparison request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonView {
    pub request_id: RequestId,
    pub generated_at: DateTime<Utc>,
    pub selected_medicine: Option<String>,
    pub selected_insurance: Option<String>,
    /// Present only when both a medicine and a plan were selected and both
    /// are known.
    pub current: Option<SelectionSummary>,
    /// Enriched and sorted. Empty while a trial question is pending.
    pub pairings: Vec<Pairing>,
    pub trial_question: Option<TrialQuestion>,
    pub trial_index: usize,
    pub trial_sequence: Vec<String>,
    /// Every coverage rule, independent of the selection.
    pub coverage_map: CoverageMap,
}
