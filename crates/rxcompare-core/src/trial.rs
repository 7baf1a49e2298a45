//! The "have you tried this medicine?" questionnaire.
//!
//! A linear walk over a configured sequence of medicine names. The state is
//! just an index, threaded by the caller between requests:
//!
//! ```text
//! index = i, answer No   → Selected(sequence[i])        (flow ends)
//! index = i, answer Yes  → i + 1 < N ? Ask(i + 1)       (no results yet)
//!                                    : Exhausted        (flow ends, show all)
//! ```
//!
//! There is no backtracking.

use rxcompare_contracts::{request::TrialAnswer, view::TrialQuestion};

/// The result of one questionnaire transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialStep {
    /// Ask the next question. No results are built for this step.
    Ask(TrialQuestion),
    /// The user has not tried this medicine; compare it.
    Selected(String),
    /// Every medicine in the sequence has been tried; show all pairings.
    Exhausted,
    /// "No" arrived for an index past the end of the sequence. Nothing is
    /// selected by the questionnaire.
    OutOfRange,
}

impl TrialStep {
    /// The index to report back to the caller after this step.
    pub fn index_after(&self, sequence: &[String], submitted: usize) -> usize {
        match self {
            TrialStep::Ask(q) => q.index,
            TrialStep::Exhausted => sequence.len(),
            TrialStep::Selected(_) | TrialStep::OutOfRange => submitted,
        }
    }
}

/// The opening question, or `None` for an empty sequence.
pub fn first_question(sequence: &[String]) -> Option<TrialQuestion> {
    sequence.first().map(|medicine| TrialQuestion {
        index: 0,
        medicine: medicine.clone(),
    })
}

/// Apply `answer` to the question at `index`.
pub fn advance(sequence: &[String], index: usize, answer: TrialAnswer) -> TrialStep {
    match answer {
        TrialAnswer::No => match sequence.get(index) {
            Some(medicine) => TrialStep::Selected(medicine.clone()),
            None => TrialStep::OutOfRange,
        },
        TrialAnswer::Yes => {
            let next = index.saturating_add(1);
            match sequence.get(next) {
                Some(medicine) => TrialStep::Ask(TrialQuestion {
                    index: next,
                    medicine: medicine.clone(),
                }),
                None => TrialStep::Exhausted,
            }
        }
    }
}
