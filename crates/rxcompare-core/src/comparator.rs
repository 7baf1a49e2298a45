//! The comparator: one request in, one fully enriched view out.
//!
//! Pipeline for [`Comparator::compare`]:
//!
//!   Trial → Build → Cash row → Tier flag → Overrides → Sort → Coverage map
//!
//! The comparator holds no per-user state. The questionnaire index travels
//! in the request and comes back in the view.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use rxcompare_contracts::{
    coverage::{CoverageMap, CoverageStatus},
    error::CompareResult,
    pairing::{Pairing, SelectionSummary},
    request::{ComparisonRequest, RequestId},
    settings::Settings,
    view::{ComparisonView, TrialQuestion},
};

use crate::{
    cost::{annual_cost, MONTHS_PER_YEAR},
    pairing::{apply_unauthorized_costs, flag_higher_tier, PairingBuilder},
    rank::sort_pairings,
    recommend::{self, MedicineCost, PlanCost, Recommendations},
    traits::DataStore,
    trial::{self, TrialStep},
};

/// Serves comparison requests against a shared, read-only store.
pub struct Comparator {
    store: Arc<dyn DataStore>,
    settings: Settings,
}

impl Comparator {
    pub fn new(store: Arc<dyn DataStore>, settings: Settings) -> Self {
        info!(
            medicines = store.medicine_names().len(),
            plans = store.insurance_names().len(),
            rules = store.coverage_rules().len(),
            overrides = settings.unauthorized_costs.len(),
            trial_steps = settings.trial_sequence.len(),
            "comparator ready"
        );
        Self { store, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &dyn DataStore {
        self.store.as_ref()
    }

    /// The opening questionnaire prompt.
    pub fn start_trial(&self) -> Option<TrialQuestion> {
        trial::first_question(&self.settings.trial_sequence)
    }

    /// The "current selection" card, or `None` if either name is unknown.
    pub fn current_selection(&self, medicine: &str, insurance: &str) -> Option<SelectionSummary> {
        let med = self.store.medicine(medicine)?;
        let plan = self.store.insurance(insurance)?;
        let coverage = self.store.coverage(insurance, medicine);
        let annual = annual_cost(med, Some(plan), coverage);

        Some(SelectionSummary {
            medicine: med.clone(),
            insurance: plan.clone(),
            coverage: coverage.cloned(),
            status: CoverageStatus::of(coverage),
            annual_cost: annual,
            monthly_cost: annual / f64::from(MONTHS_PER_YEAR),
        })
    }

    /// Every coverage rule as `medicine → insurance → cell`.
    pub fn coverage_map(&self) -> CoverageMap {
        let mut map = CoverageMap::new();
        for rule in self.store.coverage_rules() {
            map.entry(rule.medicine_name.clone())
                .or_default()
                .entry(rule.insurance_name.clone())
                .or_insert_with(|| rule.cell());
        }
        map
    }

    /// Run one comparison request.
    ///
    /// 1. A trial answer, if present, is applied first. A pending question
    ///    returns at once with no pairings. "No" replaces the requested
    ///    medicine with the trial medicine. Exhausting the sequence clears
    ///    the selection so every pairing is shown.
    /// 2. With both a medicine and a plan selected, the view carries the
    ///    current selection card and lists that medicine under every other
    ///    plan.
    /// 3. Otherwise the selection is expanded as-is, with a cash row in
    ///    front when only a medicine is selected.
    pub fn compare(&self, request: &ComparisonRequest) -> ComparisonView {
        let request_id = RequestId::new();
        debug!(
            request_id = %request_id.0,
            medicine = ?request.medicine,
            insurance = ?request.insurance,
            tried = request.tried,
            sort_by = request.sort_by.as_str(),
            order = request.order.as_str(),
            "comparison requested"
        );

        let sequence = &self.settings.trial_sequence;
        let mut medicine = request.medicine.clone();
        let mut insurance = request.insurance.clone();
        let mut trial_index = 0;

        if let Some(input) = request.trial {
            let step = trial::advance(sequence, input.index, input.answer);
            trial_index = step.index_after(sequence, input.index);
            debug!(request_id = %request_id.0, step = ?step, "trial answer applied");

            match step {
                TrialStep::Ask(question) => {
                    return self.view(request_id, medicine, insurance, None, Vec::new(), Some(question), trial_index);
                }
                TrialStep::Selected(name) => medicine = Some(name),
                TrialStep::Exhausted => {
                    medicine = None;
                    insurance = None;
                }
                TrialStep::OutOfRange => {}
            }
        }

        let builder = PairingBuilder::new(self.store.as_ref());
        let mut current = None;

        let mut pairings: Vec<Pairing> = match (medicine.as_deref(), insurance.as_deref()) {
            (Some(med), Some(ins)) => {
                current = self.current_selection(med, ins);

                let mut rows = builder.build(Some(med), None);
                rows.retain(|p| !(p.medicine_name == med && p.insurance_name == ins));
                apply_unauthorized_costs(&mut rows, &self.settings.unauthorized_costs);
                if request.tried {
                    flag_higher_tier(&mut rows, self.store.as_ref(), med);
                }
                rows
            }
            (med, ins) => {
                let mut rows = builder.build(med, ins);
                if let (Some(med), None) = (med, ins) {
                    if let Some(cash) = builder.cash_pairing(med, &self.settings.cash_channel_label) {
                        rows.insert(0, cash);
                    }
                }
                if let (true, Some(med)) = (request.tried, med) {
                    flag_higher_tier(&mut rows, self.store.as_ref(), med);
                }
                apply_unauthorized_costs(&mut rows, &self.settings.unauthorized_costs);
                rows
            }
        };

        sort_pairings(&mut pairings, request.sort_by, request.order);

        debug!(
            request_id = %request_id.0,
            rows = pairings.len(),
            current = current.is_some(),
            "comparison built"
        );

        self.view(request_id, medicine, insurance, current, pairings, None, trial_index)
    }

    #[allow(clippy::too_many_arguments)]
    fn view(
        &self,
        request_id: RequestId,
        selected_medicine: Option<String>,
        selected_insurance: Option<String>,
        current: Option<SelectionSummary>,
        pairings: Vec<Pairing>,
        trial_question: Option<TrialQuestion>,
        trial_index: usize,
    ) -> ComparisonView {
        ComparisonView {
            request_id,
            generated_at: Utc::now(),
            selected_medicine,
            selected_insurance,
            current,
            pairings,
            trial_question,
            trial_index,
            trial_sequence: self.settings.trial_sequence.clone(),
            coverage_map: self.coverage_map(),
        }
    }

    pub fn compare_medicines(&self, insurance: &str, exclude: Option<&str>) -> CompareResult<Vec<MedicineCost>> {
        recommend::compare_medicines(self.store.as_ref(), insurance, exclude)
    }

    pub fn compare_insurance_plans(&self, medicine: &str, exclude: Option<&str>) -> CompareResult<Vec<PlanCost>> {
        recommend::compare_insurance_plans(self.store.as_ref(), medicine, exclude)
    }

    pub fn recommend(&self, medicine: &str, insurance: &str) -> CompareResult<Recommendations> {
        recommend::recommend(self.store.as_ref(), medicine, insurance)
    }
}
