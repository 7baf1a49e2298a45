//! The cost resolver.
//!
//! Decision policy, in order:
//!
//! 1. A medicine counts as covered only when a coverage rule exists and its
//!    `covered` cell reads "yes" (trimmed, any case).
//! 2. Not covered:
//!    a. no plan supplied and a cash price configured → cash price × months;
//!    b. otherwise → average monthly price × months.
//! 3. Covered → copay × months + the plan's flat deductible.
//!
//! Coverage percentage and per-visit copays never enter medication cost.
//! Any missing number reads as zero.

use rxcompare_contracts::{
    coerce::or_zero,
    coverage::CoverageRule,
    medicine::{InsurancePlan, Medicine},
};

/// Months in the annual comparison window.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Resolve what the patient pays for `medicine` over `months`.
///
/// `insurance = None` is the uninsured channel: it is the only path on
/// which the cash price is ever used. A plan that does not cover the
/// medicine falls back to the average price even when the cash price is
/// cheaper.
pub fn resolve_cost(
    medicine: &Medicine,
    insurance: Option<&InsurancePlan>,
    coverage: Option<&CoverageRule>,
    months: u32,
) -> f64 {
    let months = f64::from(months);
    let covered = coverage.map(CoverageRule::is_covered).unwrap_or(false);

    if !covered {
        if insurance.is_none() {
            if let Some(cash) = medicine.cash_price() {
                return cash * months;
            }
        }
        return medicine.average_monthly() * months;
    }

    let copay = or_zero(coverage.and_then(|c| c.copay_amount));
    let deductible = insurance.map(InsurancePlan::deductible_or_zero).unwrap_or(0.0);

    copay * months + deductible
}

/// Resolve the twelve-month cost.
pub fn annual_cost(
    medicine: &Medicine,
    insurance: Option<&InsurancePlan>,
    coverage: Option<&CoverageRule>,
) -> f64 {
    resolve_cost(medicine, insurance, coverage, MONTHS_PER_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medicine(avg: Option<f64>, cash: Option<f64>) -> Medicine {
        Medicine {
            name: "Metformin".to_string(),
            kind: "Biguanide".to_string(),
            effectiveness_rating: Some(7.0),
            side_effects: "GI upset".to_string(),
            average_cost_per_month: avg,
            goodrx_price: cash,
        }
    }

    fn plan(deductible: Option<f64>) -> InsurancePlan {
        InsurancePlan {
            name: "Cigna".to_string(),
            provider: "Cigna Healthcare".to_string(),
            copay_primary_care: Some(25.0),
            copay_specialist: Some(50.0),
            copay_emergency: Some(250.0),
            deductible,
            annual_max_copay: Some(4000.0),
            coverage_percentage: Some(80.0),
        }
    }

    fn rule(covered: &str, copay: Option<f64>) -> CoverageRule {
        CoverageRule {
            insurance_name: "Cigna".to_string(),
            medicine_name: "Metformin".to_string(),
            covered: Some(covered.to_string()),
            copay_amount: copay,
            tier_level: Some("Tier 1".to_string()),
        }
    }

    // ── covered path ─────────────────────────────────────────────────────────

    #[test]
    fn covered_cost_is_copay_times_months_plus_deductible() {
        let cost = resolve_cost(
            &medicine(Some(4.0), None),
            Some(&plan(Some(100.0))),
            Some(&rule("Yes", Some(10.0))),
            12,
        );
        assert_eq!(cost, 220.0);
        assert!((cost / 12.0 - 18.333_333).abs() < 1e-5);
    }

    #[test]
    fn covered_cost_ignores_coverage_percentage_and_visit_copays() {
        let mut generous = plan(Some(0.0));
        generous.coverage_percentage = Some(100.0);
        generous.copay_specialist = Some(0.0);

        let cost = resolve_cost(
            &medicine(Some(400.0), None),
            Some(&generous),
            Some(&rule("yes", Some(30.0))),
            12,
        );
        assert_eq!(cost, 360.0);
    }

    #[test]
    fn covered_cost_degrades_missing_copay_and_deductible_to_zero() {
        let cost = resolve_cost(
            &medicine(Some(4.0), None),
            Some(&plan(None)),
            Some(&rule(" YES ", None)),
            12,
        );
        assert_eq!(cost, 0.0);
    }

    #[test]
    fn covered_rule_without_plan_charges_copay_only() {
        let cost = resolve_cost(&medicine(Some(4.0), Some(2.0)), None, Some(&rule("Yes", Some(10.0))), 6);
        assert_eq!(cost, 60.0);
    }

    // ── uncovered path ───────────────────────────────────────────────────────

    #[test]
    fn uninsured_with_cash_price_uses_cash_price() {
        let cost = resolve_cost(&medicine(Some(480.0), Some(25.0)), None, None, 12);
        assert_eq!(cost, 300.0);
    }

    #[test]
    fn uninsured_without_cash_price_uses_average() {
        let cost = resolve_cost(&medicine(Some(4.0), None), None, None, 12);
        assert_eq!(cost, 48.0);
    }

    #[test]
    fn insured_but_unlisted_uses_average_even_when_cash_is_cheaper() {
        // The cash channel exists only without a plan.
        let cost = resolve_cost(&medicine(Some(480.0), Some(25.0)), Some(&plan(Some(100.0))), None, 12);
        assert_eq!(cost, 5760.0);
    }

    #[test]
    fn explicit_no_prices_like_an_unlisted_medicine() {
        let m = medicine(Some(10.0), None);
        let p = plan(Some(100.0));
        let no = resolve_cost(&m, Some(&p), Some(&rule("No", Some(3.0))), 12);
        let unlisted = resolve_cost(&m, Some(&p), None, 12);
        assert_eq!(no, 120.0);
        assert_eq!(no, unlisted);
    }

    #[test]
    fn malformed_covered_cell_is_not_covered() {
        let cost = resolve_cost(
            &medicine(Some(10.0), None),
            Some(&plan(Some(100.0))),
            Some(&rule("Y", Some(1.0))),
            12,
        );
        assert_eq!(cost, 120.0);
    }

    #[test]
    fn missing_average_price_degrades_to_zero() {
        assert_eq!(resolve_cost(&medicine(None, None), Some(&plan(None)), None, 12), 0.0);
    }

    #[test]
    fn annual_cost_uses_twelve_months() {
        let m = medicine(Some(4.0), None);
        assert_eq!(annual_cost(&m, None, None), resolve_cost(&m, None, None, 12));
    }
}
