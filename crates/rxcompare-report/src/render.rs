//! Text renderings of comparator output.

use rxcompare_contracts::{
    coverage::{CoverageMap, CoverageStatus},
    pairing::{Pairing, SelectionSummary},
    view::TrialQuestion,
};
use rxcompare_core::recommend::{Alternative, MedicineCost, PlanCost, Recommendations};

use crate::{
    money::{dollars, format_money},
    table::Table,
};

/// Short coverage label for table cells.
pub fn coverage_cell(pairing: &Pairing) -> &'static str {
    if pairing.is_cash() {
        return "Cash price";
    }
    match pairing.coverage_status() {
        CoverageStatus::Covered => "Yes",
        CoverageStatus::NotCovered => "No",
        CoverageStatus::Unlisted => "Not listed",
    }
}

fn rating(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{}/10", format_money(Some(v))),
        None => String::new(),
    }
}

/// The main results table.
///
/// The "Higher tier" column appears only when at least one row carries the
/// flag.
pub fn pairings_table(pairings: &[Pairing]) -> Table {
    let flagged = pairings.iter().any(|p| p.is_higher_tier.is_some());

    let mut headers = vec![
        "Medicine",
        "Insurance",
        "Covered",
        "Tier",
        "Monthly",
        "Annual",
        "Savings/yr",
        "Without PA/yr",
    ];
    if flagged {
        headers.push("Higher tier");
    }

    let mut table = Table::new(headers);
    for p in pairings {
        let mut row = vec![
            p.medicine_name.clone(),
            p.insurance_name.clone(),
            coverage_cell(p).to_string(),
            p.coverage
                .as_ref()
                .and_then(|c| c.tier_level.clone())
                .unwrap_or_default(),
            dollars(Some(p.monthly_cost)),
            dollars(Some(p.annual_cost)),
            dollars(p.annual_savings),
            dollars(Some(p.unauth_annual)),
        ];
        if flagged {
            row.push(match p.is_higher_tier {
                Some(true) => "yes".to_string(),
                _ => String::new(),
            });
        }
        table.push(row);
    }
    table
}

/// The "current selection" card: medicine, plan, coverage, and cost.
pub fn current_selection(summary: &SelectionSummary) -> String {
    let med = &summary.medicine;
    let plan = &summary.insurance;

    let mut medicine = Table::new(["Medicine", med.name.as_str()]);
    medicine.push(["Type".to_string(), med.kind.clone()]);
    medicine.push(["Effectiveness".to_string(), rating(med.effectiveness_rating)]);
    medicine.push(["Possible side effects".to_string(), med.side_effects.clone()]);
    medicine.push(["Average monthly cost".to_string(), dollars(med.average_cost_per_month)]);
    medicine.push(["Cash price".to_string(), dollars(med.goodrx_price)]);

    let mut insurance = Table::new(["Insurance", plan.name.as_str()]);
    insurance.push(["Provider".to_string(), plan.provider.clone()]);
    insurance.push(["Primary care copay".to_string(), dollars(plan.copay_primary_care)]);
    insurance.push(["Specialist copay".to_string(), dollars(plan.copay_specialist)]);
    insurance.push(["Emergency copay".to_string(), dollars(plan.copay_emergency)]);
    insurance.push(["Deductible".to_string(), dollars(plan.deductible)]);
    insurance.push(["Annual max copay".to_string(), dollars(plan.annual_max_copay)]);
    insurance.push([
        "Coverage percentage".to_string(),
        plan.coverage_percentage
            .map(|v| format!("{}%", format_money(Some(v))))
            .unwrap_or_default(),
    ]);

    let mut coverage = Table::new(["Coverage", summary.status.label()]);
    match &summary.coverage {
        Some(rule) => {
            coverage.push(["Copay amount".to_string(), dollars(rule.copay_amount)]);
            coverage.push(["Tier level".to_string(), rule.tier_level.clone().unwrap_or_default()]);
        }
        None => {
            coverage.push(["Copay amount", "Full cost"]);
            coverage.push(["Tier level", "Not covered"]);
        }
    }

    format!(
        "{}\n\n{}\n\n{}\n\nEstimated annual cost: {}\nMonthly average: {}",
        medicine.render(),
        insurance.render(),
        coverage.render(),
        dollars(Some(summary.annual_cost)),
        dollars(Some(summary.monthly_cost)),
    )
}

/// Every medicine under one plan.
pub fn medicine_costs_table(rows: &[MedicineCost]) -> Table {
    let mut table = Table::new(["Medicine", "Type", "Effectiveness", "Base cost/mo", "Annual cost", "Covered", "Side effects"]);
    for r in rows {
        table.push([
            r.medicine.name.clone(),
            r.medicine.kind.clone(),
            rating(r.medicine.effectiveness_rating),
            dollars(r.medicine.average_cost_per_month),
            dollars(Some(r.annual_cost)),
            r.status.label().to_string(),
            r.medicine.side_effects.clone(),
        ]);
    }
    table
}

/// Every plan for one medicine.
pub fn plan_costs_table(rows: &[PlanCost]) -> Table {
    let mut table = Table::new(["Insurance", "Primary care copay", "Deductible", "Coverage %", "Annual cost", "Covers med"]);
    for r in rows {
        table.push([
            r.insurance.name.clone(),
            dollars(r.insurance.copay_primary_care),
            dollars(r.insurance.deductible),
            r.insurance
                .coverage_percentage
                .map(|v| format!("{}%", format_money(Some(v))))
                .unwrap_or_default(),
            dollars(Some(r.annual_cost)),
            if r.status == CoverageStatus::Covered { "Yes" } else { "No" }.to_string(),
        ]);
    }
    table
}

fn alternative_line(name: &str, alt: &Alternative) -> String {
    if alt.savings > 0.0 {
        format!(
            "  * {}: {}/year (save {} annually)",
            name,
            dollars(Some(alt.annual_cost)),
            dollars(Some(alt.savings))
        )
    } else {
        format!(
            "  * {}: {}/year (costs {} more)",
            name,
            dollars(Some(alt.annual_cost)),
            dollars(Some(alt.savings.abs()))
        )
    }
}

/// Cheaper-alternative suggestions as indented bullet lists.
pub fn recommendations(recs: &Recommendations) -> String {
    let mut out = vec![
        format!("Your current annual cost: {}", dollars(Some(recs.current_annual_cost))),
        String::new(),
        "Alternative medicines (comparable effectiveness):".to_string(),
    ];
    if recs.alternative_medicines.is_empty() {
        out.push("  No comparable alternatives found.".to_string());
    }
    for alt in &recs.alternative_medicines {
        out.push(alternative_line(&alt.medicine_name, alt));
    }

    out.push(String::new());
    out.push("Alternative insurance plans:".to_string());
    if recs.alternative_plans.is_empty() {
        out.push("  No cheaper plans available.".to_string());
    }
    for alt in &recs.alternative_plans {
        out.push(alternative_line(&alt.insurance_name, alt));
    }

    out.join("\n")
}

/// The full coverage table, one row per rule.
pub fn coverage_map_table(map: &CoverageMap) -> Table {
    let mut table = Table::new(["Medicine", "Insurance", "Covered", "Copay", "Tier"]);
    for (medicine, plans) in map {
        for (insurance, cell) in plans {
            table.push([
                medicine.clone(),
                insurance.clone(),
                cell.covered.clone().unwrap_or_default(),
                dollars(cell.copay_amount),
                cell.tier_level.clone().unwrap_or_default(),
            ]);
        }
    }
    table
}

pub fn trial_prompt(question: &TrialQuestion) -> String {
    format!("Have you already tried {}? [y/n]", question.medicine)
}
