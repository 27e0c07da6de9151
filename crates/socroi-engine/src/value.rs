//! Value-category breakdown.
//!
//! Each configured category is an independent annual estimate built from the
//! derived inputs, the headline results, and the constants in
//! `ValueAssumptions`. Values are clamped at zero, summed, converted to shares,
//! and sorted so the largest category comes first (the first donut slice).

use socroi_core::config::{SalaryTable, ValueAssumptions};
use socroi_core::{InputRecord, ResultRecord, ValueBreakdown, ValueCategory, ValueEntry};

/// Quantities shared by several category formulas.
struct ValueDrivers {
    annual_incidents: f64,
    false_positive_share: f64,
    genuine_share: f64,
    analyst_hourly: f64,
    efficiency: f64,
    response: f64,
    headcount: f64,
}

impl ValueDrivers {
    fn new(
        record: &InputRecord,
        results: &ResultRecord,
        salaries: &SalaryTable,
        assumptions: &ValueAssumptions,
    ) -> Self {
        let false_positive_share = record.false_positive_rate / 100.0;
        Self {
            annual_incidents: record.security_incidents_per_month * 12.0,
            false_positive_share,
            genuine_share: if assumptions.false_positive_adjusted {
                1.0 - false_positive_share
            } else {
                1.0
            },
            analyst_hourly: salaries.analyst / assumptions.working_hours_per_year,
            efficiency: results.efficiency_improvement / 100.0,
            response: results.incident_response_improvement / 100.0,
            headcount: record.total_headcount(),
        }
    }
}

/// Compute the breakdown, sorted by descending value.
pub fn compute_value_breakdown(
    record: &InputRecord,
    results: &ResultRecord,
    salaries: &SalaryTable,
    assumptions: &ValueAssumptions,
) -> ValueBreakdown {
    let drivers = ValueDrivers::new(record, results, salaries, assumptions);

    let values: Vec<(ValueCategory, f64)> = assumptions
        .categories
        .iter()
        .map(|&category| {
            let raw = category_value(category, record, salaries, assumptions, &drivers);
            (category, raw.max(0.0))
        })
        .collect();

    let total_value: f64 = values.iter().map(|(_, v)| v).sum();

    let mut entries: Vec<ValueEntry> = values
        .into_iter()
        .map(|(category, value)| ValueEntry {
            category,
            name: category.name().to_string(),
            value,
            description: category.description().to_string(),
            percentage: share(value, total_value),
        })
        .collect();
    entries.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));

    ValueBreakdown {
        entries,
        total_value,
    }
}

fn category_value(
    category: ValueCategory,
    record: &InputRecord,
    salaries: &SalaryTable,
    a: &ValueAssumptions,
    d: &ValueDrivers,
) -> f64 {
    match category {
        ValueCategory::FalsePositiveTriage => {
            d.annual_incidents
                * d.false_positive_share
                * a.hours_per_false_positive
                * d.analyst_hourly
                * a.false_positive_automation_rate
        }
        ValueCategory::BreachRiskReduction => {
            d.annual_incidents
                * d.genuine_share
                * a.escalation_rate
                * a.cost_per_escalation
                * d.response
        }
        ValueCategory::AnalystProductivity => {
            d.annual_incidents
                * a.analyst_hours_per_incident
                * d.efficiency
                * d.analyst_hourly
                * a.productivity_multiplier
        }
        ValueCategory::ReducedDwellTime => {
            d.annual_incidents
                * d.genuine_share
                * record.average_incident_response_time
                * d.response
                * a.dwell_cost_per_incident_hour
        }
        ValueCategory::RetentionSavings => {
            d.headcount
                * a.annual_turnover_rate
                * a.replacement_cost_per_hire
                * a.turnover_reduction
        }
        ValueCategory::ComplianceAutomation => {
            a.compliance_hours_per_month
                * 12.0
                * a.compliance_automation_rate
                * a.compliance_hourly_rate
        }
        ValueCategory::BurnoutReduction => d.headcount * a.stress_cost_per_fte * d.efficiency,
        ValueCategory::ShiftCoverage => {
            record.human_soc_analysts * salaries.analyst * a.shift_premium_rate * d.efficiency
        }
        ValueCategory::TrainingEfficiency => {
            d.headcount * a.training_cost_per_fte * a.training_reduction
        }
        ValueCategory::LogOperations => {
            record.monthly_log_volume_gb * 12.0 * a.log_admin_cost_per_gb * d.efficiency
        }
    }
}

/// Percentage of `total`, zero when the total is zero.
fn share(value: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    value / total * 100.0
}
