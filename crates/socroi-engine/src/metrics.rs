//! Financial comparison between a human SOC and an autonomous SOC.
//!
//! Human cost: `Σ(role_count × salary) + siem_licensing_costs`.
//! Autonomous cost: `incidents × price_per_incident × 12`.
//! The human cost is then scaled down by the modeled efficiency gain, and
//! savings/ROI follow from the difference.

use socroi_core::config::{EfficiencyModel, EngineConfig, PaybackModel, ResponseModel, SalaryTable};
use socroi_core::{InputRecord, ResultRecord};

/// Compute the result record for a fully derived input record.
pub fn compute_results(record: &InputRecord, config: &EngineConfig) -> ResultRecord {
    let human_soc_total_cost = human_soc_total_cost(record, &config.salaries);
    let autonomous_soc_total_cost = autonomous_soc_total_cost(record);

    let efficiency_improvement = efficiency_improvement(record, &config.efficiency);
    let incident_response_improvement = incident_response_improvement(record, &config.response);

    let adjusted_annual_soc_cost = human_soc_total_cost * (1.0 - efficiency_improvement / 100.0);
    let platform_savings = record.siem_licensing_costs - record.stellar_xdr_platform_costs;
    let annual_savings = human_soc_total_cost
        - (adjusted_annual_soc_cost + autonomous_soc_total_cost)
        + platform_savings;

    ResultRecord {
        human_soc_total_cost,
        autonomous_soc_total_cost,
        adjusted_annual_soc_cost,
        platform_savings,
        annual_savings,
        roi_percentage: roi_percentage(annual_savings, autonomous_soc_total_cost),
        payback_period: payback_period(annual_savings, &config.payback),
        efficiency_improvement,
        incident_response_improvement,
    }
}

/// Salaries for every role plus legacy SIEM licensing.
pub fn human_soc_total_cost(record: &InputRecord, salaries: &SalaryTable) -> f64 {
    record.human_soc_analysts * salaries.analyst
        + record.human_soc_manager * salaries.manager
        + record.human_soc_engineer * salaries.engineer
        + record.human_soc_director * salaries.director
        + record.siem_licensing_costs
}

pub fn autonomous_soc_total_cost(record: &InputRecord) -> f64 {
    record.security_incidents_per_month * record.price_per_security_incident * 12.0
}

/// Percentage of human effort automation takes over.
///
/// Each factor is capped on its own before the overall cap applies.
pub fn efficiency_improvement(record: &InputRecord, model: &EfficiencyModel) -> f64 {
    let false_positive =
        (record.false_positive_rate * model.false_positive_weight).min(model.false_positive_cap);
    let response_time = (record.average_incident_response_time * model.response_time_weight)
        .min(model.response_time_cap);
    let excess_gb = (record.monthly_log_volume_gb - model.log_threshold_gb).max(0.0);
    let log_volume = (excess_gb * model.log_volume_weight).min(model.log_volume_cap);

    (model.base + false_positive + response_time + log_volume).min(model.cap)
}

pub fn incident_response_improvement(record: &InputRecord, model: &ResponseModel) -> f64 {
    let response_time = (record.average_incident_response_time * model.response_time_weight)
        .min(model.response_time_cap);
    let false_positive =
        (record.false_positive_rate * model.false_positive_weight).min(model.false_positive_cap);

    (model.base + response_time + false_positive).min(model.cap)
}

/// Zero when there is no autonomous cost to divide by.
pub fn roi_percentage(annual_savings: f64, autonomous_cost: f64) -> f64 {
    if autonomous_cost == 0.0 {
        return 0.0;
    }
    annual_savings / autonomous_cost * 100.0
}

/// Months until the setup cost is recouped.
pub fn payback_period(annual_savings: f64, model: &PaybackModel) -> f64 {
    match model {
        PaybackModel::Immediate => 0.0,
        PaybackModel::SetupCost { setup_cost } => {
            if annual_savings == 0.0 {
                0.0
            } else {
                setup_cost / annual_savings * 12.0
            }
        }
    }
}
