//! Engine configuration for the SOC ROI estimator.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (SOCROI__ prefix, `__` separator)
//! 2. Config file (socroi.toml, `[engine]` section)
//! 3. Defaults
//!
//! The same layered sources also carry the CLI's `[store]` table, read with
//! `store_path`.
//!
//! Every constant the formulas use lives here, so switching between the
//! canonical model and the compact variant is a configuration choice.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoiError};
use crate::types::ValueCategory;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub baseline: Baseline,
    pub staffing: StaffingRatios,
    pub salaries: SalaryTable,
    pub efficiency: EfficiencyModel,
    pub response: ResponseModel,
    pub payback: PaybackModel,
    pub value: ValueAssumptions,
}

impl EngineConfig {
    /// Load configuration from `<file_prefix>.toml` and `SOCROI__` environment
    /// variables. A missing `[engine]` section yields the defaults.
    pub fn load(file_prefix: &str) -> Result<Self> {
        let cfg = layered_sources(file_prefix)?;

        let engine = match cfg.get::<EngineConfig>("engine") {
            Ok(c) => c,
            Err(config::ConfigError::NotFound(_)) => EngineConfig::default(),
            Err(e) => return Err(e.into()),
        };
        engine.validate()?;
        tracing::debug!(
            file_prefix,
            categories = engine.value.categories.len(),
            "Engine configuration loaded"
        );
        Ok(engine)
    }

    /// Reject configurations that would make a derivation divide by zero.
    pub fn validate(&self) -> Result<()> {
        positive("baseline.employees", self.baseline.employees)?;
        positive("baseline.incidents_per_month", self.baseline.incidents_per_month)?;
        positive("staffing.incidents_per_analyst", self.staffing.incidents_per_analyst)?;
        positive("staffing.incidents_per_manager", self.staffing.incidents_per_manager)?;
        positive("staffing.incidents_per_engineer", self.staffing.incidents_per_engineer)?;
        positive("staffing.incidents_per_director", self.staffing.incidents_per_director)?;
        positive("value.working_hours_per_year", self.value.working_hours_per_year)?;
        Ok(())
    }
}

/// `<file_prefix>.toml` overlaid with `SOCROI__` environment variables.
pub fn layered_sources(file_prefix: &str) -> Result<config::Config> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("SOCROI")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;
    Ok(cfg)
}

/// The `store.path` setting, if one is configured.
pub fn store_path(file_prefix: &str) -> Result<Option<PathBuf>> {
    let cfg = layered_sources(file_prefix)?;
    match cfg.get_string("store.path") {
        Ok(path) => Ok(Some(PathBuf::from(path))),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn positive(field: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(RoiError::InvalidConfig {
            field: field.to_string(),
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

/// Reference point for the employee ↔ incident ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Baseline {
    pub employees: f64,
    pub incidents_per_month: f64,
}

impl Baseline {
    /// Monthly incidents per employee.
    pub fn incidents_per_employee(&self) -> f64 {
        self.incidents_per_month / self.employees
    }
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            employees: 500.0,
            incidents_per_month: 2400.0,
        }
    }
}

/// Monthly incidents one person in each role can handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffingRatios {
    pub incidents_per_analyst: f64,
    pub incidents_per_manager: f64,
    pub incidents_per_engineer: f64,
    pub incidents_per_director: f64,
}

impl Default for StaffingRatios {
    fn default() -> Self {
        Self {
            incidents_per_analyst: 1000.0,
            incidents_per_manager: 3000.0,
            incidents_per_engineer: 3000.0,
            incidents_per_director: 6000.0,
        }
    }
}

/// Fully loaded annual salary per role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryTable {
    pub analyst: f64,
    pub manager: f64,
    pub engineer: f64,
    pub director: f64,
}

impl Default for SalaryTable {
    fn default() -> Self {
        Self {
            analyst: 85_000.0,
            manager: 120_000.0,
            engineer: 150_000.0,
            director: 200_000.0,
        }
    }
}

/// Parameters of the efficiency-improvement formula.
///
/// `base + min(fp * fp_weight, fp_cap) + min(rt * response_weight, response_cap)
///  + min(max(0, gb - log_threshold_gb) * log_weight, log_cap)`, capped at `cap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyModel {
    pub base: f64,
    pub cap: f64,
    pub false_positive_weight: f64,
    pub false_positive_cap: f64,
    pub response_time_weight: f64,
    pub response_time_cap: f64,
    pub log_threshold_gb: f64,
    pub log_volume_weight: f64,
    pub log_volume_cap: f64,
}

impl Default for EfficiencyModel {
    fn default() -> Self {
        Self {
            base: 38.0,
            cap: 80.0,
            false_positive_weight: 0.2,
            false_positive_cap: 15.0,
            response_time_weight: 3.0,
            response_time_cap: 25.0,
            log_threshold_gb: 1024.0,
            log_volume_weight: 0.001,
            log_volume_cap: 15.0,
        }
    }
}

/// Parameters of the incident-response-improvement formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseModel {
    pub base: f64,
    pub cap: f64,
    pub response_time_weight: f64,
    pub response_time_cap: f64,
    pub false_positive_weight: f64,
    pub false_positive_cap: f64,
}

impl Default for ResponseModel {
    fn default() -> Self {
        Self {
            base: 45.0,
            cap: 80.0,
            response_time_weight: 2.0,
            response_time_cap: 15.0,
            false_positive_weight: 0.15,
            false_positive_cap: 8.0,
        }
    }
}

/// How the payback period is modeled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum PaybackModel {
    /// No setup cost, so payback is immediate.
    #[default]
    Immediate,
    /// One-off setup cost recouped from annual savings.
    SetupCost { setup_cost: f64 },
}

/// Categories and constant assumptions behind the value breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueAssumptions {
    /// Categories to compute, in tie-break order.
    pub categories: Vec<ValueCategory>,
    /// Scale risk and dwell-time value by the share of genuine incidents.
    pub false_positive_adjusted: bool,
    pub working_hours_per_year: f64,
    pub hours_per_false_positive: f64,
    pub false_positive_automation_rate: f64,
    pub escalation_rate: f64,
    pub cost_per_escalation: f64,
    pub analyst_hours_per_incident: f64,
    pub productivity_multiplier: f64,
    pub dwell_cost_per_incident_hour: f64,
    pub annual_turnover_rate: f64,
    pub replacement_cost_per_hire: f64,
    pub turnover_reduction: f64,
    pub compliance_hours_per_month: f64,
    pub compliance_automation_rate: f64,
    pub compliance_hourly_rate: f64,
    pub stress_cost_per_fte: f64,
    pub shift_premium_rate: f64,
    pub training_cost_per_fte: f64,
    pub training_reduction: f64,
    pub log_admin_cost_per_gb: f64,
}

impl ValueAssumptions {
    /// The ten-category model with false-positive-adjusted risk values.
    pub fn full() -> Self {
        Self::default()
    }

    /// The eight-category variant without false-positive adjustment.
    pub fn compact() -> Self {
        Self {
            categories: vec![
                ValueCategory::FalsePositiveTriage,
                ValueCategory::BreachRiskReduction,
                ValueCategory::AnalystProductivity,
                ValueCategory::ReducedDwellTime,
                ValueCategory::RetentionSavings,
                ValueCategory::ComplianceAutomation,
                ValueCategory::BurnoutReduction,
                ValueCategory::ShiftCoverage,
            ],
            false_positive_adjusted: false,
            ..Self::default()
        }
    }
}

impl Default for ValueAssumptions {
    fn default() -> Self {
        Self {
            categories: vec![
                ValueCategory::FalsePositiveTriage,
                ValueCategory::BreachRiskReduction,
                ValueCategory::AnalystProductivity,
                ValueCategory::ReducedDwellTime,
                ValueCategory::RetentionSavings,
                ValueCategory::ComplianceAutomation,
                ValueCategory::BurnoutReduction,
                ValueCategory::ShiftCoverage,
                ValueCategory::TrainingEfficiency,
                ValueCategory::LogOperations,
            ],
            false_positive_adjusted: true,
            working_hours_per_year: 2080.0,
            hours_per_false_positive: 0.5,
            false_positive_automation_rate: 0.9,
            escalation_rate: 0.01,
            cost_per_escalation: 15_000.0,
            analyst_hours_per_incident: 0.25,
            productivity_multiplier: 1.5,
            dwell_cost_per_incident_hour: 5.0,
            annual_turnover_rate: 0.3,
            replacement_cost_per_hire: 25_000.0,
            turnover_reduction: 0.5,
            compliance_hours_per_month: 40.0,
            compliance_automation_rate: 0.7,
            compliance_hourly_rate: 95.0,
            stress_cost_per_fte: 8_000.0,
            shift_premium_rate: 0.15,
            training_cost_per_fte: 4_000.0,
            training_reduction: 0.5,
            log_admin_cost_per_gb: 0.05,
        }
    }
}
