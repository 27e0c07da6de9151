//! Core domain types for the SOC ROI estimator.
//!
//! The `InputRecord` is the single source of truth for a calculation. The
//! engine derives its dependent fields, then produces a `ResultRecord` and a
//! `ValueBreakdown` from it. All of these are plain serde records so that the
//! presentation layer and the persistence port can consume them directly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RoiError;

// ── Inputs ────────────────────────────────────────────────────────

/// The full set of calculator inputs, base and derived.
///
/// Derived fields (incident volume, headcount, log volume, platform costs)
/// are only consistent immediately after the engine has processed an edit.
/// Direct overrides of a derived field are kept as-is until the next edit of
/// a driving field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub employee_count: f64,
    pub security_incidents_per_month: f64,
    /// Hours.
    pub average_incident_response_time: f64,
    /// Percent, 0–100.
    pub false_positive_rate: f64,
    pub price_per_security_incident: f64,
    pub human_soc_analysts: f64,
    pub human_soc_manager: f64,
    pub human_soc_engineer: f64,
    pub human_soc_director: f64,
    pub legacy_siem_price_per_gb: f64,
    pub stellar_xdr_cost_per_gb: f64,
    /// Reserved. Carried through every computation but never read by a formula.
    pub switch_from_legacy_siem: bool,
    /// GB of log volume per incident.
    pub log_volume_incident_ratio: f64,
    pub monthly_log_volume_gb: f64,
    /// Annual.
    pub stellar_xdr_platform_costs: f64,
    /// Annual.
    pub siem_licensing_costs: f64,
}

impl InputRecord {
    /// Seed a record from its base subset.
    ///
    /// Derived fields are zeroed; callers must run the engine's
    /// `calculate_computed_fields` to make the record consistent.
    pub fn from_base(base: &BaseInputs) -> Self {
        Self {
            employee_count: base.employee_count,
            security_incidents_per_month: 0.0,
            average_incident_response_time: base.average_incident_response_time,
            false_positive_rate: base.false_positive_rate,
            price_per_security_incident: base.price_per_security_incident,
            human_soc_analysts: 0.0,
            human_soc_manager: 0.0,
            human_soc_engineer: 0.0,
            human_soc_director: 0.0,
            legacy_siem_price_per_gb: base.legacy_siem_price_per_gb,
            stellar_xdr_cost_per_gb: base.stellar_xdr_cost_per_gb,
            switch_from_legacy_siem: base.switch_from_legacy_siem,
            log_volume_incident_ratio: base.log_volume_incident_ratio,
            monthly_log_volume_gb: 0.0,
            stellar_xdr_platform_costs: 0.0,
            siem_licensing_costs: 0.0,
        }
    }

    /// Project this record onto the subset that gets persisted.
    pub fn base(&self) -> BaseInputs {
        BaseInputs {
            employee_count: self.employee_count,
            average_incident_response_time: self.average_incident_response_time,
            false_positive_rate: self.false_positive_rate,
            price_per_security_incident: self.price_per_security_incident,
            legacy_siem_price_per_gb: self.legacy_siem_price_per_gb,
            stellar_xdr_cost_per_gb: self.stellar_xdr_cost_per_gb,
            switch_from_legacy_siem: self.switch_from_legacy_siem,
            log_volume_incident_ratio: self.log_volume_incident_ratio,
        }
    }

    /// Total human SOC headcount across all four roles.
    pub fn total_headcount(&self) -> f64 {
        self.human_soc_analysts
            + self.human_soc_manager
            + self.human_soc_engineer
            + self.human_soc_director
    }

    /// Read a single field.
    pub fn get(&self, field: FieldName) -> FieldValue {
        use FieldName::*;
        let n = match field {
            EmployeeCount => self.employee_count,
            SecurityIncidentsPerMonth => self.security_incidents_per_month,
            AverageIncidentResponseTime => self.average_incident_response_time,
            FalsePositiveRate => self.false_positive_rate,
            PricePerSecurityIncident => self.price_per_security_incident,
            HumanSocAnalysts => self.human_soc_analysts,
            HumanSocManager => self.human_soc_manager,
            HumanSocEngineer => self.human_soc_engineer,
            HumanSocDirector => self.human_soc_director,
            LegacySiemPricePerGb => self.legacy_siem_price_per_gb,
            StellarXdrCostPerGb => self.stellar_xdr_cost_per_gb,
            SwitchFromLegacySiem => return FieldValue::Flag(self.switch_from_legacy_siem),
            LogVolumeIncidentRatio => self.log_volume_incident_ratio,
            MonthlyLogVolumeGb => self.monthly_log_volume_gb,
            StellarXdrPlatformCosts => self.stellar_xdr_platform_costs,
            SiemLicensingCosts => self.siem_licensing_costs,
        };
        FieldValue::Number(n)
    }

    /// Assign a single field with no derived recomputation.
    ///
    /// Fails only when the value kind does not match the field.
    pub fn set(&mut self, field: FieldName, value: FieldValue) -> Result<(), RoiError> {
        use FieldName::*;
        let slot = match field {
            SwitchFromLegacySiem => {
                self.switch_from_legacy_siem = value.as_flag(field)?;
                return Ok(());
            }
            EmployeeCount => &mut self.employee_count,
            SecurityIncidentsPerMonth => &mut self.security_incidents_per_month,
            AverageIncidentResponseTime => &mut self.average_incident_response_time,
            FalsePositiveRate => &mut self.false_positive_rate,
            PricePerSecurityIncident => &mut self.price_per_security_incident,
            HumanSocAnalysts => &mut self.human_soc_analysts,
            HumanSocManager => &mut self.human_soc_manager,
            HumanSocEngineer => &mut self.human_soc_engineer,
            HumanSocDirector => &mut self.human_soc_director,
            LegacySiemPricePerGb => &mut self.legacy_siem_price_per_gb,
            StellarXdrCostPerGb => &mut self.stellar_xdr_cost_per_gb,
            LogVolumeIncidentRatio => &mut self.log_volume_incident_ratio,
            MonthlyLogVolumeGb => &mut self.monthly_log_volume_gb,
            StellarXdrPlatformCosts => &mut self.stellar_xdr_platform_costs,
            SiemLicensingCosts => &mut self.siem_licensing_costs,
        };
        *slot = value.as_number(field)?;
        Ok(())
    }
}

/// The user-controlled, non-derived inputs. This is what gets persisted.
///
/// Missing fields in a stored document fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseInputs {
    pub employee_count: f64,
    pub average_incident_response_time: f64,
    pub false_positive_rate: f64,
    pub price_per_security_incident: f64,
    pub legacy_siem_price_per_gb: f64,
    pub stellar_xdr_cost_per_gb: f64,
    pub switch_from_legacy_siem: bool,
    pub log_volume_incident_ratio: f64,
}

impl Default for BaseInputs {
    fn default() -> Self {
        Self {
            employee_count: 500.0,
            average_incident_response_time: 4.0,
            false_positive_rate: 40.0,
            price_per_security_incident: 10.0,
            legacy_siem_price_per_gb: 3.0,
            stellar_xdr_cost_per_gb: 2.0,
            switch_from_legacy_siem: true,
            log_volume_incident_ratio: 1.5,
        }
    }
}

// ── Field Edits ───────────────────────────────────────────────────

/// Every editable field of an `InputRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    EmployeeCount,
    SecurityIncidentsPerMonth,
    AverageIncidentResponseTime,
    FalsePositiveRate,
    PricePerSecurityIncident,
    HumanSocAnalysts,
    HumanSocManager,
    HumanSocEngineer,
    HumanSocDirector,
    LegacySiemPricePerGb,
    StellarXdrCostPerGb,
    SwitchFromLegacySiem,
    LogVolumeIncidentRatio,
    MonthlyLogVolumeGb,
    StellarXdrPlatformCosts,
    SiemLicensingCosts,
}

impl FieldName {
    pub const ALL: [FieldName; 16] = [
        Self::EmployeeCount,
        Self::SecurityIncidentsPerMonth,
        Self::AverageIncidentResponseTime,
        Self::FalsePositiveRate,
        Self::PricePerSecurityIncident,
        Self::HumanSocAnalysts,
        Self::HumanSocManager,
        Self::HumanSocEngineer,
        Self::HumanSocDirector,
        Self::LegacySiemPricePerGb,
        Self::StellarXdrCostPerGb,
        Self::SwitchFromLegacySiem,
        Self::LogVolumeIncidentRatio,
        Self::MonthlyLogVolumeGb,
        Self::StellarXdrPlatformCosts,
        Self::SiemLicensingCosts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmployeeCount => "employee_count",
            Self::SecurityIncidentsPerMonth => "security_incidents_per_month",
            Self::AverageIncidentResponseTime => "average_incident_response_time",
            Self::FalsePositiveRate => "false_positive_rate",
            Self::PricePerSecurityIncident => "price_per_security_incident",
            Self::HumanSocAnalysts => "human_soc_analysts",
            Self::HumanSocManager => "human_soc_manager",
            Self::HumanSocEngineer => "human_soc_engineer",
            Self::HumanSocDirector => "human_soc_director",
            Self::LegacySiemPricePerGb => "legacy_siem_price_per_gb",
            Self::StellarXdrCostPerGb => "stellar_xdr_cost_per_gb",
            Self::SwitchFromLegacySiem => "switch_from_legacy_siem",
            Self::LogVolumeIncidentRatio => "log_volume_incident_ratio",
            Self::MonthlyLogVolumeGb => "monthly_log_volume_gb",
            Self::StellarXdrPlatformCosts => "stellar_xdr_platform_costs",
            Self::SiemLicensingCosts => "siem_licensing_costs",
        }
    }

    /// Whether the field is part of the persisted base subset.
    pub fn is_base(&self) -> bool {
        !matches!(
            self,
            Self::SecurityIncidentsPerMonth
                | Self::HumanSocAnalysts
                | Self::HumanSocManager
                | Self::HumanSocEngineer
                | Self::HumanSocDirector
                | Self::MonthlyLogVolumeGb
                | Self::StellarXdrPlatformCosts
                | Self::SiemLicensingCosts
        )
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts snake_case (`employee_count`) as well as the camelCase UI names
/// (`employeeCount`, `humanSOCAnalysts`, `stellarXDRCostPerGB`).
impl FromStr for FieldName {
    type Err = RoiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .iter()
            .copied()
            .find(|f| normalize(f.as_str()) == wanted)
            .ok_or_else(|| RoiError::UnknownField(s.to_string()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The new value of an edited field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    /// Parse a raw string according to the kind of `field`.
    pub fn parse_for(field: FieldName, raw: &str) -> Result<Self, RoiError> {
        let raw = raw.trim();
        let invalid = || RoiError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
        };

        if field == FieldName::SwitchFromLegacySiem {
            return match raw.to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(Self::Flag(true)),
                "false" | "no" | "off" | "0" => Ok(Self::Flag(false)),
                _ => Err(invalid()),
            };
        }

        raw.parse::<f64>().map(Self::Number).map_err(|_| invalid())
    }

    /// Parse a `field=value` edit, accepting any spelling `FieldName` accepts.
    pub fn parse_edit(raw: &str) -> Result<(FieldName, Self), RoiError> {
        let (name, value) = raw
            .split_once('=')
            .ok_or_else(|| RoiError::InvalidEdit(raw.to_string()))?;
        let field: FieldName = name.trim().parse()?;
        let value = Self::parse_for(field, value)?;
        Ok((field, value))
    }

    pub fn as_number(&self, field: FieldName) -> Result<f64, RoiError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Flag(_) => Err(RoiError::FieldType {
                field: field.to_string(),
                expected: "numeric",
            }),
        }
    }

    pub fn as_flag(&self, field: FieldName) -> Result<bool, RoiError> {
        match self {
            Self::Flag(b) => Ok(*b),
            Self::Number(_) => Err(RoiError::FieldType {
                field: field.to_string(),
                expected: "boolean",
            }),
        }
    }
}

// ── Results ───────────────────────────────────────────────────────

/// The financial comparison between a human SOC and an autonomous SOC.
///
/// All currency amounts are annual. Improvements are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub human_soc_total_cost: f64,
    pub autonomous_soc_total_cost: f64,
    pub adjusted_annual_soc_cost: f64,
    pub platform_savings: f64,
    pub annual_savings: f64,
    pub roi_percentage: f64,
    /// Months.
    pub payback_period: f64,
    pub efficiency_improvement: f64,
    pub incident_response_improvement: f64,
}

// ── Value Breakdown ───────────────────────────────────────────────

/// Named value contributions shown in the breakdown and the donut chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueCategory {
    FalsePositiveTriage,
    BreachRiskReduction,
    AnalystProductivity,
    ReducedDwellTime,
    RetentionSavings,
    ComplianceAutomation,
    BurnoutReduction,
    ShiftCoverage,
    TrainingEfficiency,
    LogOperations,
}

impl ValueCategory {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FalsePositiveTriage => "False Positive Reduction",
            Self::BreachRiskReduction => "Prevented Escalations",
            Self::AnalystProductivity => "Analyst Productivity",
            Self::ReducedDwellTime => "Faster Containment",
            Self::RetentionSavings => "Analyst Retention",
            Self::ComplianceAutomation => "Compliance Reporting",
            Self::BurnoutReduction => "Burnout & Stress Reduction",
            Self::ShiftCoverage => "Off-Hours Coverage",
            Self::TrainingEfficiency => "Training & Onboarding",
            Self::LogOperations => "Log Pipeline Operations",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FalsePositiveTriage => {
                "Analyst hours no longer spent triaging alerts that turn out to be benign"
            }
            Self::BreachRiskReduction => {
                "Expected loss avoided by stopping genuine incidents before they escalate"
            }
            Self::AnalystProductivity => {
                "Time freed by automation, redirected to threat hunting and engineering"
            }
            Self::ReducedDwellTime => {
                "Lower business impact from shorter attacker dwell time on genuine incidents"
            }
            Self::RetentionSavings => "Fewer analyst departures and lower replacement hiring cost",
            Self::ComplianceAutomation => {
                "Audit evidence and compliance reports generated automatically"
            }
            Self::BurnoutReduction => "Reduced alert fatigue, sick leave, and overtime pressure",
            Self::ShiftCoverage => "Night and weekend coverage without shift premiums",
            Self::TrainingEfficiency => "Smaller onboarding and certification burden per analyst",
            Self::LogOperations => "Less manual parsing, tuning, and retention management of logs",
        }
    }
}

/// A single named contribution to the value breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueEntry {
    pub category: ValueCategory,
    pub name: String,
    /// Annual currency, never negative.
    pub value: f64,
    pub description: String,
    /// Share of the total, 0–100. Zero when the total is zero.
    pub percentage: f64,
}

/// The value-category breakdown, sorted by descending value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueBreakdown {
    pub entries: Vec<ValueEntry>,
    pub total_value: f64,
}

/// One donut slice, in degrees clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub category: ValueCategory,
    pub start_degrees: f64,
    pub sweep_degrees: f64,
}

impl ValueBreakdown {
    /// Donut slices in display order: the first entry starts at the top and
    /// each following slice continues clockwise where the previous ended.
    pub fn slices(&self) -> Vec<DonutSlice> {
        let mut start = 0.0;
        self.entries
            .iter()
            .map(|entry| {
                let sweep = entry.percentage * 3.6;
                let slice = DonutSlice {
                    category: entry.category,
                    start_degrees: start,
                    sweep_degrees: sweep,
                };
                start += sweep;
                slice
            })
            .collect()
    }

    pub fn get(&self, category: ValueCategory) -> Option<&ValueEntry> {
        self.entries.iter().find(|e| e.category == category)
    }
}
