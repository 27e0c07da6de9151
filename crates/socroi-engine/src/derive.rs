//! Field derivation: keeps an `InputRecord` consistent after a single edit.
//!
//! Every edit maps to a `Trigger`, and `recompute` is the only place that
//! updates derived fields. Employee count and incident count derive from
//! each other, but only in the direction of the field that was edited, so a
//! cascade always terminates after one pass.

use socroi_core::config::{EngineConfig, StaffingRatios};
use socroi_core::{BaseInputs, FieldName, FieldValue, InputRecord, Result};

/// Which recomputation an edit sets off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Employees changed: incidents follow, then the shared cascade.
    Employees,
    /// Incidents changed: employees follow, then the shared cascade.
    Incidents,
    /// Log ratio changed: log volume and both platform costs.
    LogRatio,
    /// XDR rate changed: XDR platform cost only.
    XdrRate,
    /// SIEM rate changed: SIEM licensing cost only.
    SiemRate,
    /// Raw assignment, nothing else moves.
    None,
}

impl Trigger {
    pub fn for_field(field: FieldName) -> Self {
        match field {
            FieldName::EmployeeCount => Self::Employees,
            FieldName::SecurityIncidentsPerMonth => Self::Incidents,
            FieldName::LogVolumeIncidentRatio => Self::LogRatio,
            FieldName::StellarXdrCostPerGb => Self::XdrRate,
            FieldName::LegacySiemPricePerGb => Self::SiemRate,
            _ => Self::None,
        }
    }
}

/// Applies edits and recomputes dependent fields.
///
/// The incident-per-employee ratio is fixed when the deriver is built.
#[derive(Debug, Clone)]
pub struct Deriver {
    incidents_per_employee: f64,
    staffing: StaffingRatios,
}

impl Deriver {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            incidents_per_employee: config.baseline.incidents_per_employee(),
            staffing: config.staffing.clone(),
        }
    }

    pub fn incidents_per_employee(&self) -> f64 {
        self.incidents_per_employee
    }

    /// Return a new record with `field` set to `value` and every dependent
    /// field recomputed. The current record is left untouched.
    pub fn derive(
        &self,
        current: &InputRecord,
        field: FieldName,
        value: FieldValue,
    ) -> Result<InputRecord> {
        let mut next = current.clone();
        next.set(field, value)?;

        let trigger = Trigger::for_field(field);
        self.recompute(&mut next, trigger);

        tracing::debug!(%field, ?trigger, "Derived input record");
        Ok(next)
    }

    /// Regenerate a full record from its persisted subset.
    pub fn calculate_computed_fields(&self, base: &BaseInputs) -> InputRecord {
        let mut record = InputRecord::from_base(base);
        self.recompute(&mut record, Trigger::Employees);
        record
    }

    fn recompute(&self, record: &mut InputRecord, trigger: Trigger) {
        match trigger {
            Trigger::Employees => {
                record.security_incidents_per_month =
                    round_half_up(record.employee_count * self.incidents_per_employee);
                self.cascade(record);
            }
            Trigger::Incidents => {
                let incidents = record.security_incidents_per_month;
                record.employee_count = round_half_up(incidents / self.incidents_per_employee);
                self.cascade(record);
            }
            Trigger::LogRatio => {
                update_log_volume(record);
                update_xdr_cost(record);
                update_siem_cost(record);
            }
            Trigger::XdrRate => update_xdr_cost(record),
            Trigger::SiemRate => update_siem_cost(record),
            Trigger::None => {}
        }
    }

    /// Staffing, log volume, and platform costs from the current incident count.
    fn cascade(&self, record: &mut InputRecord) {
        let incidents = record.security_incidents_per_month;
        record.human_soc_analysts = headcount(incidents, self.staffing.incidents_per_analyst);
        record.human_soc_manager = headcount(incidents, self.staffing.incidents_per_manager);
        record.human_soc_engineer = headcount(incidents, self.staffing.incidents_per_engineer);
        record.human_soc_director = headcount(incidents, self.staffing.incidents_per_director);

        update_log_volume(record);
        update_xdr_cost(record);
        update_siem_cost(record);
    }
}

fn update_log_volume(record: &mut InputRecord) {
    record.monthly_log_volume_gb =
        round_half_up(record.security_incidents_per_month * record.log_volume_incident_ratio);
}

fn update_xdr_cost(record: &mut InputRecord) {
    record.stellar_xdr_platform_costs =
        record.monthly_log_volume_gb * record.stellar_xdr_cost_per_gb * 12.0;
}

fn update_siem_cost(record: &mut InputRecord) {
    record.siem_licensing_costs =
        record.monthly_log_volume_gb * record.legacy_siem_price_per_gb * 12.0;
}

/// Whole people needed for `incidents`, never rounded down.
fn headcount(incidents: f64, per_person: f64) -> f64 {
    (incidents / per_person).ceil()
}

/// Nearest integer, ties toward positive infinity (`2.5 → 3`, `-2.5 → -2`).
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socroi_core::RoiError;

    fn deriver() -> Deriver {
        Deriver::from_config(&EngineConfig::default())
    }

    fn defaults() -> InputRecord {
        deriver().calculate_computed_fields(&BaseInputs::default())
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(7.0), 7.0);
    }

    #[test]
    fn test_trigger_mapping() {
        assert_eq!(Trigger::for_field(FieldName::EmployeeCount), Trigger::Employees);
        assert_eq!(
            Trigger::for_field(FieldName::SecurityIncidentsPerMonth),
            Trigger::Incidents
        );
        assert_eq!(Trigger::for_field(FieldName::HumanSocAnalysts), Trigger::None);
        assert_eq!(Trigger::for_field(FieldName::MonthlyLogVolumeGb), Trigger::None);
        assert_eq!(Trigger::for_field(FieldName::SwitchFromLegacySiem), Trigger::None);
    }

    #[test]
    fn test_default_record_is_consistent() {
        let record = defaults();
        assert_eq!(record.security_incidents_per_month, 2400.0);
        assert_eq!(record.human_soc_analysts, 3.0);
        assert_eq!(record.human_soc_manager, 1.0);
        assert_eq!(record.human_soc_engineer, 1.0);
        assert_eq!(record.human_soc_director, 1.0);
        assert_eq!(record.monthly_log_volume_gb, 3600.0);
        assert_eq!(record.stellar_xdr_platform_costs, 86_400.0);
        assert_eq!(record.siem_licensing_costs, 129_600.0);
    }

    #[test]
    fn test_employee_edit_cascades() {
        let next = deriver()
            .derive(&defaults(), FieldName::EmployeeCount, FieldValue::Number(1250.0))
            .unwrap();

        // 1250 * 4.8 = 6000
        assert_eq!(next.security_incidents_per_month, 6000.0);
        assert_eq!(next.human_soc_analysts, 6.0);
        assert_eq!(next.human_soc_manager, 2.0);
        assert_eq!(next.human_soc_engineer, 2.0);
        assert_eq!(next.human_soc_director, 1.0);
        assert_eq!(next.monthly_log_volume_gb, 9000.0);
        assert_eq!(next.stellar_xdr_platform_costs, 216_000.0);
        assert_eq!(next.siem_licensing_costs, 324_000.0);
    }

    #[test]
    fn test_incident_edit_derives_employees() {
        let next = deriver()
            .derive(
                &defaults(),
                FieldName::SecurityIncidentsPerMonth,
                FieldValue::Number(3001.0),
            )
            .unwrap();

        // 3001 / 4.8 = 625.2
        assert_eq!(next.employee_count, 625.0);
        assert_eq!(next.human_soc_analysts, 4.0);
        assert_eq!(next.human_soc_manager, 2.0);
        assert_eq!(next.human_soc_director, 1.0);
        assert_eq!(next.monthly_log_volume_gb, 4502.0);
    }

    #[test]
    fn test_log_ratio_edit_skips_staffing() {
        let mut current = defaults();
        current.human_soc_analysts = 10.0;

        let next = deriver()
            .derive(&current, FieldName::LogVolumeIncidentRatio, FieldValue::Number(0.75))
            .unwrap();

        assert_eq!(next.monthly_log_volume_gb, 1800.0);
        assert_eq!(next.stellar_xdr_platform_costs, 43_200.0);
        assert_eq!(next.siem_licensing_costs, 64_800.0);
        assert_eq!(next.human_soc_analysts, 10.0);
        assert_eq!(next.employee_count, 500.0);
    }

    #[test]
    fn test_rate_edits_touch_only_their_cost() {
        let current = defaults();

        let xdr = deriver()
            .derive(&current, FieldName::StellarXdrCostPerGb, FieldValue::Number(2.5))
            .unwrap();
        assert_eq!(xdr.stellar_xdr_platform_costs, 108_000.0);
        assert_eq!(xdr.siem_licensing_costs, current.siem_licensing_costs);
        assert_eq!(xdr.monthly_log_volume_gb, current.monthly_log_volume_gb);

        let siem = deriver()
            .derive(&current, FieldName::LegacySiemPricePerGb, FieldValue::Number(4.0))
            .unwrap();
        assert_eq!(siem.siem_licensing_costs, 172_800.0);
        assert_eq!(siem.stellar_xdr_platform_costs, current.stellar_xdr_platform_costs);
    }

    #[test]
    fn test_override_is_kept_until_next_driving_edit() {
        let d = deriver();
        let overridden = d
            .derive(&defaults(), FieldName::HumanSocAnalysts, FieldValue::Number(12.0))
            .unwrap();
        assert_eq!(overridden.human_soc_analysts, 12.0);
        assert_eq!(overridden.security_incidents_per_month, 2400.0);

        let after_fp = d
            .derive(&overridden, FieldName::FalsePositiveRate, FieldValue::Number(55.0))
            .unwrap();
        assert_eq!(after_fp.human_soc_analysts, 12.0);

        let after_employees = d
            .derive(&after_fp, FieldName::EmployeeCount, FieldValue::Number(500.0))
            .unwrap();
        assert_eq!(after_employees.human_soc_analysts, 3.0);
    }

    #[test]
    fn test_log_volume_override_is_raw() {
        let next = deriver()
            .derive(&defaults(), FieldName::MonthlyLogVolumeGb, FieldValue::Number(100.0))
            .unwrap();
        assert_eq!(next.monthly_log_volume_gb, 100.0);
        assert_eq!(next.stellar_xdr_platform_costs, 86_400.0);
    }

    #[test]
    fn test_switch_flag_is_carried_through() {
        let current = defaults();
        let next = deriver()
            .derive(&current, FieldName::SwitchFromLegacySiem, FieldValue::Flag(false))
            .unwrap();
        assert!(!next.switch_from_legacy_siem);
        assert_eq!(
            InputRecord {
                switch_from_legacy_siem: true,
                ..next
            },
            current
        );
    }

    #[test]
    fn test_type_mismatch_leaves_current_untouched() {
        let current = defaults();
        let err = deriver()
            .derive(&current, FieldName::EmployeeCount, FieldValue::Flag(true))
            .unwrap_err();
        assert!(matches!(err, RoiError::FieldType { .. }));
        assert_eq!(current, defaults());
    }

    #[test]
    fn test_negative_employees_accepted_arithmetically() {
        let next = deriver()
            .derive(&defaults(), FieldName::EmployeeCount, FieldValue::Number(-100.0))
            .unwrap();
        assert_eq!(next.security_incidents_per_month, -480.0);
        // ceil(-0.48) is -0.0, which compares equal to 0.0.
        assert_eq!(next.human_soc_analysts, 0.0);
        assert_eq!(next.human_soc_director, 0.0);
        assert_eq!(next.monthly_log_volume_gb, -720.0);
    }

    #[test]
    fn test_negative_incidents_give_negative_headcount() {
        let next = deriver()
            .derive(
                &defaults(),
                FieldName::SecurityIncidentsPerMonth,
                FieldValue::Number(-12_000.0),
            )
            .unwrap();
        assert_eq!(next.employee_count, -2500.0);
        assert_eq!(next.human_soc_analysts, (-12_000.0f64 / 1000.0).ceil());
        assert_eq!(next.human_soc_analysts, -12.0);
        assert_eq!(next.human_soc_manager, -4.0);
        assert_eq!(next.human_soc_engineer, -4.0);
        assert_eq!(next.human_soc_director, -2.0);
        assert_eq!(next.monthly_log_volume_gb, -18_000.0);
        assert_eq!(next.stellar_xdr_platform_costs, -18_000.0 * 2.0 * 12.0);
    }
}
