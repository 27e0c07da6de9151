//! socroi-engine: Derived-state calculation engine for the SOC ROI estimator.
//!
//! Takes the calculator's input record, keeps its dependent fields consistent
//! after every edit, and computes the human-vs-autonomous SOC cost comparison
//! plus the value-category breakdown rendered as a donut chart. Everything
//! here is a pure function of the input record and the engine configuration.

pub mod derive;
pub mod metrics;
pub mod report;
pub mod value;

pub use derive::{Deriver, Trigger};

use serde::{Deserialize, Serialize};
use socroi_core::{
    BaseInputs, EngineConfig, FieldName, FieldValue, InputRecord, ResultRecord, Result,
    ValueBreakdown,
};

/// Results and breakdown computed from one fully derived record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub results: ResultRecord,
    pub breakdown: ValueBreakdown,
}

/// The calculation engine.
#[derive(Debug, Clone)]
pub struct RoiEngine {
    config: EngineConfig,
    deriver: Deriver,
}

impl RoiEngine {
    /// Create an engine, validating the configuration and fixing the
    /// incident-per-employee ratio.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let deriver = Deriver::from_config(&config);
        tracing::debug!(
            incidents_per_employee = deriver.incidents_per_employee(),
            "Engine initialized"
        );
        Ok(Self { config, deriver })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The fully derived record for the default inputs.
    pub fn default_record(&self) -> InputRecord {
        self.calculate_computed_fields(&BaseInputs::default())
    }

    /// Apply a single-field edit and recompute every dependent field.
    pub fn derive_fields(
        &self,
        current: &InputRecord,
        field: FieldName,
        value: FieldValue,
    ) -> Result<InputRecord> {
        self.deriver.derive(current, field, value)
    }

    /// Regenerate the derived fields of a restored base input set.
    pub fn calculate_computed_fields(&self, base: &BaseInputs) -> InputRecord {
        self.deriver.calculate_computed_fields(base)
    }

    pub fn compute_results(&self, record: &InputRecord) -> ResultRecord {
        metrics::compute_results(record, &self.config)
    }

    pub fn compute_value_breakdown(
        &self,
        record: &InputRecord,
        results: &ResultRecord,
    ) -> ValueBreakdown {
        value::compute_value_breakdown(record, results, &self.config.salaries, &self.config.value)
    }

    /// Compute results, then the breakdown, from the same record.
    pub fn evaluate(&self, record: &InputRecord) -> Evaluation {
        let results = self.compute_results(record);
        let breakdown = self.compute_value_breakdown(record, &results);
        Evaluation { results, breakdown }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socroi_core::RoiError;

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.baseline.incidents_per_month = 0.0;
        assert!(matches!(
            RoiEngine::new(config),
            Err(RoiError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_evaluate_matches_individual_calls() {
        let engine = RoiEngine::new(EngineConfig::default()).unwrap();
        let record = engine.default_record();

        let evaluation = engine.evaluate(&record);
        let results = engine.compute_results(&record);
        assert_eq!(evaluation.results, results);
        assert_eq!(
            evaluation.breakdown,
            engine.compute_value_breakdown(&record, &results)
        );
    }

    #[test]
    fn test_custom_baseline_changes_ratio() {
        let mut config = EngineConfig::default();
        config.baseline.employees = 100.0;
        config.baseline.incidents_per_month = 250.0;
        let engine = RoiEngine::new(config).unwrap();

        let record = engine.default_record();
        assert_eq!(record.security_incidents_per_month, 1250.0);
        assert_eq!(record.human_soc_analysts, 2.0);
    }
}
