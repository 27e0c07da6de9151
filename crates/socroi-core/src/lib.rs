//! socroi-core: Shared types, configuration, and error handling for the SOC ROI estimator.
//!
//! This crate provides the foundational types used across all socroi components:
//! - The input record and its persisted base subset
//! - Field names and values for single-field edits
//! - Result and value-breakdown records emitted by the engine
//! - Engine configuration (salaries, staffing ratios, caps, value assumptions)
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::EngineConfig;
pub use error::{Result, RoiError};
pub use types::{
    BaseInputs, FieldName, FieldValue, InputRecord, ResultRecord, ValueBreakdown, ValueCategory,
    ValueEntry,
};
