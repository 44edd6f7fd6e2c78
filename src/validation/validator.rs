//! Record validator
//!
//! Validation is deterministic and never mutates records. Offending values
//! are reported sorted and de-duplicated; offending record ids are reported
//! in dataset order.

use std::collections::BTreeSet;

use crate::records::{Record, RecordType};

use super::errors::{ValidationError, ValidationResult};

/// Stateless validator over a slice of records
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordValidator;

impl RecordValidator {
    pub fn new() -> Self {
        Self
    }

    /// Runs every check in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// - FI_INVALID_RECORD_TYPE
    /// - FI_EVENT_HAS_PILLAR
    /// - FI_OBSERVATION_MISSING_VALUE
    pub fn validate_all(&self, records: &[Record]) -> ValidationResult<()> {
        self.validate_record_types(records)?;
        self.validate_events_have_no_pillar(records)?;
        self.validate_observations_have_values(records)?;
        Ok(())
    }

    /// Checks one record against the same rules, in the same order
    pub fn validate_record(&self, record: &Record) -> ValidationResult<()> {
        self.validate_all(std::slice::from_ref(record))
    }

    /// Missing `record_type` is tolerated; only present, unknown values fail.
    pub fn validate_record_types(&self, records: &[Record]) -> ValidationResult<()> {
        let invalid: BTreeSet<&str> = records
            .iter()
            .filter_map(|r| r.record_type.as_deref())
            .filter(|t| RecordType::parse(t).is_none())
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::invalid_record_types(
                invalid.into_iter().map(str::to_string).collect(),
            ))
        }
    }

    pub fn validate_events_have_no_pillar(&self, records: &[Record]) -> ValidationResult<()> {
        let offending = ids_where(records, |r| r.is_event() && r.pillar.is_some());
        if offending.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::event_has_pillar(offending))
        }
    }

    pub fn validate_observations_have_values(&self, records: &[Record]) -> ValidationResult<()> {
        let offending = ids_where(records, |r| r.is_observation() && r.value_numeric.is_none());
        if offending.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::observation_missing_value(offending))
        }
    }
}

fn ids_where(records: &[Record], pred: impl Fn(&Record) -> bool) -> Vec<String> {
    records
        .iter()
        .filter(|r| pred(r))
        .map(|r| r.record_id.clone())
        .collect()
}
