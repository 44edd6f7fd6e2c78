//! Validation error types
//!
//! Error codes:
//! - FI_INVALID_RECORD_TYPE
//! - FI_EVENT_HAS_PILLAR
//! - FI_OBSERVATION_MISSING_VALUE

use std::fmt;

/// How far a validation failure reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A single incoming row is refused; the store is untouched
    Reject,
    /// The whole pipeline run aborts
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Validation error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// `record_type` outside the allowed categories
    InvalidRecordType,
    /// Event row with a non-missing pillar
    EventHasPillar,
    /// Observation row without a numeric value
    ObservationMissingValue,
}

impl ValidationErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRecordType => "FI_INVALID_RECORD_TYPE",
            Self::EventHasPillar => "FI_EVENT_HAS_PILLAR",
            Self::ObservationMissingValue => "FI_OBSERVATION_MISSING_VALUE",
        }
    }

    /// Returns the invariant this code guards
    pub fn invariant(&self) -> &'static str {
        match self {
            Self::InvalidRecordType => "record_type in {observation, event, target}",
            Self::EventHasPillar => "events carry no pillar",
            Self::ObservationMissingValue => "observations carry value_numeric",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation failure with the offending values or record ids
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    code: ValidationErrorCode,
    severity: Severity,
    message: String,
    offending: Vec<String>,
}

impl ValidationError {
    /// Invalid category error naming every offending value
    pub fn invalid_record_types(values: Vec<String>) -> Self {
        Self {
            code: ValidationErrorCode::InvalidRecordType,
            severity: Severity::Fatal,
            message: format!("Invalid record_type values: {{{}}}", values.join(", ")),
            offending: values,
        }
    }

    /// Events must not have pillar values
    pub fn event_has_pillar(record_ids: Vec<String>) -> Self {
        Self {
            code: ValidationErrorCode::EventHasPillar,
            severity: Severity::Fatal,
            message: format!(
                "Events must not have pillar values (records: {})",
                record_ids.join(", ")
            ),
            offending: record_ids,
        }
    }

    /// Observations must have numeric values
    pub fn observation_missing_value(record_ids: Vec<String>) -> Self {
        Self {
            code: ValidationErrorCode::ObservationMissingValue,
            severity: Severity::Fatal,
            message: format!(
                "Some observations have missing numeric values (records: {})",
                record_ids.join(", ")
            ),
            offending: record_ids,
        }
    }

    /// Downgrades to a single-row rejection
    pub fn rejected(mut self) -> Self {
        self.severity = Severity::Reject;
        self
    }

    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Offending category values, or ids of offending records
    pub fn offending(&self) -> &[String] {
        &self.offending
    }

    pub fn invariant(&self) -> &'static str {
        self.code.invariant()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code.code(), self.message)?;
        write!(f, " [violates {}]", self.code.invariant())
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
