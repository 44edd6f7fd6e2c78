//! CLI-specific error types
//!
//! Every CLI error is fatal: it is reported once on stdout as JSON, once on
//! stderr, and the process exits 1.

use std::fmt;
use std::io;

use crate::dataset::DatasetError;
use crate::enrichment::EnrichmentError;
use crate::linkage::LinkError;
use crate::pipeline::PipelineError;
use crate::validation::{ValidationError, ValidationErrorCode};

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, JSON encoding)
    IoError,
    /// Bad command-line value
    InvalidArgument,
    /// Input file missing, unreadable or missing columns
    DataError,
    /// Dataset failed validation; carries the validation code
    Validation(ValidationErrorCode),
    /// Link table could not be produced
    LinkError,
    /// New row refused
    EnrichmentRejected,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FI_CLI_CONFIG_ERROR",
            Self::IoError => "FI_CLI_IO_ERROR",
            Self::InvalidArgument => "FI_CLI_INVALID_ARGUMENT",
            Self::DataError => "FI_DATA_ERROR",
            Self::Validation(code) => code.code(),
            Self::LinkError => "FI_LINK_ERROR",
            Self::EnrichmentRejected => "FI_ENRICHMENT_REJECTED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidArgument, msg)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<DatasetError> for CliError {
    fn from(e: DatasetError) -> Self {
        Self::new(CliErrorCode::DataError, e.to_string())
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::new(CliErrorCode::Validation(e.code()), e.to_string())
    }
}

impl From<LinkError> for CliError {
    fn from(e: LinkError) -> Self {
        match e {
            LinkError::Dataset(e) => e.into(),
            LinkError::Validation(e) => e.into(),
            other => Self::new(CliErrorCode::LinkError, other.to_string()),
        }
    }
}

impl From<EnrichmentError> for CliError {
    fn from(e: EnrichmentError) -> Self {
        match e {
            EnrichmentError::Rejected(e) => e.into(),
            other => Self::new(CliErrorCode::EnrichmentRejected, other.to_string()),
        }
    }
}

impl From<PipelineError> for CliError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Config(msg) => Self::config_error(msg),
            PipelineError::Dataset(e) => e.into(),
            PipelineError::Validation(e) => e.into(),
            PipelineError::Link(e) => e.into(),
            PipelineError::Enrichment(e) => e.into(),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
