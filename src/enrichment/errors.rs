//! Enrichment errors

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type for enrichment operations
pub type EnrichmentResult<T> = Result<T, EnrichmentError>;

/// Reasons a new row is refused
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("record rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error("record {0} has no record_type")]
    MissingRecordType(String),

    #[error("record {record_id} has unknown record_type '{record_type}'")]
    UnknownRecordType {
        record_id: String,
        record_type: String,
    },

    #[error("impact link requires a non-empty parent_id")]
    MissingParentId,
}
