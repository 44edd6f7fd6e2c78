//! Pipeline errors

use thiserror::Error;

use crate::dataset::DatasetError;
use crate::enrichment::EnrichmentError;
use crate::linkage::LinkError;
use crate::validation::ValidationError;

/// Result type for pipeline stages
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),
}

impl PipelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
