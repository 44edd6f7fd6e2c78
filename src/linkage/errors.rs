//! Link inference errors

use thiserror::Error;

use crate::dataset::DatasetError;
use crate::validation::ValidationError;

/// Result type for link operations
pub type LinkResult<T> = Result<T, LinkError>;

/// Fatal link-table errors. Bad dates and empty results are not errors.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("unified data missing required column: {0}")]
    MissingColumn(String),

    #[error("impact_links must contain parent_id")]
    ExplicitMissingParentId,

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
