//! Dataset I/O errors
//!
//! All of these are fatal for the operation that raised them.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset loading and writing errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {file}: {reason}")]
    ReadFailed { file: String, reason: String },

    #[error("Failed to write {file}: {reason}")]
    WriteFailed { file: String, reason: String },

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

impl DatasetError {
    pub(crate) fn read_failed(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::ReadFailed {
            file: file_label(path),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failed(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::WriteFailed {
            file: file_label(path),
            reason: reason.to_string(),
        }
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_lists_all() {
        let err = DatasetError::MissingColumns(vec!["pillar".into(), "record_id".into()]);
        assert_eq!(err.to_string(), "Missing required columns: pillar, record_id");
    }

    #[test]
    fn test_read_failed_names_file_only() {
        let err = DatasetError::read_failed(std::path::Path::new("/tmp/x/data.csv"), "bad row");
        assert_eq!(err.to_string(), "Failed to read data.csv: bad row");
    }
}
