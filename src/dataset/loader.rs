//! CSV loading and writing
//!
//! Missing files and malformed CSV are fatal. Required-column checks are
//! applied to the unified record file only; other tables are returned as
//! read.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::records::REQUIRED_COLUMNS;

use super::errors::{DatasetError, DatasetResult};
use super::table::Table;
use super::unified::Dataset;

/// Reads any CSV file into a verbatim table.
///
/// # Errors
///
/// - `FileNotFound` if `path` does not exist
/// - `ReadFailed` if the file cannot be opened or a row is malformed
pub fn load_csv_safe(path: &Path) -> DatasetResult<Table> {
    if !path.exists() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| DatasetError::read_failed(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| DatasetError::read_failed(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // Short rows are padded as missing cells; extra cells have no column
    // to land in and make the file malformed.
    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result.map_err(|e| {
            DatasetError::read_failed(path, format!("row {}: {}", idx + 1, e))
        })?;
        if row.len() > headers.len() {
            return Err(DatasetError::read_failed(
                path,
                format!(
                    "row {}: expected {} fields, found {}",
                    idx + 1,
                    headers.len(),
                    row.len()
                ),
            ));
        }
        rows.push(row.iter().map(str::to_string).collect());
    }

    Ok(Table::from_parts(headers, rows))
}

/// Loads the unified record file and coerces it into typed records.
///
/// # Errors
///
/// Everything `load_csv_safe` returns, plus `MissingColumns` naming every
/// absent required column.
pub fn load_unified_file(path: &Path) -> DatasetResult<Dataset> {
    let table = load_csv_safe(path)?;

    let present: BTreeSet<&str> = table.headers().iter().map(String::as_str).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    Ok(Dataset::from_table(&table))
}

/// Loads the reference-codes file as-is
pub fn load_reference_codes(path: &Path) -> DatasetResult<Table> {
    load_csv_safe(path)
}

/// Writes a table to `path`, creating parent directories as needed
pub fn save_table(path: &Path, table: &Table) -> DatasetResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| DatasetError::write_failed(path, e))?;
        }
    }

    let mut writer = csv::Writer::from_path(path).map_err(|e| DatasetError::write_failed(path, e))?;
    writer
        .write_record(table.headers())
        .map_err(|e| DatasetError::write_failed(path, e))?;
    for row in table.rows() {
        writer
            .write_record(row)
            .map_err(|e| DatasetError::write_failed(path, e))?;
    }
    writer.flush().map_err(|e| DatasetError::write_failed(path, e))?;

    Ok(())
}
