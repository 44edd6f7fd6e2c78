//! Scenario forecast table

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetError, DatasetResult};

/// Columns a forecast file must provide
pub const FORECAST_COLUMNS: &[&str] = &["scenario", "indicator", "year", "forecast", "lower_ci", "upper_ci"];

/// One forecast point for a scenario and indicator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub scenario: String,
    pub indicator: String,
    pub year: i32,
    pub forecast: f64,
    #[serde(default)]
    pub lower_ci: Option<f64>,
    #[serde(default)]
    pub upper_ci: Option<f64>,
}

/// Forecast rows keyed by scenario x indicator x year
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastTable {
    rows: Vec<ForecastRow>,
}

impl ForecastTable {
    pub fn from_rows(rows: Vec<ForecastRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for one scenario and indicator, sorted by year (ties in file order)
    pub fn select(&self, scenario: &str, indicator: &str) -> Vec<&ForecastRow> {
        let mut rows: Vec<&ForecastRow> = self
            .rows
            .iter()
            .filter(|r| r.scenario == scenario && r.indicator == indicator)
            .collect();
        rows.sort_by_key(|r| r.year);
        rows
    }

    /// Distinct scenario names in first-seen order
    pub fn scenarios(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.scenario.as_str()) {
                seen.push(&row.scenario);
            }
        }
        seen
    }
}

/// Reads a forecast CSV.
///
/// # Errors
///
/// - `FileNotFound` if `path` does not exist
/// - `MissingColumns` if a forecast column is absent
/// - `ReadFailed` if a row cannot be deserialised
pub fn load_forecasts(path: &Path) -> DatasetResult<ForecastTable> {
    if !path.exists() {
        return Err(DatasetError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DatasetError::read_failed(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::read_failed(path, e))?
        .clone();
    let missing: Vec<String> = FORECAST_COLUMNS
        .iter()
        .filter(|c| !headers.iter().any(|h| h == **c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.deserialize::<ForecastRow>().enumerate() {
        let row = result.map_err(|e| {
            DatasetError::read_failed(path, format!("row {}: {}", idx + 1, e))
        })?;
        rows.push(row);
    }

    Ok(ForecastTable::from_rows(rows))
}
