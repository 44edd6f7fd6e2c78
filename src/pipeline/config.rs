//! Pipeline configuration
//!
//! Loaded from a JSON file. Every field has a default, so `{}` is a valid
//! configuration. Paths other than `data_dir` are relative to `data_dir`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::linkage::InferenceConfig;
use crate::observability::{log_event_with_fields, Event};
use crate::presentation::DashboardConfig;

use super::errors::{PipelineError, PipelineResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root of the data tree (default: "data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_unified_file")]
    pub unified_file: PathBuf,

    #[serde(default = "default_reference_codes_file")]
    pub reference_codes_file: PathBuf,

    /// Explicit links; inference runs only when this file is absent
    #[serde(default = "default_impact_links_file")]
    pub impact_links_file: PathBuf,

    #[serde(default = "default_forecast_file")]
    pub forecast_file: PathBuf,

    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_unified_file() -> PathBuf {
    PathBuf::from("raw/ethiopia_fi_unified_data.csv")
}

fn default_reference_codes_file() -> PathBuf {
    PathBuf::from("raw/reference_codes.csv")
}

fn default_impact_links_file() -> PathBuf {
    PathBuf::from("raw/impact_links.csv")
}

fn default_forecast_file() -> PathBuf {
    PathBuf::from("processed/forecasts.csv")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            unified_file: default_unified_file(),
            reference_codes_file: default_reference_codes_file(),
            impact_links_file: default_impact_links_file(),
            forecast_file: default_forecast_file(),
            inference: InferenceConfig::default(),
            dashboard: DashboardConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PipelineError::config(format!("Failed to read config: {}", e)))?;

        let config: PipelineConfig = serde_json::from_str(&content)
            .map_err(|e| PipelineError::config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        let path_str = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_str.as_str())]);
        Ok(config)
    }

    /// Default configuration rooted at `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> PipelineResult<()> {
        if self.inference.max_links_per_event == 0 {
            return Err(PipelineError::config("inference.max_links_per_event must be > 0"));
        }
        if self.inference.window_days < 0 {
            return Err(PipelineError::config("inference.window_days must be >= 0"));
        }
        if !self.dashboard.projection_target.is_finite() {
            return Err(PipelineError::config("dashboard.projection_target must be finite"));
        }
        Ok(())
    }

    pub fn unified_path(&self) -> PathBuf {
        self.data_dir.join(&self.unified_file)
    }

    pub fn reference_codes_path(&self) -> PathBuf {
        self.data_dir.join(&self.reference_codes_file)
    }

    pub fn impact_links_path(&self) -> PathBuf {
        self.data_dir.join(&self.impact_links_file)
    }

    pub fn forecast_path(&self) -> PathBuf {
        self.data_dir.join(&self.forecast_file)
    }
}
