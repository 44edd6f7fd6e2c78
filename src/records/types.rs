//! Record and record-type definitions

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Columns every unified dataset file must provide.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "record_id",
    "record_type",
    "pillar",
    "indicator",
    "indicator_code",
    "value_numeric",
    "observation_date",
    "source_name",
    "source_url",
    "confidence",
];

/// Allowed record categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    /// A measured indicator value
    Observation,
    /// A discrete event that may influence later observations
    Event,
    /// An official target for an indicator
    Target,
}

impl RecordType {
    pub const ALL: [RecordType; 3] = [RecordType::Observation, RecordType::Event, RecordType::Target];

    /// Returns the canonical string stored in the dataset
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Observation => "observation",
            RecordType::Event => "event",
            RecordType::Target => "target",
        }
    }

    /// Parses the canonical (exact, lowercase) category string
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single row of the unified dataset.
///
/// `record_type` keeps the raw string so that unknown categories survive
/// loading and can be reported by the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub record_id: String,
    pub record_type: Option<String>,
    pub pillar: Option<String>,
    pub indicator: Option<String>,
    pub indicator_code: Option<String>,
    pub value_numeric: Option<f64>,
    pub observation_date: Option<NaiveDate>,
    pub source_name: Option<String>,
    pub source_url: Option<String>,
    pub source_type: Option<String>,
    pub confidence: Option<String>,
    pub notes: Option<String>,
    pub original_text: Option<String>,
    /// Columns with no named field, kept so rewrites lose nothing
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Record {
    /// Creates a record with only an id and category set
    pub fn new(record_id: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            record_id: record_id.into(),
            record_type: Some(record_type.as_str().to_string()),
            ..Default::default()
        }
    }

    /// Parsed category, `None` when missing or not one of the allowed values
    pub fn kind(&self) -> Option<RecordType> {
        self.record_type.as_deref().and_then(RecordType::parse)
    }

    pub fn is_event(&self) -> bool {
        self.kind() == Some(RecordType::Event)
    }

    pub fn is_observation(&self) -> bool {
        self.kind() == Some(RecordType::Observation)
    }

    /// Provenance reference: `source_url`, falling back to `source_name`
    pub fn source_ref(&self) -> Option<&str> {
        non_blank(self.source_url.as_deref()).or_else(|| non_blank(self.source_name.as_deref()))
    }

    /// `notes` and `original_text` joined by a single space
    pub fn free_text(&self) -> String {
        format!(
            "{} {}",
            self.notes.as_deref().unwrap_or(""),
            self.original_text.as_deref().unwrap_or("")
        )
    }

    /// Sets the observation date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.observation_date = Some(date);
        self
    }

    /// Sets the indicator label
    pub fn with_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.indicator = Some(indicator.into());
        self
    }

    /// Sets the numeric value
    pub fn with_value(mut self, value: f64) -> Self {
        self.value_numeric = Some(value);
        self
    }

    /// Sets the source url
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Sets the notes text
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
