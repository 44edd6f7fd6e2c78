//! Observable pipeline events
//!
//! Every log line names one of these. Events are explicit and typed.

use std::fmt;

/// Observable events in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Data
    /// Unified dataset loaded and coerced
    DatasetLoaded,
    /// Dataset written back to disk
    DatasetSaved,
    /// Forecast table loaded
    ForecastsLoaded,

    // Validation
    /// All record checks passed
    ValidationPassed,
    /// A record check failed (pipeline halts)
    ValidationFailed,

    // Links
    /// Explicit link file found; inference skipped
    LinksExplicit,
    /// Heuristic pass finished
    LinkInferenceComplete,
    /// Event date unparseable; event matched against every observation
    EventDateUnknown,

    // Enrichment
    /// Record appended to the repository
    RecordAppended,
    /// Record refused by the repository
    RecordRejected,

    // Presentation
    /// View rendered with data
    ViewRendered,
    /// View rendered with an empty-state notice
    ViewEmpty,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DatasetLoaded => "DATASET_LOADED",
            Event::DatasetSaved => "DATASET_SAVED",
            Event::ForecastsLoaded => "FORECASTS_LOADED",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::LinksExplicit => "LINKS_EXPLICIT",
            Event::LinkInferenceComplete => "LINK_INFERENCE_COMPLETE",
            Event::EventDateUnknown => "EVENT_DATE_UNKNOWN",
            Event::RecordAppended => "RECORD_APPENDED",
            Event::RecordRejected => "RECORD_REJECTED",
            Event::ViewRendered => "VIEW_RENDERED",
            Event::ViewEmpty => "VIEW_EMPTY",
        }
    }

    /// Returns true if this event halts the current operation
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::ValidationFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
