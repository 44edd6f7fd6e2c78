//! Observability for the pipeline
//!
//! - Typed lifecycle events (`Event`)
//! - Structured, deterministic log lines (`Logger`) emitted via `tracing`
//! - Stage scopes with begin/complete/failed lines (`ObservationScope`)
//!
//! Observability is read-only: it never changes what a stage computes.
//! Logs go to stderr; stdout is reserved for command output.
//!
//! ```ignore
//! use fi_pipeline::observability::{Event, Logger, ObservationScope};
//!
//! Logger::info(Event::DatasetLoaded.as_str(), &[("rows", "42")]);
//!
//! let scope = ObservationScope::new("LINK_INFERENCE");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "fi_pipeline=info";

/// Installs the global `tracing` subscriber (stderr, `RUST_LOG` filter).
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
