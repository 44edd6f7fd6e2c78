//! Flat-file dataset access
//!
//! Reads and writes the comma-separated files the pipeline works on:
//! - the unified record file (required columns enforced on load)
//! - the optional reference-codes file
//! - any verbatim table (explicit impact links, enrichment output)
//!
//! Cell values are coerced, not rejected: an unparseable `value_numeric`
//! becomes missing and an unparseable `observation_date` becomes unknown.

mod errors;
mod loader;
mod table;
mod unified;

pub use errors::{DatasetError, DatasetResult};
pub use loader::{load_csv_safe, load_reference_codes, load_unified_file, save_table};
pub use table::Table;
pub use unified::Dataset;
