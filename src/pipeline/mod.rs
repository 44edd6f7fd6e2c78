//! Pipeline stages wired to a `PipelineConfig`
//!
//! Data flow: unified file -> validation -> link resolution -> views.
//! Enrichment appends to the unified file and the explicit link file
//! independently of that flow.

mod config;
mod errors;
mod stages;

pub use config::PipelineConfig;
pub use errors::{PipelineError, PipelineResult};
pub use stages::{
    add_event, add_impact_link, add_observation, load_dataset, load_forecast_table,
    load_impact_links, load_reference_table, load_validated_dataset, render, save_dataset,
};
