//! Individual pipeline stages

use std::collections::BTreeMap;

use crate::dataset::{load_reference_codes, load_unified_file, save_table, Dataset, Table};
use crate::enrichment::{EnrichmentResult, Enricher, IdGenerator, InMemoryRepository};
use crate::linkage::{load_explicit_links, resolve_link_table, LinkTable};
use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope};
use crate::presentation::{load_forecasts, render_view, ForecastTable, ViewModel, ViewRequest};
use crate::records::Record;
use crate::validation::RecordValidator;

use super::config::PipelineConfig;
use super::errors::PipelineResult;

/// Loads the unified file without validating it
pub fn load_dataset(config: &PipelineConfig) -> PipelineResult<Dataset> {
    let path = config.unified_path();
    let dataset = load_unified_file(&path)?;

    let (path_str, rows) = (path.display().to_string(), dataset.len().to_string());
    log_event_with_fields(
        Event::DatasetLoaded,
        &[("path", path_str.as_str()), ("rows", rows.as_str())],
    );
    Ok(dataset)
}

/// Loads and validates the unified file. Any violation is fatal.
pub fn load_validated_dataset(config: &PipelineConfig) -> PipelineResult<Dataset> {
    let dataset = load_dataset(config)?;

    let scope = ObservationScope::new("VALIDATION");
    match RecordValidator::new().validate_all(dataset.records()) {
        Ok(()) => {
            scope.complete();
            let rows = dataset.len().to_string();
            log_event_with_fields(Event::ValidationPassed, &[("rows", rows.as_str())]);
            Ok(dataset)
        }
        Err(err) => {
            scope.fail(err.code().code());
            log_event_with_fields(
                Event::ValidationFailed,
                &[("code", err.code().code())],
            );
            Err(err.into())
        }
    }
}

/// The explicit link table if present, otherwise inferred links
pub fn load_impact_links(config: &PipelineConfig) -> PipelineResult<LinkTable> {
    Ok(resolve_link_table(
        &config.impact_links_path(),
        &config.unified_path(),
        config.inference,
    )?)
}

pub fn load_reference_table(config: &PipelineConfig) -> PipelineResult<Table> {
    Ok(load_reference_codes(&config.reference_codes_path())?)
}

/// Loads forecasts for display. A missing or malformed file is logged and
/// yields `None`; views then show a notice.
pub fn load_forecast_table(config: &PipelineConfig) -> Option<ForecastTable> {
    let path = config.forecast_path();
    let path_str = path.display().to_string();
    match load_forecasts(&path) {
        Ok(table) => {
            let rows = table.len().to_string();
            log_event_with_fields(
                Event::ForecastsLoaded,
                &[("path", path_str.as_str()), ("rows", rows.as_str())],
            );
            Some(table)
        }
        Err(err) => {
            let reason = err.to_string();
            Logger::warn(
                Event::ForecastsLoaded.as_str(),
                &[("path", path_str.as_str()), ("reason", reason.as_str())],
            );
            None
        }
    }
}

/// Renders one view over the validated dataset
pub fn render(config: &PipelineConfig, request: &ViewRequest) -> PipelineResult<ViewModel> {
    let dataset = load_validated_dataset(config)?;
    let forecasts = load_forecast_table(config);
    Ok(render_view(request, &dataset, forecasts.as_ref(), &config.dashboard))
}

/// Writes the dataset back to the unified file
pub fn save_dataset(config: &PipelineConfig, dataset: &Dataset) -> PipelineResult<()> {
    let path = config.unified_path();
    save_table(&path, &dataset.to_table())?;

    let (path_str, rows) = (path.display().to_string(), dataset.len().to_string());
    log_event_with_fields(
        Event::DatasetSaved,
        &[("path", path_str.as_str()), ("rows", rows.as_str())],
    );
    Ok(())
}

/// Appends an observation to the unified file, returning its new id
pub fn add_observation<G: IdGenerator>(
    config: &PipelineConfig,
    enricher: &Enricher<G>,
    record: Record,
) -> PipelineResult<String> {
    append_record(config, |repo| enricher.add_observation(repo, record))
}

/// Appends an event to the unified file, returning its new id
pub fn add_event<G: IdGenerator>(
    config: &PipelineConfig,
    enricher: &Enricher<G>,
    record: Record,
) -> PipelineResult<String> {
    append_record(config, |repo| enricher.add_event(repo, record))
}

/// Appends a row to the explicit link file, creating it when absent
pub fn add_impact_link<G: IdGenerator>(
    config: &PipelineConfig,
    enricher: &Enricher<G>,
    values: BTreeMap<String, String>,
) -> PipelineResult<String> {
    let path = config.impact_links_path();
    let mut links = load_explicit_links(&path)?.unwrap_or_else(|| Table::new(["id", "parent_id"]));

    let id = enricher.add_impact_link(&mut links, values)?;
    save_table(&path, &links)?;
    Ok(id)
}

fn append_record<F>(config: &PipelineConfig, add: F) -> PipelineResult<String>
where
    F: FnOnce(&mut InMemoryRepository) -> EnrichmentResult<String>,
{
    let mut repo = InMemoryRepository::from_dataset(load_dataset(config)?);
    let id = add(&mut repo)?;
    save_dataset(config, repo.dataset())?;
    Ok(id)
}
