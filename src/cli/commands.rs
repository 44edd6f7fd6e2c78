//! CLI command implementations
//!
//! Each command returns its JSON payload; `run` writes it as the single
//! stdout response.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::{json, Value};

use crate::enrichment::{Enricher, RandomIdGenerator};
use crate::observability::init_tracing;
use crate::pipeline::{self, PipelineConfig};
use crate::presentation::{growth_rates, summarize_dataset, temporal_coverage, ViewRequest};
use crate::records::{parse_date, Record};

use super::args::{Cli, Command, LinkArgs, RecordArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Parse arguments, run the command and write the response
pub fn run() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse_args();

    match run_command(cli) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

/// Run the appropriate command based on CLI args
pub fn run_command(cli: Cli) -> CliResult<Value> {
    let config = resolve_config(cli.config, cli.data_dir)?;

    match cli.command {
        Command::Validate => validate(&config),
        Command::Links { explain } => links(&config, explain),
        Command::Summary => summary(&config),
        Command::View {
            name,
            indicator,
            scenario,
        } => {
            let request = ViewRequest {
                view: name,
                indicator,
                scenario,
            };
            view(&config, &request)
        }
        Command::AddEvent(args) => add_event(&config, args),
        Command::AddObservation(args) => add_observation(&config, args),
        Command::AddLink(args) => add_link(&config, args),
    }
}

/// Config file if given, defaults otherwise; `--data-dir` wins over both
fn resolve_config(path: Option<PathBuf>, data_dir: Option<PathBuf>) -> CliResult<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::load(&path)?,
        None => PipelineConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

/// Validate the unified dataset
pub fn validate(config: &PipelineConfig) -> CliResult<Value> {
    let dataset = pipeline::load_validated_dataset(config)?;
    Ok(json!({
        "valid": true,
        "records": dataset.len(),
    }))
}

/// Explicit or inferred impact links
pub fn links(config: &PipelineConfig, explain: bool) -> CliResult<Value> {
    let table = pipeline::load_impact_links(config)?;
    Ok(table.to_json(explain))
}

/// Dataset summary for the validated dataset
pub fn summary(config: &PipelineConfig) -> CliResult<Value> {
    let dataset = pipeline::load_validated_dataset(config)?;
    let records = dataset.records();
    let dashboard = &config.dashboard;

    let growth: BTreeMap<&str, _> = [&dashboard.access_code, &dashboard.usage_code]
        .into_iter()
        .map(|code| (code.as_str(), growth_rates(records, code)))
        .collect();

    Ok(json!({
        "summary": summarize_dataset(records),
        "temporal_coverage": temporal_coverage(records),
        "growth": growth,
    }))
}

/// Render one view
pub fn view(config: &PipelineConfig, request: &ViewRequest) -> CliResult<Value> {
    let model = pipeline::render(config, request)?;
    Ok(serde_json::to_value(model)?)
}

/// Append an event
pub fn add_event(config: &PipelineConfig, args: RecordArgs) -> CliResult<Value> {
    let record = record_from_args(args)?;
    let id = pipeline::add_event(config, &Enricher::new(RandomIdGenerator), record)?;
    Ok(json!({ "record_id": id }))
}

/// Append an observation
pub fn add_observation(config: &PipelineConfig, args: RecordArgs) -> CliResult<Value> {
    let record = record_from_args(args)?;
    let id = pipeline::add_observation(config, &Enricher::new(RandomIdGenerator), record)?;
    Ok(json!({ "record_id": id }))
}

/// Append an impact link
pub fn add_link(config: &PipelineConfig, args: LinkArgs) -> CliResult<Value> {
    let values = link_values(args)?;
    let id = pipeline::add_impact_link(config, &Enricher::new(RandomIdGenerator), values)?;
    Ok(json!({ "id": id }))
}

fn record_from_args(args: RecordArgs) -> CliResult<Record> {
    let observation_date = match args.date.as_deref() {
        Some(raw) => Some(
            parse_date(raw)
                .ok_or_else(|| CliError::invalid_argument(format!("Unparseable date: '{}'", raw)))?,
        ),
        None => None,
    };

    Ok(Record {
        pillar: args.pillar,
        indicator: args.indicator,
        indicator_code: args.indicator_code,
        value_numeric: args.value,
        observation_date,
        source_name: args.source_name,
        source_url: args.source_url,
        source_type: args.source_type,
        confidence: args.confidence,
        notes: args.notes,
        ..Default::default()
    })
}

fn link_values(args: LinkArgs) -> CliResult<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();
    for raw in &args.extra {
        let (key, value) = raw
            .split_once('=')
            .filter(|(k, _)| !k.trim().is_empty())
            .ok_or_else(|| CliError::invalid_argument(format!("Expected KEY=VALUE, got '{}'", raw)))?;
        values.insert(key.trim().to_string(), value.to_string());
    }

    let named = [
        ("parent_id", Some(args.parent_id)),
        ("child_id", args.child_id),
        ("relationship_type", args.relationship_type),
        ("impact_direction", args.impact_direction),
        ("impact_magnitude", args.impact_magnitude),
        ("evidence_basis", args.evidence_basis),
        ("lag_months", args.lag_months),
    ];
    for (key, value) in named {
        if let Some(value) = value {
            values.insert(key.to_string(), value);
        }
    }
    Ok(values)
}
