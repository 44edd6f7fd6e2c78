//! CLI argument definitions using clap
//!
//! Commands:
//! - fi-pipeline validate
//! - fi-pipeline links [--explain]
//! - fi-pipeline summary
//! - fi-pipeline view <overview|trends|forecasts|inclusion-projections>
//! - fi-pipeline add-event / add-observation / add-link

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::presentation::View;

/// Financial-inclusion data pipeline: validation, impact links and views
#[derive(Parser, Debug)]
#[command(name = "fi-pipeline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the unified dataset
    Validate,

    /// Print the impact-link table (explicit or inferred)
    Links {
        /// Include per-link rule scores and inference counters
        #[arg(long)]
        explain: bool,
    },

    /// Category counts, temporal coverage and growth for the dashboard codes
    Summary,

    /// Render one dashboard view as JSON
    View {
        #[arg(value_enum)]
        name: View,

        /// Indicator code (trends) or forecast indicator (forecasts)
        #[arg(long)]
        indicator: Option<String>,

        /// Forecast scenario (forecasts)
        #[arg(long)]
        scenario: Option<String>,
    },

    /// Append an event to the unified dataset
    AddEvent(RecordArgs),

    /// Append an observation to the unified dataset
    AddObservation(RecordArgs),

    /// Append a row to the explicit impact-link file
    AddLink(LinkArgs),
}

/// Fields of a new unified record
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    #[arg(long)]
    pub indicator: Option<String>,

    #[arg(long)]
    pub indicator_code: Option<String>,

    /// Ignored for events
    #[arg(long)]
    pub pillar: Option<String>,

    #[arg(long)]
    pub value: Option<f64>,

    /// Observation or event date (YYYY-MM-DD, YYYY-MM or YYYY)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub source_name: Option<String>,

    #[arg(long)]
    pub source_url: Option<String>,

    #[arg(long)]
    pub source_type: Option<String>,

    #[arg(long)]
    pub confidence: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

/// Fields of a new impact link
#[derive(Args, Debug, Clone, Default)]
pub struct LinkArgs {
    #[arg(long)]
    pub parent_id: String,

    #[arg(long)]
    pub child_id: Option<String>,

    #[arg(long)]
    pub relationship_type: Option<String>,

    #[arg(long)]
    pub impact_direction: Option<String>,

    #[arg(long)]
    pub impact_magnitude: Option<String>,

    #[arg(long)]
    pub evidence_basis: Option<String>,

    #[arg(long)]
    pub lag_months: Option<String>,

    /// Additional column as KEY=VALUE (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub extra: Vec<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_with_globals() {
        let cli = Cli::try_parse_from([
            "fi-pipeline",
            "view",
            "inclusion-projections",
            "--data-dir",
            "/tmp/fi",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/fi")));
        assert!(matches!(
            cli.command,
            Command::View { name: View::InclusionProjections, .. }
        ));
    }

    #[test]
    fn test_parse_links_explain() {
        let cli = Cli::try_parse_from(["fi-pipeline", "--config", "fi.json", "links", "--explain"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("fi.json")));
        assert!(matches!(cli.command, Command::Links { explain: true }));
    }

    #[test]
    fn test_parse_add_link() {
        let cli = Cli::try_parse_from([
            "fi-pipeline",
            "add-link",
            "--parent-id",
            "EVT_1",
            "--set",
            "comment=manual",
        ])
        .unwrap();
        match cli.command {
            Command::AddLink(args) => {
                assert_eq!(args.parent_id, "EVT_1");
                assert_eq!(args.extra, vec!["comment=manual".to_string()]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_view_rejected() {
        assert!(Cli::try_parse_from(["fi-pipeline", "view", "heatmap"]).is_err());
    }
}
