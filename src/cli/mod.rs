//! CLI module
//!
//! Provides the command-line interface for:
//! - validate: check the unified dataset
//! - links: explicit or inferred impact links
//! - summary / view: read-only dashboard data
//! - add-event / add-observation / add-link: append-only enrichment

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, LinkArgs, RecordArgs};
pub use commands::{
    add_event, add_link, add_observation, links, run, run_command, summary, validate, view,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
