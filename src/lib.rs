//! fi-pipeline - validation, impact-link inference and dashboard views for a
//! financial-inclusion dataset
//!
//! Unified records are loaded from CSV and validated. Events are then linked
//! to later observations, either from an explicit link file or by heuristic
//! scoring. Views render the results as JSON.

pub mod cli;
pub mod dataset;
pub mod enrichment;
pub mod linkage;
pub mod observability;
pub mod pipeline;
pub mod presentation;
pub mod records;
pub mod validation;
