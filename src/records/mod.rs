//! Record model for the unified financial-inclusion dataset
//!
//! One flat table holds three kinds of rows:
//! - observation: a measured indicator value at a date
//! - event: a discrete policy/market event (never carries a pillar)
//! - target: an official goal for an indicator
//!
//! Dates are coerced on load. Unparseable dates become unknown, they are
//! never rejected.

mod date;
mod types;

pub use date::{days_between, parse_date};
pub use types::{Record, RecordType, REQUIRED_COLUMNS};
