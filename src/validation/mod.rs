//! Record validator for the unified dataset
//!
//! Three checks run in a fixed order and the first failure aborts:
//! 1. `record_type` only holds observation / event / target
//! 2. No event carries a pillar
//! 3. No observation is missing `value_numeric`
//!
//! There is no soft mode. Violations are not aggregated.
//! Downstream steps (link inference, views) only ever see validated data.

mod errors;
mod validator;

pub use errors::{Severity, ValidationError, ValidationErrorCode, ValidationResult};
pub use validator::RecordValidator;
