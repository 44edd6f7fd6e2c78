//! Append-only enrichment of the record store
//!
//! New rows get a generated identifier (`obs_…`, `evt_…`, `imp_…`) and a
//! fixed category. The repository, not the caller, upholds the category
//! invariants at insertion: events lose any pillar, observations without a
//! value are refused.
//!
//! Identifiers come from an injectable `IdGenerator`. No uniqueness check is
//! made against existing ids.

mod enricher;
mod errors;
mod ids;
mod repository;

pub use enricher::Enricher;
pub use errors::{EnrichmentError, EnrichmentResult};
pub use ids::{IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use repository::{InMemoryRepository, RecordRepository};
