//! Impact-link inference
//!
//! Derives candidate causal links from events to later observations when no
//! explicit link file is supplied. An explicit file, when present and well
//! formed, is authoritative and bypasses inference entirely.
//!
//! # Algorithm
//!
//! 1. Split records into events and observations
//! 2. Candidates per event: observations dated on/after the event, or every
//!    observation when the event date is unknown
//! 3. Score each pair with an ordered list of additive rules
//! 4. Drop pairs scoring 0
//! 5. Keep the top `max_links_per_event` per event (stable, score descending)
//!
//! An event with an unknown date matches the whole observation set. This is
//! a permissive default; excluding such events instead is an open question.
//!
//! # Invariants
//!
//! - Every emitted link has `score > 0`
//! - At most `max_links_per_event` links per event, non-increasing scores
//! - `relationship_type` and `evidence_basis` always agree
//! - Same input yields the same links in the same order

mod errors;
mod inferer;
mod link;
mod rules;
mod source;

pub use errors::{LinkError, LinkResult};
pub use inferer::{ImpactLinkInferer, InferenceConfig};
pub use link::{
    EvidenceBasis, ImpactLink, InferenceStats, InferredLinks, LinkTable, RelationshipType,
    RuleHit, LINK_COLUMNS,
};
pub use rules::{
    default_rules, CandidatePair, EventIndicatorInObservationText, IndicatorMatch,
    ObservationIndicatorInEventText, RecordProfile, ScoringRule, SharedSource, TemporalProximity,
};
pub use source::{load_explicit_links, resolve_link_table};
