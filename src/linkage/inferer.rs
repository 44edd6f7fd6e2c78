//! Heuristic impact-link inferer

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::observability::{Event, Logger};
use crate::records::RecordType;

use super::errors::{LinkError, LinkResult};
use super::link::{ImpactLink, InferenceStats, InferredLinks, RuleHit};
use super::rules::{default_rules, CandidatePair, RecordProfile, ScoringRule};

/// Columns the inferer cannot run without
const INFERENCE_COLUMNS: &[&str] = &["record_id", "record_type", "observation_date"];

/// Tunables for one inference pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Links kept per event (top-K by score)
    #[serde(default = "default_max_links")]
    pub max_links_per_event: usize,
    /// Temporal bonus window after the event, in days
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_max_links() -> usize {
    5
}

fn default_window_days() -> i64 {
    730
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_links_per_event: default_max_links(),
            window_days: default_window_days(),
        }
    }
}

/// A pair that survived scoring
struct Scored<'p, 'a> {
    observation: &'p RecordProfile<'a>,
    score: u32,
    hits: Vec<RuleHit>,
    same_source: bool,
    days_elapsed: Option<i64>,
}

/// Scores events against later observations and keeps the best links.
///
/// Deterministic: ties keep dataset order.
pub struct ImpactLinkInferer {
    config: InferenceConfig,
    rules: Vec<Box<dyn ScoringRule>>,
}

impl ImpactLinkInferer {
    /// Creates an inferer with the standard rule list
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            rules: default_rules(config.window_days),
            config,
        }
    }

    /// Creates an inferer with a custom rule list
    pub fn with_rules(config: InferenceConfig, rules: Vec<Box<dyn ScoringRule>>) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sums every rule over the pair, returning the total and the rules that fired
    pub fn score_pair(&self, pair: &CandidatePair<'_, '_>) -> (u32, Vec<RuleHit>) {
        let mut total = 0u32;
        let mut hits = Vec::new();
        for rule in &self.rules {
            let points = rule.score(pair);
            if points > 0 {
                total = total.saturating_add(points);
                hits.push(RuleHit {
                    rule: rule.name().to_string(),
                    points,
                });
            }
        }
        (total, hits)
    }

    /// Infers links for every event in the dataset.
    ///
    /// The dataset is expected to be validated already.
    ///
    /// # Errors
    ///
    /// `MissingColumn` if `record_id`, `record_type` or `observation_date`
    /// is absent. Empty inputs are not errors.
    pub fn infer(&self, dataset: &Dataset) -> LinkResult<InferredLinks> {
        for column in INFERENCE_COLUMNS {
            if !dataset.has_column(column) {
                return Err(LinkError::MissingColumn(column.to_string()));
            }
        }

        let events: Vec<RecordProfile<'_>> =
            dataset.of_type(RecordType::Event).map(RecordProfile::new).collect();
        let observations: Vec<RecordProfile<'_>> = dataset
            .of_type(RecordType::Observation)
            .map(RecordProfile::new)
            .collect();

        let mut stats = InferenceStats {
            events: events.len(),
            observations: observations.len(),
            ..Default::default()
        };
        let mut links = Vec::new();

        for event in &events {
            if event.date.is_none() {
                stats.open_date_events += 1;
                Logger::warn(
                    Event::EventDateUnknown.as_str(),
                    &[("record_id", event.record.record_id.as_str())],
                );
            }

            let mut scored = self.score_event(event, &observations, &mut stats);

            // Stable sort keeps dataset order among equal scores.
            scored.sort_by(|a, b| b.score.cmp(&a.score));
            if scored.len() > self.config.max_links_per_event {
                stats.pairs_truncated += scored.len() - self.config.max_links_per_event;
                scored.truncate(self.config.max_links_per_event);
            }

            for s in scored {
                links.push(ImpactLink::new(
                    event.record.record_id.clone(),
                    s.observation.record.record_id.clone(),
                    s.same_source,
                    s.days_elapsed.map(|d| d / 30),
                    s.score,
                    s.hits,
                ));
            }
        }

        stats.links_emitted = links.len();
        Ok(InferredLinks { links, stats })
    }

    /// Scores one event against its candidate observations, dropping zeros
    fn score_event<'p, 'a>(
        &self,
        event: &'p RecordProfile<'a>,
        observations: &'p [RecordProfile<'a>],
        stats: &mut InferenceStats,
    ) -> Vec<Scored<'p, 'a>> {
        let mut scored = Vec::new();

        for observation in observations {
            // Unknown event date: every observation is a candidate.
            if let Some(event_date) = event.date {
                match observation.date {
                    Some(d) if d >= event_date => {}
                    _ => continue,
                }
            }

            let pair = CandidatePair { event, observation };
            stats.pairs_scored += 1;

            let (score, hits) = self.score_pair(&pair);
            if score == 0 {
                stats.pairs_discarded += 1;
                continue;
            }

            scored.push(Scored {
                observation,
                score,
                hits,
                same_source: pair.same_source(),
                days_elapsed: pair.days_elapsed(),
            });
        }

        scored
    }
}

impl Default for ImpactLinkInferer {
    fn default() -> Self {
        Self::new(InferenceConfig::default())
    }
}
