//! Scoring rules for (event, observation) pairs
//!
//! Each rule is a pure function of the pair returning a non-negative
//! contribution. A pair's score is the sum over the rule list; the rules
//! that fired are kept as the link's rationale.
//!
//! | rule                                  | points                       |
//! |---------------------------------------|------------------------------|
//! | shared_source                         | 10                           |
//! | indicator_match                       | 8                            |
//! | event_indicator_in_observation_text   | 6                            |
//! | observation_indicator_in_event_text   | 6                            |
//! | temporal_proximity (0..=730 days)     | max(0, 5 - days / 365)       |

use chrono::NaiveDate;

use crate::records::{days_between, Record};

/// Case-normalised view of a record, built once per record per pass
#[derive(Debug, Clone)]
pub struct RecordProfile<'a> {
    pub record: &'a Record,
    pub date: Option<NaiveDate>,
    /// Lowercased `source_url`, falling back to `source_name`
    pub source: Option<String>,
    /// Lowercased indicator label
    pub indicator: Option<String>,
    /// Lowercased `notes` + `original_text`
    pub text: String,
}

impl<'a> RecordProfile<'a> {
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            date: record.observation_date,
            source: record.source_ref().map(str::to_lowercase),
            indicator: record
                .indicator
                .as_deref()
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
            text: record.free_text().to_lowercase(),
        }
    }
}

/// An event and one of its candidate observations
#[derive(Debug, Clone, Copy)]
pub struct CandidatePair<'p, 'a> {
    pub event: &'p RecordProfile<'a>,
    pub observation: &'p RecordProfile<'a>,
}

impl CandidatePair<'_, '_> {
    /// Days from event to observation, when both dates are known
    pub fn days_elapsed(&self) -> Option<i64> {
        match (self.event.date, self.observation.date) {
            (Some(e), Some(o)) => Some(days_between(e, o)),
            _ => None,
        }
    }

    /// Both sides carry the same non-empty source reference
    pub fn same_source(&self) -> bool {
        matches!(
            (&self.event.source, &self.observation.source),
            (Some(e), Some(o)) if e == o
        )
    }
}

/// A single additive scoring heuristic
pub trait ScoringRule: Send + Sync {
    /// Stable name used in link rationale
    fn name(&self) -> &'static str;

    /// Contribution of this rule to the pair's score
    fn score(&self, pair: &CandidatePair<'_, '_>) -> u32;
}

/// Identical, non-empty source reference
#[derive(Debug, Clone, Copy)]
pub struct SharedSource {
    pub points: u32,
}

impl Default for SharedSource {
    fn default() -> Self {
        Self { points: 10 }
    }
}

impl ScoringRule for SharedSource {
    fn name(&self) -> &'static str {
        "shared_source"
    }

    fn score(&self, pair: &CandidatePair<'_, '_>) -> u32 {
        if pair.same_source() {
            self.points
        } else {
            0
        }
    }
}

/// Identical indicator labels
#[derive(Debug, Clone, Copy)]
pub struct IndicatorMatch {
    pub points: u32,
}

impl Default for IndicatorMatch {
    fn default() -> Self {
        Self { points: 8 }
    }
}

impl ScoringRule for IndicatorMatch {
    fn name(&self) -> &'static str {
        "indicator_match"
    }

    fn score(&self, pair: &CandidatePair<'_, '_>) -> u32 {
        match (&pair.event.indicator, &pair.observation.indicator) {
            (Some(e), Some(o)) if e == o => self.points,
            _ => 0,
        }
    }
}

/// The event's indicator label is mentioned in the observation's text
#[derive(Debug, Clone, Copy)]
pub struct EventIndicatorInObservationText {
    pub points: u32,
}

impl Default for EventIndicatorInObservationText {
    fn default() -> Self {
        Self { points: 6 }
    }
}

impl ScoringRule for EventIndicatorInObservationText {
    fn name(&self) -> &'static str {
        "event_indicator_in_observation_text"
    }

    fn score(&self, pair: &CandidatePair<'_, '_>) -> u32 {
        mention_points(&pair.event.indicator, &pair.observation.text, self.points)
    }
}

/// The observation's indicator label is mentioned in the event's text
#[derive(Debug, Clone, Copy)]
pub struct ObservationIndicatorInEventText {
    pub points: u32,
}

impl Default for ObservationIndicatorInEventText {
    fn default() -> Self {
        Self { points: 6 }
    }
}

impl ScoringRule for ObservationIndicatorInEventText {
    fn name(&self) -> &'static str {
        "observation_indicator_in_event_text"
    }

    fn score(&self, pair: &CandidatePair<'_, '_>) -> u32 {
        mention_points(&pair.observation.indicator, &pair.event.text, self.points)
    }
}

fn mention_points(indicator: &Option<String>, text: &str, points: u32) -> u32 {
    match indicator {
        Some(label) if text.contains(label.as_str()) => points,
        _ => 0,
    }
}

/// Bonus for observations shortly after the event, decaying per bucket.
///
/// Only applies when both dates are known and the observation falls within
/// `0..=window_days` after the event.
#[derive(Debug, Clone, Copy)]
pub struct TemporalProximity {
    pub max_bonus: u32,
    pub window_days: i64,
    pub bucket_days: i64,
}

impl Default for TemporalProximity {
    fn default() -> Self {
        Self {
            max_bonus: 5,
            window_days: 730,
            bucket_days: 365,
        }
    }
}

impl ScoringRule for TemporalProximity {
    fn name(&self) -> &'static str {
        "temporal_proximity"
    }

    fn score(&self, pair: &CandidatePair<'_, '_>) -> u32 {
        match pair.days_elapsed() {
            Some(days) if (0..=self.window_days).contains(&days) && self.bucket_days > 0 => {
                let decay = u32::try_from(days / self.bucket_days).unwrap_or(u32::MAX);
                self.max_bonus.saturating_sub(decay)
            }
            _ => 0,
        }
    }
}

/// The standard rule list, in evaluation order
pub fn default_rules(window_days: i64) -> Vec<Box<dyn ScoringRule>> {
    vec![
        Box::new(SharedSource::default()),
        Box::new(IndicatorMatch::default()),
        Box::new(EventIndicatorInObservationText::default()),
        Box::new(ObservationIndicatorInEventText::default()),
        Box::new(TemporalProximity {
            window_days,
            ..TemporalProximity::default()
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordType;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + chrono::Duration::days(offset)
    }

    fn event() -> Record {
        Record::new("E1", RecordType::Event)
    }

    fn obs() -> Record {
        Record::new("O1", RecordType::Observation).with_value(1.0)
    }

    fn score_with(rule: &dyn ScoringRule, ev: &Record, ob: &Record) -> u32 {
        let (e, o) = (RecordProfile::new(ev), RecordProfile::new(ob));
        rule.score(&CandidatePair {
            event: &e,
            observation: &o,
        })
    }

    #[test]
    fn test_shared_source_case_insensitive() {
        let ev = event().with_source_url("https://NBE.gov.et/report");
        let ob = obs().with_source_url("https://nbe.gov.et/REPORT");
        assert_eq!(score_with(&SharedSource::default(), &ev, &ob), 10);
    }

    #[test]
    fn test_shared_source_requires_non_empty() {
        assert_eq!(score_with(&SharedSource::default(), &event(), &obs()), 0);
    }

    #[test]
    fn test_shared_source_uses_name_fallback() {
        let mut ev = event();
        ev.source_name = Some("GSMA".into());
        let mut ob = obs();
        ob.source_name = Some("gsma".into());
        assert_eq!(score_with(&SharedSource::default(), &ev, &ob), 10);

        ob.source_url = Some("https://gsma.com".into());
        assert_eq!(score_with(&SharedSource::default(), &ev, &ob), 0);
    }

    #[test]
    fn test_indicator_match() {
        let ev = event().with_indicator("Account Ownership");
        let ob = obs().with_indicator("account ownership");
        assert_eq!(score_with(&IndicatorMatch::default(), &ev, &ob), 8);

        let other = obs().with_indicator("Mobile money");
        assert_eq!(score_with(&IndicatorMatch::default(), &ev, &other), 0);
        assert_eq!(score_with(&IndicatorMatch::default(), &event(), &obs()), 0);
    }

    #[test]
    fn test_event_indicator_in_observation_text() {
        let ev = event().with_indicator("Telebirr");
        let ob = obs().with_notes("Growth driven by TELEBIRR adoption");
        assert_eq!(score_with(&EventIndicatorInObservationText::default(), &ev, &ob), 6);
        assert_eq!(score_with(&ObservationIndicatorInEventText::default(), &ev, &ob), 0);
    }

    #[test]
    fn test_observation_indicator_in_event_text() {
        let ev = event().with_notes("Expected to lift mobile money accounts");
        let ob = obs().with_indicator("Mobile Money");
        assert_eq!(score_with(&ObservationIndicatorInEventText::default(), &ev, &ob), 6);
    }

    #[test]
    fn test_mention_searches_original_text() {
        let mut ob = obs();
        ob.original_text = Some("M-Pesa entry".into());
        let ev = event().with_indicator("m-pesa");
        assert_eq!(score_with(&EventIndicatorInObservationText::default(), &ev, &ob), 6);
    }

    #[test]
    fn test_temporal_buckets() {
        let rule = TemporalProximity::default();
        let ev = event().with_date(day(0));
        let cases = [(0, 5), (364, 5), (365, 4), (729, 4), (730, 3), (731, 0), (800, 0), (-1, 0)];
        for (offset, expected) in cases {
            let ob = obs().with_date(day(offset));
            assert_eq!(score_with(&rule, &ev, &ob), expected, "offset {}", offset);
        }
    }

    #[test]
    fn test_temporal_needs_both_dates() {
        let rule = TemporalProximity::default();
        assert_eq!(score_with(&rule, &event(), &obs().with_date(day(0))), 0);
        assert_eq!(score_with(&rule, &event().with_date(day(0)), &obs()), 0);
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<_> = default_rules(730).iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "shared_source",
                "indicator_match",
                "event_indicator_in_observation_text",
                "observation_indicator_in_event_text",
                "temporal_proximity",
            ]
        );
    }
}
