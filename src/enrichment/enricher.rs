//! Record enricher: assigns ids and categories to new rows

use std::collections::BTreeMap;

use crate::dataset::Table;
use crate::observability::{Event, Logger};
use crate::records::{Record, RecordType};

use super::errors::{EnrichmentError, EnrichmentResult};
use super::ids::{IdGenerator, RandomIdGenerator};
use super::repository::RecordRepository;

const OBSERVATION_PREFIX: &str = "obs";
const EVENT_PREFIX: &str = "evt";
const IMPACT_LINK_PREFIX: &str = "imp";

/// Adds observations, events and impact links with generated ids
#[derive(Debug, Default)]
pub struct Enricher<G = RandomIdGenerator> {
    ids: G,
}

impl<G: IdGenerator> Enricher<G> {
    pub fn new(ids: G) -> Self {
        Self { ids }
    }

    /// Appends an observation under a fresh `obs_` id.
    ///
    /// Any `record_id` or `record_type` on the input is overwritten.
    pub fn add_observation<R: RecordRepository>(
        &self,
        repo: &mut R,
        record: Record,
    ) -> EnrichmentResult<String> {
        self.add(repo, record, RecordType::Observation, OBSERVATION_PREFIX)
    }

    /// Appends an event under a fresh `evt_` id; the pillar is dropped.
    pub fn add_event<R: RecordRepository>(
        &self,
        repo: &mut R,
        record: Record,
    ) -> EnrichmentResult<String> {
        self.add(repo, record, RecordType::Event, EVENT_PREFIX)
    }

    /// Appends a row to an impact-link table under a fresh `imp_` id.
    ///
    /// Unknown columns are added to the table. The `id` column is always set
    /// by the generator.
    ///
    /// # Errors
    ///
    /// `MissingParentId` if `parent_id` is absent or blank
    pub fn add_impact_link(
        &self,
        links: &mut Table,
        mut values: BTreeMap<String, String>,
    ) -> EnrichmentResult<String> {
        let has_parent = values
            .get("parent_id")
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false);
        if !has_parent {
            Logger::warn(Event::RecordRejected.as_str(), &[("reason", "parent_id")]);
            return Err(EnrichmentError::MissingParentId);
        }

        let id = self.ids.next_id(IMPACT_LINK_PREFIX);
        values.insert("id".to_string(), id.clone());
        links.push_row(&values);

        Logger::info(
            Event::RecordAppended.as_str(),
            &[("record_id", id.as_str()), ("record_type", "impact_link")],
        );
        Ok(id)
    }

    fn add<R: RecordRepository>(
        &self,
        repo: &mut R,
        mut record: Record,
        kind: RecordType,
        prefix: &str,
    ) -> EnrichmentResult<String> {
        record.record_id = self.ids.next_id(prefix);
        record.record_type = Some(kind.as_str().to_string());
        let stored = repo.append(record)?;
        Ok(stored.record_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::{InMemoryRepository, SequentialIdGenerator};

    fn enricher() -> Enricher<SequentialIdGenerator> {
        Enricher::new(SequentialIdGenerator::new())
    }

    #[test]
    fn test_add_observation() {
        let mut repo = InMemoryRepository::new();
        let mut record = Record::default().with_value(46.0);
        record.record_id = "ignored".into();

        let id = enricher().add_observation(&mut repo, record).unwrap();
        assert_eq!(id, "obs_00000001");
        assert!(repo.records()[0].is_observation());
    }

    #[test]
    fn test_add_event_drops_pillar() {
        let mut repo = InMemoryRepository::new();
        let mut record = Record::default().with_indicator("Telebirr launch");
        record.pillar = Some("USAGE".into());

        let id = enricher().add_event(&mut repo, record).unwrap();
        assert_eq!(id, "evt_00000001");
        assert!(repo.records()[0].is_event());
        assert!(repo.records()[0].pillar.is_none());
    }

    #[test]
    fn test_add_observation_without_value_fails() {
        let mut repo = InMemoryRepository::new();
        let err = enricher()
            .add_observation(&mut repo, Record::default())
            .unwrap_err();
        assert!(matches!(err, EnrichmentError::Rejected(_)));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_add_impact_link() {
        let mut links = Table::new(["parent_id", "child_id"]);
        let mut values = BTreeMap::new();
        values.insert("parent_id".to_string(), "evt_1".to_string());
        values.insert("child_id".to_string(), "obs_2".to_string());
        values.insert("impact_direction".to_string(), "increase".to_string());

        let id = enricher().add_impact_link(&mut links, values).unwrap();
        assert_eq!(id, "imp_00000001");
        assert_eq!(links.get(0, "id"), Some("imp_00000001"));
        assert_eq!(links.get(0, "impact_direction"), Some("increase"));
    }

    #[test]
    fn test_add_impact_link_requires_parent() {
        let mut links = Table::new(["parent_id"]);
        let mut values = BTreeMap::new();
        values.insert("parent_id".to_string(), "  ".to_string());

        let err = enricher().add_impact_link(&mut links, values).unwrap_err();
        assert!(matches!(err, EnrichmentError::MissingParentId));
        assert!(links.is_empty());
    }
}
