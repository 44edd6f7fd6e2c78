//! # Record Repository

use crate::dataset::Dataset;
use crate::observability::{Event, Logger};
use crate::records::{Record, RecordType};
use crate::validation::RecordValidator;

use super::errors::{EnrichmentError, EnrichmentResult};

/// Append-only store of unified records
pub trait RecordRepository: std::fmt::Debug {
    /// Append a record after enforcing the category invariants.
    ///
    /// Returns the record as stored.
    fn append(&mut self, record: Record) -> EnrichmentResult<&Record>;

    /// All records in insertion order
    fn records(&self) -> &[Record];

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Repository over an in-memory `Dataset`
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    dataset: Dataset,
    validator: RecordValidator,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::from_dataset(Dataset::from_records(Vec::new()))
    }

    /// Wraps an already-loaded dataset. Existing rows are not re-validated.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            dataset,
            validator: RecordValidator::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

impl RecordRepository for InMemoryRepository {
    fn append(&mut self, mut record: Record) -> EnrichmentResult<&Record> {
        let kind = match (record.kind(), record.record_type.as_deref()) {
            (Some(kind), _) => kind,
            (None, raw) => {
                Logger::warn(
                    Event::RecordRejected.as_str(),
                    &[
                        ("reason", "record_type"),
                        ("record_id", record.record_id.as_str()),
                    ],
                );
                return Err(match raw.filter(|t| !t.trim().is_empty()) {
                    Some(t) => EnrichmentError::UnknownRecordType {
                        record_type: t.to_string(),
                        record_id: record.record_id,
                    },
                    None => EnrichmentError::MissingRecordType(record.record_id),
                });
            }
        };

        // Events never carry a pillar.
        if kind == RecordType::Event {
            record.pillar = None;
        }

        if let Err(err) = self.validator.validate_record(&record) {
            Logger::warn(
                Event::RecordRejected.as_str(),
                &[
                    ("code", err.code().code()),
                    ("record_id", record.record_id.as_str()),
                ],
            );
            return Err(err.rejected().into());
        }

        Logger::info(
            Event::RecordAppended.as_str(),
            &[
                ("record_id", record.record_id.as_str()),
                ("record_type", kind.as_str()),
            ],
        );
        self.dataset.push(record);

        let stored = self.dataset.records().len() - 1;
        Ok(&self.dataset.records()[stored])
    }

    fn records(&self) -> &[Record] {
        self.dataset.records()
    }
}
