//! Typed view of the unified record file

use std::collections::BTreeMap;

use crate::records::{parse_date, Record, RecordType};

use super::table::Table;

/// Columns mapped onto named `Record` fields
const KNOWN_COLUMNS: &[&str] = &[
    "record_id",
    "record_type",
    "pillar",
    "indicator",
    "indicator_code",
    "value_numeric",
    "observation_date",
    "source_name",
    "source_url",
    "source_type",
    "confidence",
    "notes",
    "original_text",
];

/// The unified dataset: typed records in file order, plus the raw cells
/// they were read from.
///
/// Row `i` of `source` always backs `records[i]`. Writing the dataset back
/// emits the source cells, so coercion never alters rows already on disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    source: Table,
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset with an explicit column list
    pub fn new<I, S>(columns: I, records: Vec<Record>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut dataset = Self {
            source: Table::new(columns),
            records: Vec::with_capacity(records.len()),
        };
        for record in records {
            dataset.push(record);
        }
        dataset
    }

    /// Creates a dataset carrying every named record column
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(KNOWN_COLUMNS.iter().copied(), records)
    }

    /// Coerces a raw table into typed records
    pub fn from_table(table: &Table) -> Self {
        let mut records = Vec::with_capacity(table.len());

        for row in 0..table.len() {
            let text = |col: &str| table.get(row, col).map(|v| v.trim().to_string());

            let extra: BTreeMap<String, String> = table
                .headers()
                .iter()
                .filter(|h| !KNOWN_COLUMNS.contains(&h.as_str()))
                .filter_map(|h| table.get(row, h).map(|v| (h.clone(), v.to_string())))
                .collect();

            records.push(Record {
                record_id: text("record_id").unwrap_or_default(),
                record_type: text("record_type"),
                pillar: text("pillar"),
                indicator: text("indicator"),
                indicator_code: text("indicator_code"),
                value_numeric: table
                    .get(row, "value_numeric")
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .filter(|v| v.is_finite()),
                observation_date: table.get(row, "observation_date").and_then(parse_date),
                source_name: text("source_name"),
                source_url: text("source_url"),
                source_type: text("source_type"),
                confidence: text("confidence"),
                notes: text("notes"),
                original_text: text("original_text"),
                extra,
            });
        }

        Self {
            source: table.clone(),
            records,
        }
    }

    /// Table for writing back. Loaded rows keep their cells exactly as read;
    /// appended records follow, and any column they introduce is added at
    /// the end.
    pub fn to_table(&self) -> Table {
        self.source.clone()
    }

    pub fn columns(&self) -> &[String] {
        self.source.headers()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.source.has_column(name)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one category, in file order
    pub fn of_type(&self, kind: RecordType) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(move |r| r.kind() == Some(kind))
    }

    pub(crate) fn push(&mut self, record: Record) {
        self.source.push_row(&record_cells(&record));
        self.records.push(record);
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

fn record_cells(record: &Record) -> BTreeMap<String, String> {
    let mut cells = BTreeMap::new();
    let mut put = |k: &str, v: Option<String>| {
        if let Some(v) = v {
            cells.insert(k.to_string(), v);
        }
    };

    put("record_id", Some(record.record_id.clone()));
    put("record_type", record.record_type.clone());
    put("pillar", record.pillar.clone());
    put("indicator", record.indicator.clone());
    put("indicator_code", record.indicator_code.clone());
    put("value_numeric", record.value_numeric.map(|v| v.to_string()));
    put(
        "observation_date",
        record.observation_date.map(|d| d.format("%Y-%m-%d").to_string()),
    );
    put("source_name", record.source_name.clone());
    put("source_url", record.source_url.clone());
    put("source_type", record.source_type.clone());
    put("confidence", record.confidence.clone());
    put("notes", record.notes.clone());
    put("original_text", record.original_text.clone());

    for (k, v) in &record.extra {
        cells.insert(k.clone(), v.clone());
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_table() -> Table {
        let headers = ["record_id", "record_type", "value_numeric", "observation_date", "region"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = vec![
            vec!["REC_1", "observation", "46.50", "2021-12-31", "national"],
            vec!["REC_2", "event", "", "sometime", ""],
            vec!["REC_3", "observation", "n/a", "2024", ""],
        ]
        .into_iter()
        .map(|r| r.into_iter().map(String::from).collect())
        .collect();
        Table::from_parts(headers, rows)
    }

    #[test]
    fn test_coercion() {
        let ds = Dataset::from_table(&sample_table());
        let recs = ds.records();

        assert_eq!(recs[0].value_numeric, Some(46.5));
        assert_eq!(recs[0].observation_date, NaiveDate::from_ymd_opt(2021, 12, 31));
        assert_eq!(recs[0].extra.get("region").map(String::as_str), Some("national"));

        assert_eq!(recs[1].observation_date, None);
        assert!(recs[1].is_event());

        assert_eq!(recs[2].value_numeric, None);
        assert_eq!(recs[2].observation_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_to_table_keeps_loaded_cells() {
        let ds = Dataset::from_table(&sample_table());
        assert_eq!(ds.to_table(), sample_table());

        let table = ds.to_table();
        assert_eq!(table.get(0, "value_numeric"), Some("46.50"));
        assert_eq!(table.get(1, "observation_date"), Some("sometime"));
        assert_eq!(table.get(2, "value_numeric"), Some("n/a"));
    }

    #[test]
    fn test_pushed_record_is_rendered() {
        let mut ds = Dataset::from_table(&sample_table());
        let mut record = Record::new("EVT_9", RecordType::Event)
            .with_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        record.notes = Some("new column".into());
        ds.push(record);

        let table = ds.to_table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.get(3, "observation_date"), Some("2025-03-01"));
        assert_eq!(table.get(3, "notes"), Some("new column"));
        assert_eq!(table.get(0, "notes"), None);
        assert_eq!(table.get(2, "observation_date"), Some("2024"));
        assert!(ds.has_column("notes"));
    }

    #[test]
    fn test_text_fields_trimmed() {
        let table = Table::from_parts(
            vec!["record_id".into(), "record_type".into(), "indicator".into()],
            vec![vec!["E1".into(), " event ".into(), "  Telebirr ".into()]],
        );
        let ds = Dataset::from_table(&table);
        assert!(ds.records()[0].is_event());
        assert_eq!(ds.records()[0].indicator.as_deref(), Some("Telebirr"));
        assert_eq!(ds.to_table().get(0, "indicator"), Some("  Telebirr "));
    }

    #[test]
    fn test_new_keeps_declared_columns() {
        let ds = Dataset::new(["record_id", "record_type"], vec![]);
        assert_eq!(ds.columns(), &["record_id", "record_type"]);
        assert!(!ds.has_column("observation_date"));
    }

    #[test]
    fn test_of_type_filters() {
        let ds = Dataset::from_table(&sample_table());
        assert_eq!(ds.of_type(RecordType::Observation).count(), 2);
        assert_eq!(ds.of_type(RecordType::Event).count(), 1);
        assert_eq!(ds.of_type(RecordType::Target).count(), 0);
    }
}
