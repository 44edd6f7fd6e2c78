//! Exploratory summaries over the unified records

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::records::Record;

/// Bucket name for missing category values
pub const MISSING_BUCKET: &str = "<missing>";

/// Category counts across the dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total: usize,
    /// Rows without a `record_type` are not counted here
    pub by_record_type: BTreeMap<String, usize>,
    pub by_pillar: BTreeMap<String, usize>,
    pub by_source_type: BTreeMap<String, usize>,
    pub by_confidence: BTreeMap<String, usize>,
}

/// Counts records by category. Missing pillar, source type and confidence
/// values are counted under `MISSING_BUCKET`.
pub fn summarize_dataset(records: &[Record]) -> DatasetSummary {
    let mut summary = DatasetSummary {
        total: records.len(),
        ..Default::default()
    };

    for record in records {
        if let Some(t) = non_blank(&record.record_type) {
            *summary.by_record_type.entry(t.to_string()).or_default() += 1;
        }
        bump(&mut summary.by_pillar, &record.pillar);
        bump(&mut summary.by_source_type, &record.source_type);
        bump(&mut summary.by_confidence, &record.confidence);
    }

    summary
}

fn bump(counts: &mut BTreeMap<String, usize>, value: &Option<String>) {
    let key = non_blank(value).unwrap_or(MISSING_BUCKET);
    *counts.entry(key.to_string()).or_default() += 1;
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Number of dated records for one indicator code in one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageRow {
    pub indicator_code: String,
    pub year: i32,
    pub count: usize,
}

/// Per (indicator_code, year) record counts, ordered by code then year.
/// Records missing either field are skipped.
pub fn temporal_coverage(records: &[Record]) -> Vec<CoverageRow> {
    let mut counts: BTreeMap<(String, i32), usize> = BTreeMap::new();
    for record in records {
        if let (Some(code), Some(date)) = (non_blank(&record.indicator_code), record.observation_date) {
            *counts.entry((code.to_string(), date.year())).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|((indicator_code, year), count)| CoverageRow {
            indicator_code,
            year,
            count,
        })
        .collect()
}

/// One point of an indicator's series with its change from the previous point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub observation_date: Option<NaiveDate>,
    pub value_numeric: Option<f64>,
    /// Percentage-point change from the previous point; absent for the first
    /// point or when either value is missing
    pub growth_pp: Option<f64>,
}

/// Records of one indicator code sorted by date (undated last, ties in file
/// order) with point-to-point differences.
pub fn growth_rates(records: &[Record], indicator_code: &str) -> Vec<GrowthPoint> {
    let mut series: Vec<&Record> = records
        .iter()
        .filter(|r| r.indicator_code.as_deref() == Some(indicator_code))
        .collect();
    series.sort_by(|a, b| date_order(a.observation_date, b.observation_date));

    let mut previous: Option<f64> = None;
    let mut points = Vec::with_capacity(series.len());
    for (idx, record) in series.into_iter().enumerate() {
        let growth_pp = match (idx, previous, record.value_numeric) {
            (0, _, _) => None,
            (_, Some(prev), Some(cur)) => Some(cur - prev),
            _ => None,
        };
        points.push(GrowthPoint {
            observation_date: record.observation_date,
            value_numeric: record.value_numeric,
            growth_pp,
        });
        previous = record.value_numeric;
    }
    points
}

/// Mean of the available point-to-point changes, 0.0 when there are none
pub fn average_growth(records: &[Record], indicator_code: &str) -> f64 {
    let diffs: Vec<f64> = growth_rates(records, indicator_code)
        .into_iter()
        .filter_map(|p| p.growth_pp)
        .collect();
    if diffs.is_empty() {
        0.0
    } else {
        diffs.iter().sum::<f64>() / diffs.len() as f64
    }
}

pub(crate) fn date_order(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordType;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(id: &str, code: &str, date: Option<NaiveDate>, value: f64) -> Record {
        let mut r = Record::new(id, RecordType::Observation).with_value(value);
        r.indicator_code = Some(code.to_string());
        r.observation_date = date;
        r
    }

    #[test]
    fn test_summary_counts_missing() {
        let mut a = obs("O1", "ACC", None, 1.0);
        a.pillar = Some("ACCESS".into());
        a.confidence = Some("high".into());
        let b = Record::new("E1", RecordType::Event);
        let mut c = Record::default();
        c.record_id = "X".into();

        let summary = summarize_dataset(&[a, b, c]);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_record_type.get("observation"), Some(&1));
        assert_eq!(summary.by_record_type.get("event"), Some(&1));
        assert_eq!(summary.by_record_type.values().sum::<usize>(), 2);
        assert_eq!(summary.by_pillar.get("ACCESS"), Some(&1));
        assert_eq!(summary.by_pillar.get(MISSING_BUCKET), Some(&2));
        assert_eq!(summary.by_source_type.get(MISSING_BUCKET), Some(&3));
        assert_eq!(summary.by_confidence.get("high"), Some(&1));
    }

    #[test]
    fn test_temporal_coverage() {
        let records = vec![
            obs("O1", "USG", Some(ymd(2021, 3, 1)), 1.0),
            obs("O2", "ACC", Some(ymd(2021, 6, 1)), 1.0),
            obs("O3", "ACC", Some(ymd(2021, 9, 1)), 1.0),
            obs("O4", "ACC", Some(ymd(2024, 1, 1)), 1.0),
            obs("O5", "ACC", None, 1.0),
        ];

        let coverage = temporal_coverage(&records);
        assert_eq!(
            coverage,
            vec![
                CoverageRow { indicator_code: "ACC".into(), year: 2021, count: 2 },
                CoverageRow { indicator_code: "ACC".into(), year: 2024, count: 1 },
                CoverageRow { indicator_code: "USG".into(), year: 2021, count: 1 },
            ]
        );
    }

    #[test]
    fn test_growth_rates_sorted_by_date() {
        let records = vec![
            obs("O1", "ACC", Some(ymd(2021, 1, 1)), 46.0),
            obs("O2", "ACC", Some(ymd(2017, 1, 1)), 35.0),
            obs("O3", "USG", Some(ymd(2018, 1, 1)), 10.0),
            obs("O4", "ACC", Some(ymd(2024, 1, 1)), 49.0),
        ];

        let points = growth_rates(&records, "ACC");
        let values: Vec<_> = points.iter().map(|p| p.value_numeric).collect();
        let growth: Vec<_> = points.iter().map(|p| p.growth_pp).collect();
        assert_eq!(values, vec![Some(35.0), Some(46.0), Some(49.0)]);
        assert_eq!(growth, vec![None, Some(11.0), Some(3.0)]);
        assert_eq!(average_growth(&records, "ACC"), 7.0);
    }

    #[test]
    fn test_average_growth_without_points() {
        assert_eq!(average_growth(&[], "ACC"), 0.0);
        let single = vec![obs("O1", "ACC", Some(ymd(2021, 1, 1)), 46.0)];
        assert_eq!(average_growth(&single, "ACC"), 0.0);
    }

    #[test]
    fn test_undated_points_sort_last() {
        let records = vec![
            obs("O1", "ACC", None, 50.0),
            obs("O2", "ACC", Some(ymd(2021, 1, 1)), 46.0),
        ];
        let points = growth_rates(&records, "ACC");
        assert_eq!(points[0].value_numeric, Some(46.0));
        assert_eq!(points[1].growth_pp, Some(4.0));
    }
}
