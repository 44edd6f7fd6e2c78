//! Explicit impact-link file handling

use std::path::Path;

use crate::dataset::{load_csv_safe, load_unified_file, Table};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::validation::RecordValidator;

use super::errors::{LinkError, LinkResult};
use super::inferer::{ImpactLinkInferer, InferenceConfig};
use super::link::LinkTable;

/// Loads an explicit link file if one exists.
///
/// Returns `Ok(None)` when the file is absent, so the caller falls back to
/// inference. A present file is returned verbatim.
///
/// # Errors
///
/// - `ExplicitMissingParentId` if the file has no `parent_id` column
/// - `Dataset` if the file cannot be read
pub fn load_explicit_links(path: &Path) -> LinkResult<Option<Table>> {
    if !path.exists() {
        return Ok(None);
    }

    let table = load_csv_safe(path)?;
    if !table.has_column("parent_id") {
        return Err(LinkError::ExplicitMissingParentId);
    }

    Ok(Some(table))
}

/// Resolves the link table: the explicit file when present, otherwise links
/// inferred from the validated unified file.
///
/// Inference never runs on data that failed validation.
pub fn resolve_link_table(
    explicit_path: &Path,
    unified_path: &Path,
    config: InferenceConfig,
) -> LinkResult<LinkTable> {
    if let Some(table) = load_explicit_links(explicit_path)? {
        let rows = table.len().to_string();
        log_event_with_fields(Event::LinksExplicit, &[("rows", rows.as_str())]);
        return Ok(LinkTable::Explicit(table));
    }

    let dataset = load_unified_file(unified_path)?;
    if let Err(err) = RecordValidator::new().validate_all(dataset.records()) {
        log_event_with_fields(
            Event::ValidationFailed,
            &[("code", err.code().code())],
        );
        return Err(err.into());
    }

    let scope = ObservationScope::new("LINK_INFERENCE");
    let inferred = match ImpactLinkInferer::new(config).infer(&dataset) {
        Ok(inferred) => inferred,
        Err(err) => {
            scope.fail(&err.to_string());
            return Err(err);
        }
    };

    let stats = inferred.stats;
    let (events, observations, links) = (
        stats.events.to_string(),
        stats.observations.to_string(),
        stats.links_emitted.to_string(),
    );
    scope.complete_with_fields(&[
        ("events", events.as_str()),
        ("links", links.as_str()),
        ("observations", observations.as_str()),
    ]);
    log_event_with_fields(
        Event::LinkInferenceComplete,
        &[("links", links.as_str())],
    );

    Ok(LinkTable::Inferred(inferred))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_absent_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(load_explicit_links(&tmp.path().join("impact_links.csv"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_present_file_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("impact_links.csv");
        fs::write(&path, "parent_id,child_id,impact_direction\nEVT_1,REC_9,increase\n").unwrap();

        let table = load_explicit_links(&path).unwrap().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "impact_direction"), Some("increase"));
    }

    #[test]
    fn test_missing_parent_id_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("impact_links.csv");
        fs::write(&path, "child_id\nREC_9\n").unwrap();

        let err = load_explicit_links(&path).unwrap_err();
        assert!(matches!(err, LinkError::ExplicitMissingParentId));
    }

    #[test]
    fn test_ragged_file_is_read_failure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("impact_links.csv");
        fs::write(&path, "parent_id,child_id\nEVT_1,REC_1,increase,0.4\n").unwrap();

        let err = load_explicit_links(&path).unwrap_err();
        assert!(matches!(err, LinkError::Dataset(DatasetError::ReadFailed { .. })));
    }

    const HEADER: &str = "record_id,record_type,pillar,indicator,indicator_code,value_numeric,observation_date,source_name,source_url,confidence\n";

    #[test]
    fn test_resolve_prefers_explicit() {
        let tmp = TempDir::new().unwrap();
        let explicit = tmp.path().join("impact_links.csv");
        fs::write(&explicit, "parent_id,child_id\nEVT_1,REC_1\n").unwrap();

        // The unified file is never read when the explicit file exists.
        let table = resolve_link_table(
            &explicit,
            &tmp.path().join("missing.csv"),
            InferenceConfig::default(),
        )
        .unwrap();
        assert!(table.is_explicit());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_resolve_infers_when_absent() {
        let tmp = TempDir::new().unwrap();
        let unified = tmp.path().join("unified.csv");
        fs::write(
            &unified,
            format!(
                "{}E1,event,,Telebirr,,,2021-05-01,,https://a.org,high\n\
                 O1,observation,USAGE,Telebirr,USG,12.5,2022-01-01,,https://a.org,high\n",
                HEADER
            ),
        )
        .unwrap();

        let table = resolve_link_table(
            &tmp.path().join("impact_links.csv"),
            &unified,
            InferenceConfig::default(),
        )
        .unwrap();
        match table {
            LinkTable::Inferred(inferred) => {
                assert_eq!(inferred.links.len(), 1);
                // 10 shared source + 8 indicator + 5 temporal (245 days)
                assert_eq!(inferred.links[0].score, 23);
                assert_eq!(inferred.links[0].lag_months, Some(8));
            }
            LinkTable::Explicit(_) => panic!("expected inferred links"),
        }
    }

    #[test]
    fn test_resolve_refuses_invalid_data() {
        let tmp = TempDir::new().unwrap();
        let unified = tmp.path().join("unified.csv");
        fs::write(
            &unified,
            format!("{}E1,event,ACCESS,x,,,2021-05-01,,,\n", HEADER),
        )
        .unwrap();

        let err = resolve_link_table(
            &tmp.path().join("impact_links.csv"),
            &unified,
            InferenceConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LinkError::Validation(_)));
    }
}
