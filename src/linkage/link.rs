//! Impact-link output types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::dataset::Table;

/// Column schema of an inferred link table
pub const LINK_COLUMNS: &[&str] = &[
    "parent_id",
    "child_id",
    "relationship_type",
    "impact_direction",
    "impact_magnitude",
    "evidence_basis",
    "lag_months",
    "score",
];

/// `Direct` iff event and observation share a source reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipType {
    Direct,
    Indirect,
}

impl RelationshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::Direct => "direct",
            RelationshipType::Indirect => "indirect",
        }
    }

    /// Evidence basis paired with this relationship
    pub fn evidence_basis(&self) -> EvidenceBasis {
        match self {
            RelationshipType::Direct => EvidenceBasis::Empirical,
            RelationshipType::Indirect => EvidenceBasis::Expert,
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Empirical` for shared-source links, `Expert` otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceBasis {
    Empirical,
    Expert,
}

impl EvidenceBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceBasis::Empirical => "empirical",
            EvidenceBasis::Expert => "expert",
        }
    }
}

impl fmt::Display for EvidenceBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule's contribution to a link score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleHit {
    pub rule: String,
    pub points: u32,
}

/// A scored event -> observation link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactLink {
    pub parent_id: String,
    pub child_id: String,
    pub relationship_type: RelationshipType,
    /// Left unset by inference; reserved for manual annotation
    pub impact_direction: Option<String>,
    /// Left unset by inference; reserved for manual annotation
    pub impact_magnitude: Option<f64>,
    pub evidence_basis: EvidenceBasis,
    pub lag_months: Option<i64>,
    pub score: u32,
    /// Rules that contributed, in rule order
    #[serde(default)]
    pub rationale: Vec<RuleHit>,
}

impl ImpactLink {
    /// Creates a link with the relationship/evidence pair derived from one flag
    pub fn new(
        parent_id: impl Into<String>,
        child_id: impl Into<String>,
        same_source: bool,
        lag_months: Option<i64>,
        score: u32,
        rationale: Vec<RuleHit>,
    ) -> Self {
        let relationship_type = if same_source {
            RelationshipType::Direct
        } else {
            RelationshipType::Indirect
        };
        Self {
            parent_id: parent_id.into(),
            child_id: child_id.into(),
            relationship_type,
            impact_direction: None,
            impact_magnitude: None,
            evidence_basis: relationship_type.evidence_basis(),
            lag_months,
            score,
            rationale,
        }
    }

    fn cells(&self) -> BTreeMap<String, String> {
        let mut cells = BTreeMap::new();
        cells.insert("parent_id".to_string(), self.parent_id.clone());
        cells.insert("child_id".to_string(), self.child_id.clone());
        cells.insert(
            "relationship_type".to_string(),
            self.relationship_type.as_str().to_string(),
        );
        cells.insert(
            "impact_direction".to_string(),
            self.impact_direction.clone().unwrap_or_default(),
        );
        cells.insert(
            "impact_magnitude".to_string(),
            self.impact_magnitude.map(|m| m.to_string()).unwrap_or_default(),
        );
        cells.insert(
            "evidence_basis".to_string(),
            self.evidence_basis.as_str().to_string(),
        );
        cells.insert(
            "lag_months".to_string(),
            self.lag_months.map(|m| m.to_string()).unwrap_or_default(),
        );
        cells.insert("score".to_string(), self.score.to_string());
        cells
    }
}

/// Counters for one inference pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceStats {
    pub events: usize,
    pub observations: usize,
    /// Events whose date could not be parsed (matched against everything)
    pub open_date_events: usize,
    pub pairs_scored: usize,
    /// Pairs dropped for scoring 0
    pub pairs_discarded: usize,
    /// Positive pairs cut by the per-event limit
    pub pairs_truncated: usize,
    pub links_emitted: usize,
}

/// Result of an inference pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InferredLinks {
    pub links: Vec<ImpactLink>,
    pub stats: InferenceStats,
}

impl InferredLinks {
    /// Links emitted for one event, in emitted order
    pub fn for_event<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a ImpactLink> + 'a {
        self.links.iter().filter(move |l| l.parent_id == parent_id)
    }
}

/// Either the authoritative explicit table or an inferred one
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTable {
    /// Loaded from file, returned verbatim
    Explicit(Table),
    /// Produced by the heuristic pass
    Inferred(InferredLinks),
}

impl LinkTable {
    pub fn is_explicit(&self) -> bool {
        matches!(self, LinkTable::Explicit(_))
    }

    pub fn len(&self) -> usize {
        match self {
            LinkTable::Explicit(t) => t.len(),
            LinkTable::Inferred(i) => i.links.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders to a table. Inferred tables always carry `LINK_COLUMNS`,
    /// even when empty.
    pub fn to_table(&self) -> Table {
        match self {
            LinkTable::Explicit(t) => t.clone(),
            LinkTable::Inferred(inferred) => {
                let mut table = Table::new(LINK_COLUMNS.iter().copied());
                for link in &inferred.links {
                    table.push_row(&link.cells());
                }
                table
            }
        }
    }

    /// JSON payload; `explain` adds the per-link rule trace and stats
    pub fn to_json(&self, explain: bool) -> Value {
        match self {
            LinkTable::Explicit(t) => json!({
                "source": "explicit",
                "columns": t.headers(),
                "links": t.to_json_rows(),
            }),
            LinkTable::Inferred(inferred) => {
                let links: Vec<Value> = inferred
                    .links
                    .iter()
                    .map(|l| {
                        let mut v = json!({
                            "parent_id": l.parent_id,
                            "child_id": l.child_id,
                            "relationship_type": l.relationship_type,
                            "impact_direction": l.impact_direction,
                            "impact_magnitude": l.impact_magnitude,
                            "evidence_basis": l.evidence_basis,
                            "lag_months": l.lag_months,
                            "score": l.score,
                        });
                        if explain {
                            v["rationale"] = json!(l.rationale);
                        }
                        v
                    })
                    .collect();

                let mut out = json!({
                    "source": "inferred",
                    "columns": LINK_COLUMNS,
                    "links": links,
                });
                if explain {
                    out["stats"] = json!(inferred.stats);
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_evidence_pairing() {
        let direct = ImpactLink::new("E1", "O1", true, Some(0), 23, vec![]);
        assert_eq!(direct.relationship_type, RelationshipType::Direct);
        assert_eq!(direct.evidence_basis, EvidenceBasis::Empirical);

        let indirect = ImpactLink::new("E1", "O2", false, None, 6, vec![]);
        assert_eq!(indirect.relationship_type, RelationshipType::Indirect);
        assert_eq!(indirect.evidence_basis, EvidenceBasis::Expert);
        assert!(indirect.impact_direction.is_none());
        assert!(indirect.impact_magnitude.is_none());
    }

    #[test]
    fn test_empty_inferred_table_has_schema() {
        let table = LinkTable::Inferred(InferredLinks::default()).to_table();
        assert!(table.is_empty());
        assert_eq!(table.headers(), LINK_COLUMNS);
    }

    #[test]
    fn test_inferred_table_cells() {
        let inferred = InferredLinks {
            links: vec![ImpactLink::new("E1", "O1", false, None, 8, vec![])],
            stats: InferenceStats::default(),
        };
        let table = LinkTable::Inferred(inferred).to_table();
        assert_eq!(table.get(0, "relationship_type"), Some("indirect"));
        assert_eq!(table.get(0, "evidence_basis"), Some("expert"));
        assert_eq!(table.get(0, "lag_months"), None);
        assert_eq!(table.get(0, "score"), Some("8"));
    }

    #[test]
    fn test_explicit_table_is_verbatim() {
        let explicit = Table::from_parts(
            vec!["parent_id".into(), "child_id".into(), "custom".into()],
            vec![vec!["E9".into(), "O9".into(), "kept".into()]],
        );
        let table = LinkTable::Explicit(explicit.clone());
        assert!(table.is_explicit());
        assert_eq!(table.to_table(), explicit);
    }

    #[test]
    fn test_json_explain_adds_rationale() {
        let inferred = InferredLinks {
            links: vec![ImpactLink::new(
                "E1",
                "O1",
                true,
                Some(2),
                10,
                vec![RuleHit {
                    rule: "shared_source".into(),
                    points: 10,
                }],
            )],
            stats: InferenceStats::default(),
        };
        let table = LinkTable::Inferred(inferred);

        let plain = table.to_json(false);
        assert!(plain["links"][0].get("rationale").is_none());
        assert!(plain.get("stats").is_none());

        let explained = table.to_json(true);
        assert_eq!(explained["links"][0]["rationale"][0]["rule"], "shared_source");
        assert_eq!(explained["links"][0]["relationship_type"], "direct");
        assert!(explained.get("stats").is_some());
    }
}
