//! Lookup results and their per-call aggregation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, EntityId};

/// One occurrence of an entity in the scanned text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetail {
    /// Text as it appears in the document
    pub text: String,
    /// Char offset into the caller's text
    pub offset: usize,
    /// Length in chars
    pub length: usize,
    /// 0 for exact matches, fractional for accent-only edits
    pub match_distance: f64,
}

/// An entity with at least one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundEntity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    pub matches: Vec<MatchDetail>,
}

/// Outcome of one lookup call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupReport {
    /// Found entities in catalog order
    pub entities: Vec<FoundEntity>,
    /// Matches were dropped because the per-call cap was reached
    pub truncated: bool,
}

impl LookupReport {
    pub fn match_count(&self) -> usize {
        self.entities.iter().map(|e| e.matches.len()).sum()
    }
}

/// Collects matches per entity for a single call.
///
/// The exact pass fills it first and the fuzzy pass extends it; an entity is
/// only materialized once it has a match.
#[derive(Debug, Default)]
pub struct Aggregator {
    found: BTreeMap<EntityId, Vec<MatchDetail>>,
    recorded: usize,
    cap: Option<usize>,
    truncated: bool,
}

impl Aggregator {
    pub fn new(cap: Option<usize>) -> Self {
        Self {
            cap,
            ..Default::default()
        }
    }

    /// Record a match. Returns `false` once the cap is reached, after which
    /// every further match is dropped.
    pub fn record(&mut self, entity: EntityId, detail: MatchDetail) -> bool {
        if self.cap.is_some_and(|cap| self.recorded >= cap) {
            self.truncated = true;
            return false;
        }
        self.found.entry(entity).or_default().push(detail);
        self.recorded += 1;
        true
    }

    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Resolve entity ids against the catalog they came from
    pub fn into_report(self, catalog: &Catalog) -> LookupReport {
        let entities = self
            .found
            .into_iter()
            .filter_map(|(id, matches)| {
                let entity = catalog.get(id)?;
                Some(FoundEntity {
                    name: entity.name.clone(),
                    description: entity.description.clone(),
                    id: entity.id.clone(),
                    entity_type: entity.entity_type.clone(),
                    subtype: entity.subtype.clone(),
                    matches,
                })
            })
            .collect();

        LookupReport {
            entities,
            truncated: self.truncated,
        }
    }
}
