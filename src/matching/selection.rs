//! Selection expansion
//!
//! Every entity contributes one selection for its own name and one per
//! alias. Selections are built once, carry fully resolved settings and a
//! precomputed normalized form, and are never mutated afterwards.

use crate::catalog::{Catalog, EntityId, ResolvedSettings};
use crate::config::MatchDefaults;

use super::normalize::{is_delineating, normalize};

/// One atomic matchable literal
#[derive(Debug, Clone)]
pub struct Selection {
    /// Literal text as written in the definition
    pub text: String,
    pub case_sensitive: bool,
    pub accent_sensitive: bool,
    /// Configured tolerance, before clamping
    pub fuzzy_edit_distance: i32,
    /// Entity this literal belongs to
    pub entity: EntityId,
    normalized: Vec<char>,
}

impl Selection {
    pub fn new(text: impl Into<String>, settings: ResolvedSettings, entity: EntityId) -> Self {
        let text = text.into();
        let normalized = normalize(&text, settings.case_sensitive, settings.accent_sensitive)
            .chars()
            .collect();
        Self {
            text,
            case_sensitive: settings.case_sensitive,
            accent_sensitive: settings.accent_sensitive,
            fuzzy_edit_distance: settings.fuzzy_edit_distance,
            entity,
            normalized,
        }
    }

    /// Normalized text as chars, compared against normalized candidates
    pub fn normalized(&self) -> &[char] {
        &self.normalized
    }

    /// Selections with a positive tolerance go through the fuzzy pass
    pub fn is_fuzzy(&self) -> bool {
        self.fuzzy_edit_distance > 0
    }

    /// Tolerance actually applied: never more than the normalized length
    /// minus one, never below zero
    pub fn effective_tolerance(&self) -> usize {
        let ceiling = self.normalized.len() as i64 - 1;
        (self.fuzzy_edit_distance as i64).min(ceiling).max(0) as usize
    }

    /// Normalized text contains an internal word boundary
    pub fn spans_words(&self) -> bool {
        self.normalized.iter().any(|c| is_delineating(*c))
    }

    /// Literal plus settings; equal keys mean the same lookup term whatever
    /// the parent entity
    pub fn term_key(&self) -> (&str, bool, bool, i32) {
        (
            &self.text,
            self.case_sensitive,
            self.accent_sensitive,
            self.fuzzy_edit_distance,
        )
    }
}

/// Expand a catalog into selections, in catalog order.
///
/// Structurally identical selections are all kept; each reports matches for
/// its own parent entity.
pub fn expand_selections(catalog: &Catalog, defaults: &MatchDefaults) -> Vec<Selection> {
    let mut selections = Vec::with_capacity(catalog.len());

    for (id, entity) in catalog.iter() {
        selections.push(Selection::new(
            entity.name.clone(),
            entity.resolved_settings(defaults),
            id,
        ));

        for alias in entity.aliases() {
            selections.push(Selection::new(
                alias.text.clone(),
                entity.resolved_alias_settings(alias, defaults),
                id,
            ));
        }
    }

    selections
}
