//! EntityLookup - exact and fuzzy entity search over one catalog
//!
//! The catalog is expanded into selections and compiled once. Each call is
//! independent: all scratch state lives on the call's stack, so one engine
//! can serve concurrent callers behind an `Arc`.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::LookupConfig;
use crate::error::Result;
use crate::matching::exact::ExactMatcher;
use crate::matching::fuzzy::FuzzyMatcher;
use crate::matching::normalize::{is_delineating, trim_delineating};
use crate::matching::selection::{expand_selections, Selection};
use crate::matching::tokenizer::IndexedText;

use super::results::{Aggregator, FoundEntity, LookupReport};

/// Cooperative cancellation signal shared between a caller and a running
/// lookup. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Lookup engine over an immutable catalog
pub struct EntityLookup {
    catalog: Catalog,
    selections: Vec<Selection>,
    exact: ExactMatcher,
    fuzzy: FuzzyMatcher,
    max_matches: Option<usize>,
}

impl EntityLookup {
    /// Expand and compile a catalog.
    ///
    /// Fails only if an exact-match pattern cannot be compiled.
    pub fn new(catalog: Catalog, config: &LookupConfig) -> Result<Self> {
        let selections = expand_selections(&catalog, &config.defaults);

        let mut seen = HashSet::with_capacity(selections.len());
        for selection in &selections {
            if !seen.insert(selection.term_key()) {
                warn!(
                    term = %selection.text,
                    "Duplicate lookup term; every copy reports matches for its own entity"
                );
            }
        }

        let exact = ExactMatcher::new(&selections, config.regex_time_budget())?;
        let fuzzy = FuzzyMatcher::new(&selections, config.max_words_per_candidate);

        info!(
            entities = catalog.len(),
            selections = selections.len(),
            exact = exact.len(),
            fuzzy = fuzzy.len(),
            "Entity lookup engine built"
        );

        Ok(Self {
            catalog,
            selections,
            exact,
            fuzzy,
            max_matches: config.max_matches_per_call,
        })
    }

    /// Load the configured definition file and build an engine from it
    pub fn from_config(config: &LookupConfig) -> Result<Self> {
        let catalog = Catalog::load(&config.resolved_definition_path())?;
        Self::new(catalog, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Find every entity occurrence in `text`
    pub fn lookup(&self, text: &str) -> Result<Vec<FoundEntity>> {
        self.lookup_with_cancel(text, &CancellationFlag::new())
            .map(|report| report.entities)
    }

    /// Find every entity occurrence in `text`, polling `cancel` as the scan
    /// progresses.
    ///
    /// Runs the exact pass over the boundary-trimmed text, then the fuzzy
    /// pass. Offsets in the report refer to the untrimmed `text`.
    pub fn lookup_with_cancel(
        &self,
        text: &str,
        cancel: &CancellationFlag,
    ) -> Result<LookupReport> {
        let trimmed = trim_delineating(text);
        let lead_bytes = text.len() - text.trim_start_matches(is_delineating).len();
        let lead = text[..lead_bytes].chars().count();

        let indexed = IndexedText::new(trimmed);
        let mut aggregator = Aggregator::new(self.max_matches);

        if !trimmed.is_empty() {
            self.exact
                .scan(&self.selections, &indexed, lead, &mut aggregator, cancel)?;
            self.fuzzy
                .scan(&self.selections, &indexed, lead, &mut aggregator, cancel)?;
        }

        let report = aggregator.into_report(&self.catalog);

        if report.truncated {
            warn!(
                cap = self.max_matches.unwrap_or_default(),
                "Reached maximum match capacity, further matches skipped"
            );
        }
        debug!(
            chars = indexed.char_len(),
            entities = report.entities.len(),
            matches = report.match_count(),
            "Lookup complete"
        );

        Ok(report)
    }
}

/// One-shot lookup with default settings
pub fn find_entities(text: &str, catalog: &Catalog) -> Result<Vec<FoundEntity>> {
    EntityLookup::new(catalog.clone(), &LookupConfig::default())?.lookup(text)
}
