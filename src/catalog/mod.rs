//! Entity catalog
//!
//! An ordered, immutable list of entities loaded once from a JSON or CSV
//! definition. Entities are identified by their position in the catalog.

pub mod entity;

use std::path::Path;

use tracing::info;

pub use entity::{Alias, Entity, ResolvedSettings};

use crate::error::CatalogError;

/// Position of an entity within its catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub usize);

/// Ordered collection of lookup targets
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entities: Vec<Entity>,
}

impl Catalog {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self { entities }
    }

    /// Catalog of bare words, each an entity with default settings
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(words.into_iter().map(Entity::named).collect())
    }

    /// Parse a JSON array of entity objects
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entities: Vec<Entity> = serde_json::from_str(json)?;
        Ok(Self::new(entities))
    }

    /// Parse a comma-separated word list; empty cells are skipped
    pub fn from_csv_str(csv: &str) -> Result<Self, CatalogError> {
        Ok(Self::from_words(
            csv.lines()
                .flat_map(|line| line.split(','))
                .filter(|word| !word.is_empty()),
        ))
    }

    /// Load a definition file, choosing the parser by extension
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let read = || {
            std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let catalog = match extension.as_deref() {
            Some("json") => Self::from_json_str(&read()?)?,
            Some("csv") => Self::from_csv_str(&read()?)?,
            _ => return Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        };

        info!(
            path = %path.display(),
            entities = catalog.len(),
            "Entity definition loaded"
        );
        Ok(catalog)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Entities paired with their ids, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i), e))
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_skips_empty_cells() {
        let catalog = Catalog::from_csv_str("alpha,beta,,gamma\ndelta,\n").unwrap();
        let names: Vec<_> = catalog.entities().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma", "delta"]);
        assert!(catalog.entities().iter().all(|e| e.aliases().is_empty()));
    }

    #[test]
    fn test_csv_keeps_cell_text_verbatim() {
        let catalog = Catalog::from_csv_str("a, b").unwrap();
        assert_eq!(catalog.entities()[1].name, " b");
    }

    #[test]
    fn test_json_array() {
        let catalog =
            Catalog::from_json_str(r#"[{"name": "one"}, {"name": "two", "aliases": []}]"#).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(EntityId(1)).unwrap().name, "two");
        assert!(catalog.get(EntityId(2)).is_none());
    }

    #[test]
    fn test_json_malformed() {
        let result = Catalog::from_json_str(r#"{"name": "not an array"}"#);
        assert!(matches!(result, Err(CatalogError::Json(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = Catalog::load(Path::new("words.txt"));
        assert!(matches!(result, Err(CatalogError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = Catalog::load(Path::new("/nonexistent/words.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_identical_entities_have_distinct_ids() {
        let catalog = Catalog::from_words(["same", "same"]);
        let ids: Vec<_> = catalog.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![EntityId(0), EntityId(1)]);
    }
}
