//! Entity Lookup - exact and fuzzy custom entity search
//!
//! Given a catalog of named entities (each with optional aliases and its own
//! case, accent and edit-distance settings), finds every occurrence of those
//! entities in a block of text and reports offset, length and match distance
//! grouped by entity.
//!
//! # Architecture
//!
//! ```text
//! Catalog (JSON / CSV)
//!     │
//!     ▼
//! Selection expansion (once) ──► ExactMatcher patterns + FuzzyMatcher terms
//!     │
//!     ▼ per call
//! trim ─► exact pass ─► tokenizer ─► fuzzy pass ─► Aggregator ─► FoundEntity list
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use entity_lookup::{Catalog, EntityLookup, LookupConfig};
//!
//! let config = LookupConfig::from_file("config/entity_lookup.yaml".as_ref())?;
//! let engine = EntityLookup::from_config(&config)?;
//! let found = engine.lookup("Contoso signed with Microsoft")?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod lookup;
pub mod matching;
pub mod skill;

// Re-export main types
pub use catalog::{Alias, Catalog, Entity, EntityId};
pub use config::{LookupConfig, MatchDefaults};
pub use error::{CatalogError, ConfigError, LookupError, Result};
pub use lookup::{
    find_entities, CancellationFlag, EntityLookup, FoundEntity, LookupReport, MatchDetail,
};
pub use skill::{process_request, SkillRequest, SkillResponse};
