//! Error types for entity lookup
//!
//! Catalog errors are fatal at load time. Lookup errors are scoped to the
//! call that produced them; the engine never swallows its own failures.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Main error type for building and running the lookup engine
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid match pattern for lookup term '{term}': {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },

    #[error("Matching lookup term '{term}' exceeded the time budget of {budget:?}")]
    MatchTimeout { term: String, budget: Duration },

    #[error("Lookup cancelled")]
    Cancelled,
}

/// Errors raised while loading an entity definition
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read entity definition file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse entity definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported entity definition file type: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;
