//! Lookup configuration
//!
//! Loads engine settings from YAML or environment variables. Every field has
//! a default, so an empty YAML document is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Process-wide fallbacks for settings an entity or alias leaves unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchDefaults {
    pub case_sensitive: bool,
    pub accent_sensitive: bool,
    pub fuzzy_edit_distance: i32,
}

impl Default for MatchDefaults {
    fn default() -> Self {
        Self {
            case_sensitive: false,   // case insensitive
            accent_sensitive: false, // ignore accent differences
            fuzzy_edit_distance: 0,  // exact matches only
        }
    }
}

/// Configuration for the lookup engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Entity definition file name (`.json` or `.csv`)
    pub definition_location: PathBuf,
    /// Directory the definition file is resolved against
    pub definition_root: Option<PathBuf>,
    /// Fallbacks for unset entity/alias settings
    pub defaults: MatchDefaults,
    /// Time budget for evaluating one exact-match pattern
    pub regex_time_budget_secs: u64,
    /// Largest number of words in one fuzzy candidate window
    pub max_words_per_candidate: usize,
    /// Stop recording matches after this many in a single call
    pub max_matches_per_call: Option<usize>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            definition_location: PathBuf::from("words.csv"),
            definition_root: None,
            defaults: MatchDefaults::default(),
            regex_time_budget_secs: 30,
            max_words_per_candidate: 5,
            max_matches_per_call: None,
        }
    }
}

impl LookupConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: LookupConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            definition_location: std::env::var("ENTITY_LOOKUP_DEFINITIONS")
                .map(PathBuf::from)
                .unwrap_or(base.definition_location),
            definition_root: std::env::var("ENTITY_LOOKUP_ROOT").ok().map(PathBuf::from),
            defaults: MatchDefaults {
                case_sensitive: env_parse("ENTITY_LOOKUP_DEFAULT_CASE_SENSITIVE")
                    .unwrap_or(base.defaults.case_sensitive),
                accent_sensitive: env_parse("ENTITY_LOOKUP_DEFAULT_ACCENT_SENSITIVE")
                    .unwrap_or(base.defaults.accent_sensitive),
                fuzzy_edit_distance: env_parse("ENTITY_LOOKUP_DEFAULT_FUZZY_EDIT_DISTANCE")
                    .unwrap_or(base.defaults.fuzzy_edit_distance),
            },
            regex_time_budget_secs: env_parse("ENTITY_LOOKUP_REGEX_BUDGET_SECS")
                .unwrap_or(base.regex_time_budget_secs),
            max_words_per_candidate: base.max_words_per_candidate,
            max_matches_per_call: env_parse("ENTITY_LOOKUP_MAX_MATCHES"),
        }
    }

    /// Definition file path with the root applied
    pub fn resolved_definition_path(&self) -> PathBuf {
        match &self.definition_root {
            Some(root) => root.join(&self.definition_location),
            None => self.definition_location.clone(),
        }
    }

    pub fn regex_time_budget(&self) -> Duration {
        Duration::from_secs(self.regex_time_budget_secs)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
