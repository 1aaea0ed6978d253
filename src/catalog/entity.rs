//! Entity and alias definitions
//!
//! Settings are kept as `Option` exactly as they were supplied; resolution
//! against entity-level and process-wide defaults happens when selections
//! are expanded.

use serde::{Deserialize, Serialize};

use crate::config::MatchDefaults;

/// A named target the engine searches for.
///
/// Deliberately not `PartialEq`: two entities with identical fields are still
/// distinct targets, identified by their position in the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_edit_distance: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_case_sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_accent_sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_fuzzy_edit_distance: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<Alias>>,
}

/// An alternate literal form of an entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_sensitive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_edit_distance: Option<i32>,
}

/// Fully resolved match settings for one literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub case_sensitive: bool,
    pub accent_sensitive: bool,
    pub fuzzy_edit_distance: i32,
}

impl Entity {
    /// Entity with only a name; every setting falls back to process defaults
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = Some(value);
        self
    }

    pub fn with_accent_sensitive(mut self, value: bool) -> Self {
        self.accent_sensitive = Some(value);
        self
    }

    pub fn with_fuzzy_edit_distance(mut self, value: i32) -> Self {
        self.fuzzy_edit_distance = Some(value);
        self
    }

    pub fn with_alias(mut self, alias: Alias) -> Self {
        self.aliases.get_or_insert_with(Vec::new).push(alias);
        self
    }

    pub fn aliases(&self) -> &[Alias] {
        self.aliases.as_deref().unwrap_or(&[])
    }

    /// Settings for the entity's own name.
    ///
    /// Resolution order: own value, then the entity's `default*` value, then
    /// the process-wide default.
    pub fn resolved_settings(&self, defaults: &MatchDefaults) -> ResolvedSettings {
        ResolvedSettings {
            case_sensitive: self
                .case_sensitive
                .or(self.default_case_sensitive)
                .unwrap_or(defaults.case_sensitive),
            accent_sensitive: self
                .accent_sensitive
                .or(self.default_accent_sensitive)
                .unwrap_or(defaults.accent_sensitive),
            fuzzy_edit_distance: self
                .fuzzy_edit_distance
                .or(self.default_fuzzy_edit_distance)
                .unwrap_or(defaults.fuzzy_edit_distance),
        }
    }

    /// Settings for one of this entity's aliases, same resolution order as
    /// [`Entity::resolved_settings`] with the alias's value first.
    pub fn resolved_alias_settings(
        &self,
        alias: &Alias,
        defaults: &MatchDefaults,
    ) -> ResolvedSettings {
        ResolvedSettings {
            case_sensitive: alias
                .case_sensitive
                .or(self.default_case_sensitive)
                .unwrap_or(defaults.case_sensitive),
            accent_sensitive: alias
                .accent_sensitive
                .or(self.default_accent_sensitive)
                .unwrap_or(defaults.accent_sensitive),
            fuzzy_edit_distance: alias
                .fuzzy_edit_distance
                .or(self.default_fuzzy_edit_distance)
                .unwrap_or(defaults.fuzzy_edit_distance),
        }
    }
}

impl Alias {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_case_sensitive(mut self, value: bool) -> Self {
        self.case_sensitive = Some(value);
        self
    }

    pub fn with_accent_sensitive(mut self, value: bool) -> Self {
        self.accent_sensitive = Some(value);
        self
    }

    pub fn with_fuzzy_edit_distance(mut self, value: i32) -> Self {
        self.fuzzy_edit_distance = Some(value);
        self
    }
}
