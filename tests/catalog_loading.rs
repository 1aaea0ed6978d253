//! Integration tests for definition files and configuration
//!
//! Tests verify:
//! 1. JSON and CSV definitions load from disk and drive lookups
//! 2. Definition paths resolve against the configured root
//! 3. Unsupported, missing and malformed files fail at load time

use std::fs;
use std::path::PathBuf;

use entity_lookup::{CatalogError, EntityLookup, LookupConfig, LookupError};
use tempfile::TempDir;

fn config_for(dir: &TempDir, file: &str) -> LookupConfig {
    LookupConfig {
        definition_location: PathBuf::from(file),
        definition_root: Some(dir.path().to_path_buf()),
        ..Default::default()
    }
}

#[test]
fn test_json_definition_from_root() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("words.json"),
        r#"[
            {
                "name": "Microsoft",
                "description": "Software company",
                "type": "Organization",
                "id": "org-1",
                "fuzzyEditDistance": 1,
                "aliases": [{"text": "MSFT", "caseSensitive": true, "fuzzyEditDistance": 0}]
            },
            {"name": "Contoso", "defaultCaseSensitive": true}
        ]"#,
    )
    .unwrap();

    let engine = EntityLookup::from_config(&config_for(&dir, "words.json")).unwrap();
    assert_eq!(engine.catalog().len(), 2);
    assert_eq!(engine.selections().len(), 3);

    let found = engine
        .lookup("Microsfot and MSFT, not contoso")
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description.as_deref(), Some("Software company"));

    let texts: Vec<_> = found[0].matches.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["MSFT", "Microsfot"]);
}

#[test]
fn test_csv_definition() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.CSV"), "alpha,beta\ngamma,\n").unwrap();

    let engine = EntityLookup::from_config(&config_for(&dir, "words.CSV")).unwrap();
    assert_eq!(engine.catalog().len(), 3);

    let found = engine.lookup("ALPHA then gamma").unwrap();
    let names: Vec<_> = found.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "gamma"]);
}

#[test]
fn test_config_defaults_reach_csv_entities() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.csv"), "hello").unwrap();

    let mut config = config_for(&dir, "words.csv");
    config.defaults.fuzzy_edit_distance = 1;

    let engine = EntityLookup::from_config(&config).unwrap();
    let found = engine.lookup("helo world").unwrap();
    assert_eq!(found[0].matches[0].match_distance, 1.0);
}

#[test]
fn test_yaml_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.csv"), "fox").unwrap();
    let yaml = format!(
        "definition_location: words.csv\ndefinition_root: {}\nmax_matches_per_call: 1\n",
        dir.path().display()
    );
    let config_path = dir.path().join("entity_lookup.yaml");
    fs::write(&config_path, yaml).unwrap();

    let config = LookupConfig::from_file(&config_path).unwrap();
    let engine = EntityLookup::from_config(&config).unwrap();
    let found = engine.lookup("fox fox").unwrap();
    assert_eq!(found[0].matches.len(), 1);
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.txt"), "alpha").unwrap();

    let result = EntityLookup::from_config(&config_for(&dir, "words.txt"));
    assert!(matches!(
        result,
        Err(LookupError::Catalog(CatalogError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_missing_definition_file() {
    let dir = TempDir::new().unwrap();
    let result = EntityLookup::from_config(&config_for(&dir, "words.json"));
    assert!(matches!(
        result,
        Err(LookupError::Catalog(CatalogError::Io { .. }))
    ));
}

#[test]
fn test_malformed_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("words.json"), r#"[{"description": "no name"}]"#).unwrap();

    let result = EntityLookup::from_config(&config_for(&dir, "words.json"));
    assert!(matches!(
        result,
        Err(LookupError::Catalog(CatalogError::Json(_)))
    ));
}
