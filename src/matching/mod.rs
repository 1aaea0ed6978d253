//! Matching primitives
//!
//! - `normalize`: character classes and text normalization
//! - `selection`: expansion of entities and aliases into matchable literals
//! - `exact`: word-boundary pattern matching for zero-tolerance literals
//! - `tokenizer`: candidate windows for the fuzzy pass
//! - `fuzzy`: accent-aware Damerau-Levenshtein matching

pub mod exact;
pub mod fuzzy;
pub mod normalize;
pub mod selection;
pub mod tokenizer;

pub use fuzzy::damerau_levenshtein;
pub use normalize::{is_accent, is_delineating, normalize};
pub use selection::Selection;
