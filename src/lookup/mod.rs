//! Entity lookup engine
//!
//! Entry point for callers: build an [`EntityLookup`] once from a catalog and
//! call [`EntityLookup::lookup`] per document.

pub mod results;
pub mod service;

pub use results::{FoundEntity, LookupReport, MatchDetail};
pub use service::{find_entities, CancellationFlag, EntityLookup};
