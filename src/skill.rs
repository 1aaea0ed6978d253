//! Batch record dispatcher
//!
//! Runs one lookup per record of a `{"values": [{"recordId", "data"}]}`
//! request. Each record succeeds or fails on its own; a failed record carries
//! an error message and no entities.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::lookup::{CancellationFlag, EntityLookup};

pub const MISSING_TEXT_ERROR: &str =
    "Cannot process record without the given key 'text' with a string value";
pub const MATCH_CAPACITY_WARNING: &str =
    "Reached maximum capacity for matches, skipping all further matches.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillRequest {
    #[serde(default)]
    pub values: Vec<RequestRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    pub record_id: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillResponse {
    pub values: Vec<ResponseRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub record_id: String,
    pub data: Map<String, Value>,
    pub errors: Vec<Message>,
    pub warnings: Vec<Message>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Process every record in request order
pub fn process_request(
    engine: &EntityLookup,
    request: &SkillRequest,
    cancel: &CancellationFlag,
) -> SkillResponse {
    SkillResponse {
        values: request
            .values
            .iter()
            .map(|record| process_record(engine, record, cancel))
            .collect(),
    }
}

fn process_record(
    engine: &EntityLookup,
    record: &RequestRecord,
    cancel: &CancellationFlag,
) -> ResponseRecord {
    let mut out = ResponseRecord {
        record_id: record.record_id.clone(),
        ..Default::default()
    };

    let Some(text) = record.data.get("text").and_then(Value::as_str) else {
        out.errors.push(Message::new(MISSING_TEXT_ERROR));
        return out;
    };

    let report = match engine.lookup_with_cancel(text, cancel) {
        Ok(report) => report,
        Err(e) => {
            warn!(record_id = %record.record_id, error = %e, "Lookup failed for record");
            out.errors.push(search_error(e));
            return out;
        }
    };

    if report.truncated {
        out.warnings.push(Message::new(MATCH_CAPACITY_WARNING));
    }

    match serde_json::to_value(&report.entities) {
        Ok(entities) => {
            out.data.insert("entities".to_string(), entities);
        }
        Err(e) => out.errors.push(search_error(e)),
    }

    out
}

fn search_error(e: impl std::fmt::Display) -> Message {
    Message::new(format!(
        "An error occurred while trying to find matches in your document: {}",
        e
    ))
}
