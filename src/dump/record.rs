//! Record extraction: isolate and parse the JSON payload of a dump line.
//!
//! Dump lines carry tab-separated metadata columns (type, key, revision,
//! last modified) before the JSON object.

use serde_json::{Map, Value};

use crate::error::RecordError;

/// Return the JSON text of a line, starting at its first `{`
pub fn extract_json(line: &str) -> Result<&str, RecordError> {
    line.find('{')
        .map(|start| &line[start..])
        .ok_or(RecordError::NoJsonObject)
}

/// Parse extracted JSON text into an object
pub fn parse_object(json: &str) -> Result<Map<String, Value>, RecordError> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(RecordError::NotAnObject),
        Err(e) => Err(RecordError::MalformedJson(e.to_string())),
    }
}

/// Extract then parse a whole dump line
pub fn parse_line(line: &str) -> Result<Map<String, Value>, RecordError> {
    parse_object(extract_json(line)?)
}
