//! Dump record to entity mapping
//!
//! Translates parsed dump objects into `Author` and `WorkDraft` values.
//! Optional fields are read through small accessors so each field states its
//! own default.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::{
    error::RecordError,
    models::{
        author::{Author, AUTHOR_KEY_PREFIX},
        work::{WorkDraft, WORK_KEY_PREFIX},
    },
};

/// Format of `created.value` timestamps (six fractional digits)
pub const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%6f";

/// Map an author record
pub fn map_author(record: &Map<String, Value>) -> Result<Author, RecordError> {
    Ok(Author {
        id: entity_id(record, AUTHOR_KEY_PREFIX)?,
        name: opt_string(record, "name")?,
        personal_name: opt_string(record, "personal_name")?,
    })
}

/// Map a work record; author names are left to the resolver
pub fn map_work(record: &Map<String, Value>) -> Result<WorkDraft, RecordError> {
    let id = entity_id(record, WORK_KEY_PREFIX)?;

    // A description given as a bare string is not the object form and is ignored
    let description = match record.get("description").and_then(Value::as_object) {
        Some(desc) => Some(opt_string(desc, "value")?),
        None => None,
    };

    let published_date = match record.get("created").and_then(Value::as_object) {
        Some(created) => Some(parse_created(&opt_string(created, "value")?)?),
        None => None,
    };

    let cover_ids = match record.get("covers").and_then(Value::as_array) {
        Some(covers) => covers
            .iter()
            .enumerate()
            .map(|(index, cover)| cover_id(cover, index))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    let author_ids = match record.get("authors").and_then(Value::as_array) {
        Some(authors) => authors
            .iter()
            .enumerate()
            .map(|(index, entry)| author_ref(entry, index))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(WorkDraft {
        id,
        name: opt_string(record, "title")?,
        description,
        published_date,
        cover_ids,
        author_ids,
    })
}

/// Parse a `created.value` timestamp down to its calendar date
pub fn parse_created(value: &str) -> Result<NaiveDate, RecordError> {
    NaiveDateTime::parse_from_str(value, CREATED_FORMAT)
        .map(|ts| ts.date())
        .map_err(|_| RecordError::InvalidDate(value.to_string()))
}

/// Strip `prefix` from a key.
///
/// Keys from another namespace and keys that leave nothing after the
/// prefix are rejected.
pub fn strip_namespace(key: &str, prefix: &'static str) -> Result<String, RecordError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(RecordError::EmptyId);
    }
    match key.strip_prefix(prefix) {
        Some("") => Err(RecordError::EmptyId),
        Some(id) => Ok(id.to_string()),
        None => Err(RecordError::ForeignKey {
            key: key.to_string(),
            namespace: prefix,
        }),
    }
}

fn entity_id(record: &Map<String, Value>, prefix: &'static str) -> Result<String, RecordError> {
    strip_namespace(&opt_string(record, "key")?, prefix)
}

/// `{"author": {"key": "/authors/OL1A"}}` -> `OL1A`
///
/// The prefix is dropped when present; a key without it is kept as is.
fn author_ref(entry: &Value, index: usize) -> Result<String, RecordError> {
    let key = entry
        .get("author")
        .and_then(|author| author.get("key"))
        .and_then(Value::as_str)
        .map(str::trim)
        .ok_or(RecordError::MalformedAuthorRef { index })?;
    let id = key.strip_prefix(AUTHOR_KEY_PREFIX).unwrap_or(key);
    if id.is_empty() {
        return Err(RecordError::MalformedAuthorRef { index });
    }
    checked_text("authors", id.to_string())
}

fn cover_id(value: &Value, index: usize) -> Result<String, RecordError> {
    match value {
        Value::String(s) => checked_text("covers", s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(RecordError::InvalidCover { index }),
    }
}

/// Lenient string accessor: absent or null is empty, other scalars use
/// their JSON text
fn opt_string(record: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => checked_text(field, s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}

/// PostgreSQL text columns cannot store NUL characters
fn checked_text(field: &'static str, value: String) -> Result<String, RecordError> {
    if value.contains('\0') {
        return Err(RecordError::InvalidText { field });
    }
    Ok(value)
}
