//! Work (book) model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Namespace prefix of work keys in the dumps
pub const WORK_KEY_PREFIX: &str = "/works/";

/// Display name used when an author reference cannot be resolved
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Work mapped from a dump line whose author references are not resolved yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDraft {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_ids: Vec<String>,
    pub author_ids: Vec<String>,
}

/// Work as persisted.
///
/// `author_names[i]` is the display name of `author_ids[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Work {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_ids: Vec<String>,
    pub author_ids: Vec<String>,
    pub author_names: Vec<String>,
}

impl Work {
    /// Complete a draft with one resolved name per author id.
    ///
    /// Returns `None` if the name list is not aligned with the draft's ids.
    pub fn from_draft(draft: WorkDraft, author_names: Vec<String>) -> Option<Self> {
        if author_names.len() != draft.author_ids.len() {
            return None;
        }
        Some(Self {
            id: draft.id,
            name: draft.name,
            description: draft.description,
            published_date: draft.published_date,
            cover_ids: draft.cover_ids,
            author_ids: draft.author_ids,
            author_names,
        })
    }
}
