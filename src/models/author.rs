//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Namespace prefix of author keys in the dumps
pub const AUTHOR_KEY_PREFIX: &str = "/authors/";

/// Author as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    /// Open Library id without namespace (e.g. `OL23919A`)
    pub id: String,
    pub name: String,
    pub personal_name: String,
}
