//! Error types for the dump loader

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole ingestion pass
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Dump file {}: {source}", .path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn dump(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Dump {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for loader operations
pub type AppResult<T> = Result<T, AppError>;

/// Reasons a single dump line is skipped.
///
/// None of these stop the pass: the line is logged and the next one is read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("no JSON object found in line")]
    NoJsonObject,

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("JSON record is not an object")]
    NotAnObject,

    #[error("record has no usable key")]
    EmptyId,

    #[error("key {key:?} is outside the {namespace} namespace")]
    ForeignKey { key: String, namespace: &'static str },

    #[error("author reference #{index} has no author.key")]
    MalformedAuthorRef { index: usize },

    #[error("cover #{index} is neither a string nor a number")]
    InvalidCover { index: usize },

    #[error("field {field} contains a NUL character")]
    InvalidText { field: &'static str },

    #[error("invalid created date {0:?}")]
    InvalidDate(String),
}

impl RecordError {
    /// Stable short code used in logs and pass reports
    pub fn code(&self) -> &'static str {
        match self {
            RecordError::InvalidUtf8 => "invalid_utf8",
            RecordError::NoJsonObject => "no_json_object",
            RecordError::MalformedJson(_) => "malformed_json",
            RecordError::NotAnObject => "not_an_object",
            RecordError::EmptyId => "empty_id",
            RecordError::ForeignKey { .. } => "foreign_key",
            RecordError::MalformedAuthorRef { .. } => "malformed_author_ref",
            RecordError::InvalidCover { .. } => "invalid_cover",
            RecordError::InvalidText { .. } => "invalid_text",
            RecordError::InvalidDate(_) => "invalid_date",
        }
    }
}
