//! Data models for the loader

pub mod author;
pub mod ingest_report;
pub mod work;

// Re-export commonly used types
pub use author::Author;
pub use ingest_report::{EntityKind, IngestReport, LineOutcome};
pub use work::{Work, WorkDraft, UNKNOWN_AUTHOR};
