//! Ingestion services

pub mod ingest;
pub mod resolver;

pub use ingest::IngestService;
pub use resolver::{AuthorNameResolver, ResolvedNames};
