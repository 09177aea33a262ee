//! Per-line outcomes and pass reports for dump ingestion.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::RecordError;

/// Entity kind loaded by a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Work,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Author => f.write_str("author"),
            EntityKind::Work => f.write_str("work"),
        }
    }
}

/// Terminal state of one dump line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Persisted {
        id: String,
        /// Author references that fell back to the unknown-author name
        unresolved_authors: usize,
    },
    Skipped(RecordError),
}

/// Summary of one ingestion pass.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub kind: EntityKind,
    pub path: PathBuf,
    pub lines: u64,
    pub persisted: u64,
    pub skipped: u64,
    /// Skipped lines grouped by `RecordError::code`
    pub skipped_by_reason: BTreeMap<&'static str, u64>,
    pub unresolved_authors: u64,
}

impl IngestReport {
    pub fn new(kind: EntityKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            lines: 0,
            persisted: 0,
            skipped: 0,
            skipped_by_reason: BTreeMap::new(),
            unresolved_authors: 0,
        }
    }

    /// Account for one processed line
    pub fn record(&mut self, outcome: &LineOutcome) {
        self.lines += 1;
        match outcome {
            LineOutcome::Persisted {
                unresolved_authors, ..
            } => {
                self.persisted += 1;
                self.unresolved_authors += *unresolved_authors as u64;
            }
            LineOutcome::Skipped(reason) => {
                self.skipped += 1;
                *self.skipped_by_reason.entry(reason.code()).or_insert(0) += 1;
            }
        }
    }
}
