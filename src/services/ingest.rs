//! Dump ingestion service
//!
//! Runs one pass over a dump file: each line is extracted, parsed, mapped,
//! resolved (works only) and upserted before the next line is read. A bad
//! line is logged and skipped; only dump I/O and store failures end a pass.

use std::path::Path;
use std::sync::Arc;

use crate::{
    dump::{self, DumpLine, DumpReader},
    error::{AppError, AppResult, RecordError},
    models::{Author, EntityKind, IngestReport, LineOutcome, Work, WorkDraft},
    repository::{AuthorStore, WorkStore},
};

use super::resolver::AuthorNameResolver;

/// Characters of an offending line kept in skip logs
const LINE_PREVIEW_CHARS: usize = 200;

#[derive(Clone)]
pub struct IngestService {
    authors: Arc<dyn AuthorStore>,
    works: Arc<dyn WorkStore>,
    resolver: AuthorNameResolver,
    progress_interval: u64,
}

impl IngestService {
    pub fn new(authors: Arc<dyn AuthorStore>, works: Arc<dyn WorkStore>) -> Self {
        Self {
            resolver: AuthorNameResolver::new(authors.clone()),
            authors,
            works,
            progress_interval: 0,
        }
    }

    /// Log progress every `lines` lines (0 disables progress logs)
    pub fn with_progress_interval(mut self, lines: u64) -> Self {
        self.progress_interval = lines;
        self
    }

    /// Load an authors dump
    pub async fn ingest_authors(&self, path: impl AsRef<Path>) -> AppResult<IngestReport> {
        self.run_pass(EntityKind::Author, path.as_ref()).await
    }

    /// Load a works dump, resolving author names against stored authors
    pub async fn ingest_works(&self, path: impl AsRef<Path>) -> AppResult<IngestReport> {
        self.run_pass(EntityKind::Work, path.as_ref()).await
    }

    async fn run_pass(&self, kind: EntityKind, path: &Path) -> AppResult<IngestReport> {
        tracing::info!("Loading {} dump {}", kind, path.display());

        let mut reader = DumpReader::open(path).await?;
        let mut report = IngestReport::new(kind, path);

        while let Some(line) = reader.next_line().await? {
            let outcome = match kind {
                EntityKind::Author => self.load_author_line(&line).await?,
                EntityKind::Work => self.load_work_line(&line).await?,
            };

            if let LineOutcome::Skipped(reason) = &outcome {
                tracing::warn!(
                    line = line.number,
                    reason = reason.code(),
                    "Skipping {} line {}: {} | {}",
                    kind,
                    line.number,
                    reason,
                    line.preview(LINE_PREVIEW_CHARS)
                );
            }
            report.record(&outcome);

            if self.progress_interval > 0 && report.lines % self.progress_interval == 0 {
                tracing::info!(
                    "{} dump: {} lines read, {} persisted, {} skipped",
                    kind,
                    report.lines,
                    report.persisted,
                    report.skipped
                );
            }
        }

        tracing::info!(
            "Finished {} dump {}: {} lines, {} persisted, {} skipped, {} unresolved author references",
            kind,
            reader.path().display(),
            report.lines,
            report.persisted,
            report.skipped,
            report.unresolved_authors
        );
        Ok(report)
    }

    /// Process one authors dump line
    pub async fn load_author_line(&self, line: &DumpLine<'_>) -> AppResult<LineOutcome> {
        let author = match parse_author(line) {
            Ok(author) => author,
            Err(reason) => return Ok(LineOutcome::Skipped(reason)),
        };

        tracing::debug!("Saving author {} ({})", author.name, author.id);
        self.authors.upsert(&author).await?;

        Ok(LineOutcome::Persisted {
            id: author.id,
            unresolved_authors: 0,
        })
    }

    /// Process one works dump line
    pub async fn load_work_line(&self, line: &DumpLine<'_>) -> AppResult<LineOutcome> {
        let draft = match parse_work(line) {
            Ok(draft) => draft,
            Err(reason) => return Ok(LineOutcome::Skipped(reason)),
        };

        let resolved = self.resolver.resolve(&draft.author_ids).await?;
        let work = Work::from_draft(draft, resolved.names).ok_or_else(|| {
            AppError::Internal("resolved author names do not match author ids".to_string())
        })?;

        tracing::debug!("Saving work {} ({})", work.name, work.id);
        self.works.upsert(&work).await?;

        Ok(LineOutcome::Persisted {
            id: work.id,
            unresolved_authors: resolved.unresolved,
        })
    }
}

fn parse_author(line: &DumpLine<'_>) -> Result<Author, RecordError> {
    let record = dump::parse_line(line.text()?)?;
    dump::map_author(&record)
}

fn parse_work(line: &DumpLine<'_>) -> Result<WorkDraft, RecordError> {
    let record = dump::parse_line(line.text()?)?;
    dump::map_work(&record)
}
