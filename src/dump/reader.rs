//! Line reader for dump files
//!
//! Streams a dump one line at a time; the file is never loaded whole.

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::error::{AppError, AppResult, RecordError};

/// One raw line of a dump, without its terminator
#[derive(Debug)]
pub struct DumpLine<'a> {
    /// 1-based position in the file
    pub number: u64,
    pub bytes: &'a [u8],
}

impl<'a> DumpLine<'a> {
    pub fn text(&self) -> Result<&'a str, RecordError> {
        std::str::from_utf8(self.bytes).map_err(|_| RecordError::InvalidUtf8)
    }

    /// Lossy, length-capped rendering for log output
    pub fn preview(&self, max_chars: usize) -> String {
        let text = String::from_utf8_lossy(self.bytes);
        if text.chars().count() <= max_chars {
            return text.into_owned();
        }
        let mut preview: String = text.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

/// Sequential reader over a dump file.
///
/// Owns the file handle; it is closed when the reader is dropped. Opening the
/// same path again starts over from the first line.
pub struct DumpReader {
    path: PathBuf,
    reader: BufReader<File>,
    buf: Vec<u8>,
    line_number: u64,
}

impl DumpReader {
    /// Open a dump file
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .await
            .map_err(|e| AppError::dump(&path, e))?;

        Ok(Self {
            path,
            reader: BufReader::new(file),
            buf: Vec::with_capacity(8 * 1024),
            line_number: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the next line, or `None` at end of file
    pub async fn next_line(&mut self) -> AppResult<Option<DumpLine<'_>>> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .await
            .map_err(|e| AppError::dump(&self.path, e))?;
        if read == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }
        self.line_number += 1;

        Ok(Some(DumpLine {
            number: self.line_number,
            bytes: &self.buf,
        }))
    }
}
