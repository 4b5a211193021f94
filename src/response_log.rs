//! Append-only CSV persistence of answer records
//!
//! The log file's column layout is fixed at first write: `Timestamp`
//! followed by the first record's question titles in iteration order. Later
//! records are laid out under that header; question titles the header does
//! not know are dropped with a warning, and header columns a record lacks
//! produce empty cells. The file is never rewritten, so a failed pass cannot
//! corrupt rows that were already persisted.

use crate::record::AnswerRecord;
use chrono::Local;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// First column of every response log
pub const TIMESTAMP_COLUMN: &str = "Timestamp";

/// Wall-clock format of the timestamp cell
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors surfaced by [`ResponseLog::append`]; all of them mean the pass's
/// answers were not persisted
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open response log {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read response log header from {path}: {source}")]
    Header { path: PathBuf, source: csv::Error },

    #[error("failed to append to response log {path}: {source}")]
    Write { path: PathBuf, source: csv::Error },
}

/// Append-only CSV log of one row per form-filling pass
#[derive(Debug, Clone)]
pub struct ResponseLog {
    path: PathBuf,
}

impl ResponseLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row: current local timestamp plus the record's answers.
    ///
    /// Creates the file and writes the header on first use. Opens, writes
    /// and closes the file within this call; no handle is held across
    /// passes.
    pub fn append(&self, record: &AnswerRecord) -> Result<(), LogError> {
        let (header, is_new) = match self.existing_header()? {
            Some(header) => {
                self.warn_dropped_keys(record, &header);
                (header, false)
            }
            None => {
                let mut header = Vec::with_capacity(record.len() + 1);
                header.push(TIMESTAMP_COLUMN.to_string());
                header.extend(record.keys().map(String::from));
                (header, true)
            }
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LogError::Open {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            self.write_row(&mut writer, &header)?;
        }

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let mut row = Vec::with_capacity(header.len());
        row.push(timestamp);
        row.extend(
            header
                .iter()
                .skip(1)
                .map(|column| record.get(column).unwrap_or("").to_string()),
        );
        self.write_row(&mut writer, &row)?;

        writer.flush().map_err(|source| LogError::Write {
            path: self.path.clone(),
            source: source.into(),
        })?;

        debug!(path = %self.path.display(), answers = record.len(), "appended response row");
        Ok(())
    }

    /// Reads the header of an existing, non-empty log file.
    fn existing_header(&self) -> Result<Option<Vec<String>>, LogError> {
        let occupied = std::fs::metadata(&self.path)
            .map(|meta| meta.len() > 0)
            .unwrap_or(false);
        if !occupied {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|source| LogError::Header {
                path: self.path.clone(),
                source,
            })?;
        let header = reader
            .headers()
            .map_err(|source| LogError::Header {
                path: self.path.clone(),
                source,
            })?
            .iter()
            .map(String::from)
            .collect();
        Ok(Some(header))
    }

    fn warn_dropped_keys(&self, record: &AnswerRecord, header: &[String]) {
        let dropped: Vec<&str> = record
            .keys()
            .filter(|key| !header.iter().skip(1).any(|column| column == key))
            .collect();
        if !dropped.is_empty() {
            warn!(
                path = %self.path.display(),
                questions = ?dropped,
                "dropping answers for questions not in the log header"
            );
        }
    }

    fn write_row<W: std::io::Write>(
        &self,
        writer: &mut csv::Writer<W>,
        row: &[String],
    ) -> Result<(), LogError> {
        writer.write_record(row).map_err(|source| LogError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
