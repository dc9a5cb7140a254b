//! Audit log: one CSV row per processed URL
//!
//! The audit file lives for exactly one pipeline run: it is created fresh
//! (truncating any previous run's file), receives a `URL,Message` header row
//! and then exactly one data row per input URL, in input order, and is flushed
//! and closed when the run ends. Fields containing a comma, double quote, or
//! line break are quoted; embedded quotes are doubled.

use crate::error::{Error, Result};
use crate::types::AuditRecord;
use std::borrow::Cow;
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Append-only CSV writer for one pipeline run's audit records
#[derive(Debug)]
pub struct AuditLog {
    writer: BufWriter<tokio::fs::File>,
    rows: usize,
}

impl AuditLog {
    /// Create (or truncate) the audit file at `path` and write the header row
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be created or the header
    /// cannot be written. This aborts the run: without an audit log the
    /// pipeline cannot honor its one-row-per-URL guarantee.
    pub async fn create(path: &Path) -> Result<Self> {
        let file = tokio::fs::File::create(path).await.map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create audit log '{}': {}", path.display(), e),
            ))
        })?;
        let mut writer = BufWriter::new(file);
        writer.write_all(b"URL,Message\n").await?;
        Ok(Self { writer, rows: 0 })
    }

    /// Append one record as a data row
    pub async fn append(&mut self, record: &AuditRecord) -> Result<()> {
        let row = format!(
            "{},{}\n",
            escape_field(&record.url),
            escape_field(&record.message)
        );
        self.writer.write_all(row.as_bytes()).await?;
        self.rows += 1;
        Ok(())
    }

    /// Number of data rows written so far (excludes the header)
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and close the log, returning the number of data rows written
    pub async fn finish(mut self) -> Result<usize> {
        self.writer.flush().await?;
        Ok(self.rows)
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or line break
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
