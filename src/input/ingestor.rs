//! Log ingestion
//!
//! Splits raw log text into lines, classifies each line and appends
//! every resulting event to the event store.

use crate::detection::LineClassifier;
use crate::error::{AnalyzerError, Result};
use crate::models::EventType;
use crate::persistence::EventStore;
use std::path::Path;
use std::sync::Arc;

/// File extensions accepted for uploaded log files
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["txt", "log"];

/// Check whether a path names a `.txt` or `.log` file (case-insensitive)
pub fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ACCEPTED_EXTENSIONS.iter().any(|accepted| ext.eq_ignore_ascii_case(accepted)))
        .unwrap_or(false)
}

/// Split text into lines on LF, CRLF or bare CR boundaries
///
/// A CRLF pair is a single boundary, and a terminator at the end of the
/// text does not start another line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(end) => {
                let line = &rest[..end];
                let width = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[end + width..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// Counts from a single ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub lines: usize,
    pub failed: usize,
    pub accepted: usize,
}

impl IngestStats {
    pub fn events(&self) -> usize {
        self.failed + self.accepted
    }
}

/// Drives the classifier over input text and stores the results
pub struct LogIngestor {
    store: Arc<dyn EventStore>,
    classifier: LineClassifier,
}

impl LogIngestor {
    pub fn new(store: Arc<dyn EventStore>, classifier: LineClassifier) -> Self {
        LogIngestor { store, classifier }
    }

    /// Ingestor using the sshd password-authentication rules
    pub fn ssh(store: Arc<dyn EventStore>) -> Result<Self> {
        Ok(Self::new(store, LineClassifier::ssh()?))
    }

    /// Ingest from in-memory content or a file, returning a status message
    ///
    /// Non-empty `content` takes precedence over `source`. Empty content
    /// counts as absent, and with no file either this is an input error.
    pub fn ingest(&self, source: Option<&Path>, content: Option<&str>) -> Result<String> {
        match (content.filter(|text| !text.is_empty()), source) {
            (Some(text), _) => {
                self.ingest_text_with_stats(text)?;
            }
            (None, Some(path)) => {
                self.ingest_file(path)?;
            }
            (None, None) => {
                return Err(AnalyzerError::Input(
                    "Provide a log file path or log content".to_string(),
                ));
            }
        }

        Ok(format!(
            "Data from logs added into database '{}'.",
            self.store.describe()
        ))
    }

    /// Read a UTF-8 log file and ingest its contents
    pub fn ingest_file(&self, path: &Path) -> Result<IngestStats> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("Read {} bytes from {:?}", text.len(), path);
        self.ingest_text_with_stats(&text)
    }

    /// Ingest in-memory text line by line
    ///
    /// Each event is appended on its own; a storage failure part way
    /// through leaves the events of earlier lines in place.
    pub fn ingest_text_with_stats(&self, text: &str) -> Result<IngestStats> {
        self.store.initialize_schema()?;

        let mut stats = IngestStats::default();
        for line in split_lines(text) {
            stats.lines += 1;
            let Some(event) = self.classifier.classify(line) else {
                continue;
            };

            self.store.append(&event)?;
            match event.event_type {
                EventType::FailedLogin => stats.failed += 1,
                EventType::AcceptedLogin => stats.accepted += 1,
            }
        }

        log::info!(
            "Ingested {} line(s): {} failed, {} accepted login(s)",
            stats.lines,
            stats.failed,
            stats.accepted
        );
        Ok(stats)
    }
}
