//! Facade over ingestion, reporting and reset
//!
//! Callers that share one analyzer across threads must serialize calls
//! themselves; nothing here coordinates concurrent ingest and reset.

use crate::audit::{AuditSink, FileAuditSink, ResetAuditor};
use crate::config::Config;
use crate::error::Result;
use crate::input::LogIngestor;
use crate::models::ThreatSummary;
use crate::persistence::{EventStore, SqliteEventStore};
use crate::report::ReportGenerator;
use std::path::Path;
use std::sync::Arc;

/// The three operations exposed to the command line and other front ends
pub struct LogAnalyzer {
    ingestor: LogIngestor,
    reports: ReportGenerator,
    auditor: ResetAuditor,
}

impl LogAnalyzer {
    /// Wire the components around an explicit store and audit sink
    pub fn new(store: Arc<dyn EventStore>, sink: Arc<dyn AuditSink>, top_ip_limit: usize) -> Result<Self> {
        Ok(LogAnalyzer {
            ingestor: LogIngestor::ssh(store.clone())?,
            reports: ReportGenerator::with_limit(store.clone(), top_ip_limit)?,
            auditor: ResetAuditor::new(store, sink),
        })
    }

    /// SQLite store and file audit trail at the configured locations
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let store = Arc::new(SqliteEventStore::new(&config.storage.database_path)?);
        let sink = Arc::new(FileAuditSink::new(&config.storage.audit_log_path));
        Self::new(store, sink, config.report.top_ip_limit)
    }

    /// Ingest in-memory log text
    pub fn ingest(&self, text: &str) -> Result<String> {
        self.ingestor.ingest(None, Some(text))
    }

    /// Ingest a log file
    pub fn ingest_file(&self, path: &Path) -> Result<String> {
        self.ingestor.ingest(Some(path), None)
    }

    /// Ingest from whichever of `content` or `source` is present
    pub fn ingest_from(&self, source: Option<&Path>, content: Option<&str>) -> Result<String> {
        self.ingestor.ingest(source, content)
    }

    pub fn report(&self) -> Result<ThreatSummary> {
        self.reports.summarize()
    }

    pub fn render_report(&self) -> Result<String> {
        self.reports.render()
    }

    pub fn reset(&self) -> Result<String> {
        self.auditor.reset()
    }
}
