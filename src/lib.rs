pub mod analyzer;
pub mod audit;
pub mod config;
pub mod detection;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod persistence;
pub mod report;

// Re-export commonly used types
pub use analyzer::LogAnalyzer;
pub use audit::{AuditSink, FileAuditSink, MemoryAuditSink, ResetAuditor};
pub use detection::{ClassificationRule, LineClassifier};
pub use error::{AnalyzerError, Result};
pub use input::LogIngestor;
pub use models::{AuditEntry, EventType, IpCount, LogEvent, ThreatSummary};
pub use persistence::{EventStore, PersistenceError, SqliteEventStore};
pub use report::ReportGenerator;
