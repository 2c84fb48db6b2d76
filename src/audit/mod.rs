//! Reset auditing
//!
//! Wiping the event store removes every trace of what was ingested, so
//! each reset is recorded in an append-only trail kept outside the store.

pub mod file_sink;
pub mod memory_sink;

pub use file_sink::FileAuditSink;
pub use memory_sink::MemoryAuditSink;

use crate::error::{AnalyzerError, Result};
use crate::models::AuditEntry;
use crate::persistence::EventStore;
use std::io;
use std::sync::Arc;

/// Append-only destination for audit entries
pub trait AuditSink: Send + Sync {
    /// Append one entry to the trail
    fn append(&self, entry: &AuditEntry) -> io::Result<()>;

    /// Human-readable location of the trail
    fn describe(&self) -> String;
}

/// Clears the event store and records the reset
pub struct ResetAuditor {
    store: Arc<dyn EventStore>,
    sink: Arc<dyn AuditSink>,
}

impl ResetAuditor {
    pub fn new(store: Arc<dyn EventStore>, sink: Arc<dyn AuditSink>) -> Self {
        ResetAuditor { store, sink }
    }

    /// Delete all events, then append a timestamped entry to the trail
    ///
    /// A failed audit write after a successful wipe is returned as
    /// `AnalyzerError::Audit`; the wipe is not undone.
    pub fn reset(&self) -> Result<String> {
        self.store.reset()?;

        let entry = AuditEntry::reset_now();
        self.sink.append(&entry).map_err(AnalyzerError::Audit)?;
        log::info!("Event store {} reset at {}", self.store.describe(), entry.timestamp);

        Ok(format!(
            "Database has been reset. Reset logged in '{}'.",
            self.sink.describe()
        ))
    }
}
