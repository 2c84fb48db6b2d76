//! Persistence module for classified events
//!
//! This module provides durable storage for login events and the
//! aggregation queries that reports are built from.

pub mod sqlite_store;

pub use sqlite_store::SqliteEventStore;

use crate::models::{ClassifiedEvent, EventType, IpCount, LogEvent};
use std::collections::HashMap;
use thiserror::Error;

/// Number of addresses returned by a default top-attacker query
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Errors that can occur during persistence operations
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid data in database: {0}")]
    InvalidData(String),
}

/// Trait for event storage backends
///
/// Events are append-only: they are never updated, only appended one
/// at a time or deleted in bulk by `reset`.
pub trait EventStore: Send + Sync {
    /// Create the schema if it is absent. Safe to call before every operation.
    fn initialize_schema(&self) -> Result<(), PersistenceError>;

    /// Persist an event, returning the id assigned to it
    fn append(&self, event: &ClassifiedEvent) -> Result<i64, PersistenceError>;

    /// Event counts per type. Types with no events are absent from the map.
    fn count_by_type(&self) -> Result<HashMap<EventType, u64>, PersistenceError>;

    /// Addresses with the most failed logins, strictly by descending count
    fn top_failed_ips(&self, limit: usize) -> Result<Vec<IpCount>, PersistenceError>;

    /// All stored events in id order
    fn events(&self) -> Result<Vec<LogEvent>, PersistenceError>;

    /// Delete every event, keeping the schema
    fn reset(&self) -> Result<(), PersistenceError>;

    /// Human-readable location of the store
    fn describe(&self) -> String;
}
