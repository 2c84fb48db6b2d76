//! Crate-level error type for the three analyzer operations

use crate::persistence::PersistenceError;
use thiserror::Error;

/// Errors surfaced by ingestion, reporting and reset
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Input error: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] PersistenceError),

    /// The store was wiped but the audit trail could not record it
    #[error("Store reset but audit entry was not written: {0}")]
    Audit(std::io::Error),

    #[error("Invalid classification pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
