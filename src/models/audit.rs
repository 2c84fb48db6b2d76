use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used by every audit trail line
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message recorded for a store wipe
pub const RESET_MESSAGE: &str = "Database reset";

const SEPARATOR: &str = " - ";

/// One line of the reset audit trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: NaiveDateTime,
    pub message: String,
}

impl AuditEntry {
    /// Reset record stamped with the current local time
    pub fn reset_now() -> Self {
        Self::reset_at(Local::now().naive_local())
    }

    pub fn reset_at(timestamp: NaiveDateTime) -> Self {
        AuditEntry {
            timestamp,
            message: RESET_MESSAGE.to_string(),
        }
    }

    /// Parse a line previously produced by `Display`
    pub fn parse_line(line: &str) -> Option<Self> {
        let (stamp, message) = line.trim_end().split_once(SEPARATOR)?;
        let timestamp = NaiveDateTime::parse_from_str(stamp, AUDIT_TIMESTAMP_FORMAT).ok()?;
        Some(AuditEntry {
            timestamp,
            message: message.to_string(),
        })
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.timestamp.format(AUDIT_TIMESTAMP_FORMAT),
            SEPARATOR,
            self.message
        )
    }
}
