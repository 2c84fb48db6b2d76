use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of authentication event recognised in a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    FailedLogin,
    AcceptedLogin,
}

impl EventType {
    pub const ALL: [EventType; 2] = [EventType::FailedLogin, EventType::AcceptedLogin];

    /// Column value used by the event store
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::FailedLogin => "FAILED_LOGIN",
            EventType::AcceptedLogin => "ACCEPTED_LOGIN",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FAILED_LOGIN" => Ok(EventType::FailedLogin),
            "ACCEPTED_LOGIN" => Ok(EventType::AcceptedLogin),
            other => Err(format!("unknown event type: {}", other)),
        }
    }
}

/// Fields extracted from a single matching log line, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedEvent {
    pub event_type: EventType,
    pub user_account: String,
    pub ip_address: String,
    /// Source line with surrounding whitespace trimmed
    pub original_line: String,
}

/// A classified event as persisted in the event store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub id: i64,
    pub event_type: EventType,
    pub user_account: String,
    pub ip_address: String,
    pub original_line: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_column_values() {
        for event_type in EventType::ALL {
            assert_eq!(event_type.as_str().parse::<EventType>().unwrap(), event_type);
        }
        assert!("LOGOUT".parse::<EventType>().is_err());
    }
}
