//! Line classification for SSH authentication logs
//!
//! Each log line is checked against an ordered list of rules. The first
//! rule whose pattern matches decides the event type; lines matching no
//! rule are ignored.

use regex::Regex;
use crate::models::{ClassifiedEvent, EventType};

/// IP literal: a dotted quad, or failing that any run of hex digits and colons
const IP_PATTERN: &str = r"(?P<ip>\d{1,3}(?:\.\d{1,3}){3}|[a-fA-F0-9:]+)";

/// A pattern paired with the event type it produces
///
/// Patterns must define the named groups `user` and `ip`.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pattern: Regex,
    event_type: EventType,
}

impl ClassificationRule {
    pub fn new(pattern: &str, event_type: EventType) -> Result<Self, regex::Error> {
        Ok(ClassificationRule {
            pattern: Regex::new(pattern)?,
            event_type,
        })
    }

    fn apply(&self, line: &str) -> Option<ClassifiedEvent> {
        let caps = self.pattern.captures(line)?;
        Some(ClassifiedEvent {
            event_type: self.event_type,
            user_account: caps.name("user")?.as_str().to_string(),
            ip_address: caps.name("ip")?.as_str().to_string(),
            original_line: line.trim().to_string(),
        })
    }
}

/// Maps single log lines to at most one classified event
#[derive(Debug, Clone)]
pub struct LineClassifier {
    rules: Vec<ClassificationRule>,
}

impl LineClassifier {
    /// Classifier for sshd password authentication
    ///
    /// Failed logins are checked before accepted ones, so a line matching
    /// both is always a failed login. The `invalid user` marker is
    /// consumed but never becomes part of the username.
    pub fn ssh() -> Result<Self, regex::Error> {
        let failed = format!(r"Failed password for (?:invalid user\s+)?(?P<user>\S+) from {}", IP_PATTERN);
        let accepted = format!(r"Accepted password for (?P<user>\S+) from {}", IP_PATTERN);

        Ok(Self::with_rules(vec![
            ClassificationRule::new(&failed, EventType::FailedLogin)?,
            ClassificationRule::new(&accepted, EventType::AcceptedLogin)?,
        ]))
    }

    /// Classifier evaluating `rules` in the given order
    pub fn with_rules(rules: Vec<ClassificationRule>) -> Self {
        LineClassifier { rules }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Classify one line; `None` means the line is not security relevant
    pub fn classify(&self, line: &str) -> Option<ClassifiedEvent> {
        self.rules.iter().find_map(|rule| rule.apply(line))
    }
}
