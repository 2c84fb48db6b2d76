use serde::{Deserialize, Serialize};

/// Number of failed logins attributed to one source address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpCount {
    pub ip: String,
    pub count: u64,
}

/// Aggregate view over the event store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatSummary {
    pub accepted_count: u64,
    pub failed_count: u64,
    /// Ordered by descending count, ties broken by ascending address
    pub top_ips: Vec<IpCount>,
}
