pub mod audit;
pub mod event;
pub mod report;

pub use audit::AuditEntry;
pub use event::{ClassifiedEvent, EventType, LogEvent};
pub use report::{IpCount, ThreatSummary};
