//! Threat report generation
//!
//! Builds the login summary from the event store and renders it in the
//! fixed plain-text layout.

use crate::error::{AnalyzerError, Result};
use crate::models::{EventType, ThreatSummary};
use crate::persistence::{EventStore, DEFAULT_TOP_LIMIT};
use std::sync::Arc;

const RULE_WIDTH: usize = 40;

/// Read-only view producing summaries over an event store
pub struct ReportGenerator {
    store: Arc<dyn EventStore>,
    top_limit: usize,
}

impl ReportGenerator {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        ReportGenerator {
            store,
            top_limit: DEFAULT_TOP_LIMIT,
        }
    }

    /// Generator ranking at most `top_limit` attacking addresses
    ///
    /// The report layout is fixed to a top-5 ranking, so limits outside
    /// `1..=5` are rejected.
    pub fn with_limit(store: Arc<dyn EventStore>, top_limit: usize) -> Result<Self> {
        check_top_limit(top_limit)?;
        Ok(ReportGenerator { store, top_limit })
    }

    /// Login totals and top attacking addresses; zero when a type has no events
    pub fn summarize(&self) -> Result<ThreatSummary> {
        let counts = self.store.count_by_type()?;
        let top_ips = self.store.top_failed_ips(self.top_limit)?;

        Ok(ThreatSummary {
            accepted_count: counts.get(&EventType::AcceptedLogin).copied().unwrap_or(0),
            failed_count: counts.get(&EventType::FailedLogin).copied().unwrap_or(0),
            top_ips,
        })
    }

    /// Summary rendered as the plain-text report
    pub fn render(&self) -> Result<String> {
        Ok(render_summary(&self.summarize()?))
    }
}

/// Validate a top-attacker ranking size
pub fn check_top_limit(top_limit: usize) -> Result<()> {
    if top_limit == 0 || top_limit > DEFAULT_TOP_LIMIT {
        return Err(AnalyzerError::Config(format!(
            "top_ip_limit must be between 1 and {}, got {}",
            DEFAULT_TOP_LIMIT, top_limit
        )));
    }
    Ok(())
}

/// Render a summary in the fixed report layout
pub fn render_summary(summary: &ThreatSummary) -> String {
    let rule = "=".repeat(RULE_WIDTH);

    let mut report = format!("\n{}\n        LOG ANALYSIS REPORT\n{}\n", rule, rule);
    report.push_str(&format!("Number of successful logins: {}\n", summary.accepted_count));
    report.push_str(&format!("Number of failed login attempts: {}\n\n", summary.failed_count));
    report.push_str("Top 5 attacking IP addresses:\n");

    if summary.top_ips.is_empty() {
        report.push_str(" - No failed login attempts recorded.\n");
    }
    for entry in &summary.top_ips {
        let label = if entry.count == 1 { "attempt" } else { "attempts" };
        report.push_str(&format!(" - {}: {} {}\n", entry.ip, entry.count, label));
    }

    report.push_str(&rule);
    report.push('\n');
    report
}
