use crate::error::{AnalyzerError, Result};
use crate::models::ThreatSummary;
use crate::report::render_summary;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Output handler for threat summaries
pub struct OutputHandler {
    format: OutputFormat,
    writer: Option<Box<dyn Write + Send>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Fixed plain-text report
    Text,
    /// Pretty-printed JSON summary
    Json,
}

impl FromStr for OutputFormat {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AnalyzerError::Config(format!(
                "Unknown output format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

impl OutputHandler {
    /// Create a handler appending to `file_path`, or writing to stdout when `None`
    pub fn new(format: OutputFormat, file_path: Option<PathBuf>) -> Result<Self> {
        let writer: Option<Box<dyn Write + Send>> = match file_path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                Some(Box::new(BufWriter::new(file)))
            }
            None => None,
        };

        Ok(OutputHandler { format, writer })
    }

    /// Write a summary in the configured format
    pub fn write_summary(&mut self, summary: &ThreatSummary) -> Result<()> {
        let output = match self.format {
            OutputFormat::Text => render_summary(summary),
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(summary)?),
        };
        self.write_output(&output)
    }

    fn write_output(&mut self, data: &str) -> Result<()> {
        match &mut self.writer {
            Some(writer) => {
                writer.write_all(data.as_bytes())?;
                writer.flush()?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(data.as_bytes())?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IpCount;
    use tempfile::TempDir;

    fn summary() -> ThreatSummary {
        ThreatSummary {
            accepted_count: 1,
            failed_count: 2,
            top_ips: vec![IpCount { ip: "10.0.0.5".to_string(), count: 2 }],
        }
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!(matches!("yaml".parse::<OutputFormat>(), Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn test_json_failure_is_serialization_error() {
        let err: AnalyzerError = serde_json::from_str::<ThreatSummary>("{").unwrap_err().into();
        assert!(matches!(err, AnalyzerError::Serialization(_)));
    }

    #[test]
    fn test_write_json_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");

        let mut handler = OutputHandler::new(OutputFormat::Json, Some(path.clone())).unwrap();
        handler.write_summary(&summary()).unwrap();
        drop(handler);

        let written = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["accepted_count"], 1);
        assert_eq!(value["failed_count"], 2);
        assert_eq!(value["top_ips"][0]["ip"], "10.0.0.5");
        assert_eq!(value["top_ips"][0]["count"], 2);
    }

    #[test]
    fn test_write_text_summary() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        let mut handler = OutputHandler::new(OutputFormat::Text, Some(path.clone())).unwrap();
        handler.write_summary(&summary()).unwrap();
        drop(handler);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains(" - 10.0.0.5: 2 attempts\n"));
    }
}
