use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};

/// Configuration for the log analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Storage locations
    pub storage: StorageConfig,
    /// Report configuration
    pub report: ReportConfig,
}

/// Storage locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite database holding classified events
    pub database_path: PathBuf,
    /// Plain text trail of store resets
    pub audit_log_path: PathBuf,
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of attacking IP addresses to rank
    pub top_ip_limit: usize,
    /// Output format: "text" or "json"
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: StorageConfig {
                database_path: PathBuf::from("log_database.db"),
                audit_log_path: PathBuf::from("reset_log.txt"),
            },
            report: ReportConfig {
                top_ip_limit: crate::persistence::DEFAULT_TOP_LIMIT,
                format: "text".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| AnalyzerError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AnalyzerError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Reject values the analyzer cannot honour
    pub fn validate(&self) -> Result<()> {
        crate::report::check_top_limit(self.report.top_ip_limit)?;
        self.report.format.parse::<crate::output::OutputFormat>()?;
        Ok(())
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            log::warn!("Config file {:?} not found, using defaults", path);
            Ok(Config::default())
        }
    }
}
