use super::AuditSink;
use crate::models::AuditEntry;
use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Audit trail stored as a plain text file, one entry per line
pub struct FileAuditSink {
    log_path: PathBuf,
}

impl FileAuditSink {
    pub fn new<P: AsRef<Path>>(log_path: P) -> Self {
        FileAuditSink {
            log_path: log_path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Read back every well-formed entry; a missing file is an empty trail
    pub fn entries(&self) -> io::Result<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(fs::File::open(&self.log_path)?);
        let mut entries = Vec::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match AuditEntry::parse_line(&line) {
                Some(entry) => entries.push(entry),
                None => log::debug!("Skipping malformed audit line {}", line_num + 1),
            }
        }
        Ok(entries)
    }
}

impl AuditSink for FileAuditSink {
    fn append(&self, entry: &AuditEntry) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.log_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_append_only_lines() {
        let dir = TempDir::new().unwrap();
        let sink = FileAuditSink::new(dir.path().join("reset_log.txt"));
        assert!(sink.entries().unwrap().is_empty());

        let first = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(3, 4, 5).unwrap();
        let second = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(13, 14, 15).unwrap();
        sink.append(&AuditEntry::reset_at(first)).unwrap();
        sink.append(&AuditEntry::reset_at(second)).unwrap();

        let contents = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(
            contents,
            "2024-01-02 03:04:05 - Database reset\n2024-01-02 13:14:15 - Database reset\n"
        );

        let entries = sink.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].timestamp, second);
    }

    #[test]
    fn test_entries_skip_malformed_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reset_log.txt");
        fs::write(&path, "not an entry\n\n2024-05-06 07:08:09 - Database reset\n").unwrap();

        let entries = FileAuditSink::new(&path).entries().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_unwritable_location() {
        let dir = TempDir::new().unwrap();
        let sink = FileAuditSink::new(dir.path().join("missing").join("reset_log.txt"));
        assert!(sink.append(&AuditEntry::reset_now()).is_err());
    }
}
