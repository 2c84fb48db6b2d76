//! SQLite implementation of the EventStore trait

use super::{EventStore, PersistenceError};
use crate::models::{ClassifiedEvent, EventType, IpCount, LogEvent};
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// SQLite-based event storage
///
/// A connection is opened for each operation and dropped when the
/// operation returns, so no handle outlives a call.
pub struct SqliteEventStore {
    db_path: PathBuf,
}

impl SqliteEventStore {
    /// Create a store backed by the database file at `db_path`
    ///
    /// Creates the database file and initializes the schema if it doesn't exist.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, PersistenceError> {
        let store = SqliteEventStore {
            db_path: db_path.as_ref().to_path_buf(),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, PersistenceError> {
        Ok(Connection::open(&self.db_path)?)
    }

    fn to_count(value: i64) -> Result<u64, PersistenceError> {
        u64::try_from(value)
            .map_err(|_| PersistenceError::InvalidData(format!("Negative count: {}", value)))
    }

    fn parse_event_type(value: &str) -> Result<EventType, PersistenceError> {
        value.parse().map_err(PersistenceError::InvalidData)
    }
}

impl EventStore for SqliteEventStore {
    fn initialize_schema(&self) -> Result<(), PersistenceError> {
        let conn = self.connect()?;
        conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    fn append(&self, event: &ClassifiedEvent) -> Result<i64, PersistenceError> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO logs (event_type, user_account, ip_address, original_line)
             VALUES (?, ?, ?, ?)",
            params![
                event.event_type.as_str(),
                event.user_account,
                event.ip_address,
                event.original_line
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn count_by_type(&self) -> Result<HashMap<EventType, u64>, PersistenceError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT event_type, COUNT(*) FROM logs GROUP BY event_type")?;

        let rows = stmt
            .query_map([], |row| {
                let event_type: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((event_type, count))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts = HashMap::new();
        for (event_type, count) in rows {
            counts.insert(Self::parse_event_type(&event_type)?, Self::to_count(count)?);
        }
        Ok(counts)
    }

    fn top_failed_ips(&self, limit: usize) -> Result<Vec<IpCount>, PersistenceError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT ip_address, COUNT(*) AS attempts FROM logs
             WHERE event_type = ?
             GROUP BY ip_address
             ORDER BY attempts DESC, ip_address ASC
             LIMIT ?",
        )?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt
            .query_map(params![EventType::FailedLogin.as_str(), limit], |row| {
                let ip: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((ip, count))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(ip, count)| -> Result<IpCount, PersistenceError> {
                Ok(IpCount { ip, count: Self::to_count(count)? })
            })
            .collect()
    }

    fn events(&self) -> Result<Vec<LogEvent>, PersistenceError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, event_type, user_account, ip_address, original_line
             FROM logs ORDER BY id ASC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, event_type, user_account, ip_address, original_line)| -> Result<LogEvent, PersistenceError> {
                Ok(LogEvent {
                    id,
                    event_type: Self::parse_event_type(&event_type)?,
                    user_account,
                    ip_address,
                    original_line,
                })
            })
            .collect()
    }

    fn reset(&self) -> Result<(), PersistenceError> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM logs", [])?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.db_path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, SqliteEventStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SqliteEventStore::new(dir.path().join("events.db"))
            .expect("Failed to create store");
        (dir, store)
    }

    fn event(event_type: EventType, user: &str, ip: &str) -> ClassifiedEvent {
        ClassifiedEvent {
            event_type,
            user_account: user.to_string(),
            ip_address: ip.to_string(),
            original_line: format!("{} {} from {}", event_type, user, ip),
        }
    }

    fn failed(ip: &str) -> ClassifiedEvent {
        event(EventType::FailedLogin, "root", ip)
    }

    #[test]
    fn test_append_assigns_increasing_ids() {
        let (_dir, store) = create_test_store();

        let first = store.append(&failed("1.1.1.1")).unwrap();
        let second = store.append(&failed("1.1.1.1")).unwrap();
        assert!(second > first);

        let events = store.events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, first);
        assert_eq!(events[0].event_type, EventType::FailedLogin);
        assert_eq!(events[0].original_line, "FAILED_LOGIN root from 1.1.1.1");
    }

    #[test]
    fn test_count_by_type_omits_empty_types() {
        let (_dir, store) = create_test_store();
        assert!(store.count_by_type().unwrap().is_empty());

        store.append(&failed("1.1.1.1")).unwrap();
        store.append(&failed("2.2.2.2")).unwrap();

        let counts = store.count_by_type().unwrap();
        assert_eq!(counts.get(&EventType::FailedLogin), Some(&2));
        assert_eq!(counts.get(&EventType::AcceptedLogin), None);
    }

    #[test]
    fn test_top_failed_ips_ordering_and_limit() {
        let (_dir, store) = create_test_store();

        let attempts = [
            ("10.0.0.1", 1),
            ("10.0.0.2", 4),
            ("10.0.0.3", 2),
            ("10.0.0.4", 3),
            ("10.0.0.5", 6),
            ("10.0.0.6", 5),
        ];
        for (ip, count) in attempts {
            for _ in 0..count {
                store.append(&failed(ip)).unwrap();
            }
        }
        // Accepted logins never count towards the ranking
        for _ in 0..10 {
            store.append(&event(EventType::AcceptedLogin, "alice", "10.0.0.1")).unwrap();
        }

        let top = store.top_failed_ips(5).unwrap();
        let ips: Vec<_> = top.iter().map(|entry| entry.ip.as_str()).collect();
        assert_eq!(ips, vec!["10.0.0.5", "10.0.0.6", "10.0.0.2", "10.0.0.4", "10.0.0.3"]);
        assert!(top.windows(2).all(|pair| pair[0].count > pair[1].count));
    }

    #[test]
    fn test_top_failed_ips_tie_break() {
        let (_dir, store) = create_test_store();

        store.append(&failed("192.168.0.9")).unwrap();
        store.append(&failed("10.0.0.1")).unwrap();
        store.append(&failed("2001:db8::1")).unwrap();

        let top = store.top_failed_ips(5).unwrap();
        let ips: Vec<_> = top.iter().map(|entry| entry.ip.as_str()).collect();
        assert_eq!(ips, vec!["10.0.0.1", "192.168.0.9", "2001:db8::1"]);
    }

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let (_dir, store) = create_test_store();
        store.append(&failed("1.1.1.1")).unwrap();

        store.initialize_schema().unwrap();
        store.initialize_schema().unwrap();

        assert_eq!(store.events().unwrap().len(), 1);
    }

    #[test]
    fn test_persists_across_reopen() {
        let (dir, store) = create_test_store();
        store.append(&failed("1.1.1.1")).unwrap();
        drop(store);

        let reopened = SqliteEventStore::new(dir.path().join("events.db")).unwrap();
        assert_eq!(reopened.events().unwrap().len(), 1);
    }

    #[test]
    fn test_reset() {
        let (_dir, store) = create_test_store();

        // Resetting an empty store succeeds
        store.reset().unwrap();

        store.append(&failed("1.1.1.1")).unwrap();
        store.append(&event(EventType::AcceptedLogin, "bob", "3.3.3.3")).unwrap();
        store.reset().unwrap();

        assert!(store.count_by_type().unwrap().is_empty());
        assert!(store.top_failed_ips(5).unwrap().is_empty());

        // Schema survives the reset
        store.append(&failed("1.1.1.1")).unwrap();
        assert_eq!(store.events().unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_event_type_is_invalid_data() {
        let (_dir, store) = create_test_store();
        let conn = Connection::open(store.path()).unwrap();
        conn.execute(
            "INSERT INTO logs (event_type, user_account, ip_address, original_line)
             VALUES ('LOGOUT', 'x', '1.1.1.1', 'line')",
            [],
        )
        .unwrap();

        assert!(matches!(store.count_by_type(), Err(PersistenceError::InvalidData(_))));
    }

    #[test]
    fn test_unreachable_path_is_database_error() {
        let dir = TempDir::new().unwrap();
        let result = SqliteEventStore::new(dir.path().join("missing").join("events.db"));
        assert!(matches!(result, Err(PersistenceError::Database(_))));
    }
}
