//! Session persistence.
//!
//! A session is saved as one JSON record under `config::SESSION_KEY` in a
//! key-value store. Loading tolerates a missing record (fresh start), a
//! record that only holds the user, and stale dates.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::config::SESSION_KEY;
use crate::db::{open_database, open_memory_database, DatabaseError};
use crate::models::{DeliveryRequest, Medication, ReminderRecord, User};

// ═══════════════════════════════════════════════════════════
// Snapshot
// ═══════════════════════════════════════════════════════════

/// Serialized form of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub user: User,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub reminders: Vec<ReminderRecord>,
    #[serde(default)]
    pub delivery_requests: Vec<DeliveryRequest>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> Result<String, DatabaseError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored record. A bare user record restores with empty collections.
    pub fn from_json(json: &str) -> Result<Self, DatabaseError> {
        match serde_json::from_str::<SessionSnapshot>(json) {
            Ok(snapshot) => Ok(snapshot),
            Err(snapshot_err) => match serde_json::from_str::<User>(json) {
                Ok(user) => Ok(Self {
                    user,
                    medications: Vec::new(),
                    reminders: Vec::new(),
                    delivery_requests: Vec::new(),
                }),
                Err(_) => Err(snapshot_err.into()),
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Store trait
// ═══════════════════════════════════════════════════════════

/// Key-value home of the persisted session.
pub trait SessionStore {
    /// `Ok(None)` when nothing has been saved.
    fn load(&self) -> Result<Option<SessionSnapshot>, DatabaseError>;
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), DatabaseError>;
    fn clear(&mut self) -> Result<(), DatabaseError>;
}

// ═══════════════════════════════════════════════════════════
// SQLite store
// ═══════════════════════════════════════════════════════════

/// Session store backed by the `session_store` table.
pub struct SqliteSessionStore {
    conn: Connection,
}

impl SqliteSessionStore {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        Ok(Self {
            conn: open_database(path)?,
        })
    }

    pub fn in_memory() -> Result<Self, DatabaseError> {
        Ok(Self {
            conn: open_memory_database()?,
        })
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, DatabaseError> {
        read_record(&self.conn, SESSION_KEY)?
            .map(|json| SessionSnapshot::from_json(&json))
            .transpose()
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), DatabaseError> {
        write_record(&self.conn, SESSION_KEY, &snapshot.to_json()?)
    }

    fn clear(&mut self) -> Result<(), DatabaseError> {
        delete_record(&self.conn, SESSION_KEY)
    }
}

/// Get a record by key. Returns None if not set.
fn read_record(conn: &Connection, key: &str) -> Result<Option<String>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT value FROM session_store WHERE key = ?1")?;
    match stmt.query_row([key], |row| row.get::<_, String>(0)) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// Set a record (upsert).
fn write_record(conn: &Connection, key: &str, value: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO session_store (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

fn delete_record(conn: &Connection, key: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM session_store WHERE key = ?1", [key])?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// In-memory store
// ═══════════════════════════════════════════════════════════

/// Keeps the serialized record in memory. Lives as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Option<String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with a raw stored record.
    #[cfg(test)]
    pub(crate) fn with_record(json: impl Into<String>) -> Self {
        Self {
            record: Some(json.into()),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionSnapshot>, DatabaseError> {
        self.record
            .as_deref()
            .map(SessionSnapshot::from_json)
            .transpose()
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<(), DatabaseError> {
        self.record = Some(snapshot.to_json()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DatabaseError> {
        self.record = None;
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
