//! On-disk session store — a key-value table in SQLite under a fixed key.
//!
//! The store is opened and closed around every access; nothing holds it open
//! across a poll sleep.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use shiftwatch_core::error::{Result, ShiftwatchError};

/// Fixed key under which the one-and-only session is stored.
pub const SESSION_KEY: &str = "shifter_session";

/// Serialized session state — the cookie snapshot for the member site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    /// `name=value` pairs, as handed back by the cookie jar.
    pub cookies: Vec<String>,
}

/// SQLite-backed key-value store for the serialized session.
pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Open or create the store at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)
            .map_err(|e| ShiftwatchError::Store(format!("open session db: {e}")))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS sessions (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e| ShiftwatchError::Store(format!("schema error: {e}")))?;

        tracing::debug!("Session store opened: {}", path.display());
        Ok(Self { conn })
    }

    /// Load the persisted session, if any.
    pub fn load(&self) -> Result<Option<SavedSession>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM sessions WHERE key = ?1",
                params![SESSION_KEY],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ShiftwatchError::Store(format!("load session: {e}")))?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Persist the session, overwriting any prior entry.
    pub fn save(&self, session: &SavedSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.conn
            .execute(
                "INSERT INTO sessions (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![SESSION_KEY, json],
            )
            .map_err(|e| ShiftwatchError::Store(format!("save session: {e}")))?;
        Ok(())
    }

    /// Delete any persisted session.
    pub fn delete(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM sessions WHERE key = ?1", params![SESSION_KEY])
            .map_err(|e| ShiftwatchError::Store(format!("delete session: {e}")))?;
        Ok(())
    }
}
