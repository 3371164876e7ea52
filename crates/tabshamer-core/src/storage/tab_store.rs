//! SQLite-backed store for per-tab open timestamps.
//!
//! Records are keyed by the host tab id and written exactly once per tab;
//! the only other mutation is deletion when the tab closes. The table is a
//! plain key-value layout (keys are stringified tab ids, values are JSON
//! [`TabRecord`]s), and reads skip anything that does not parse as one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StoreError;
use crate::tabs::{TabId, TabRecord};

/// Result of reconciling stored records against a tab enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Open tabs that had no record and were adopted.
    pub adopted: usize,
    /// Records whose tab is no longer open and were dropped.
    pub dropped: usize,
}

/// Persistent store for [`TabRecord`]s.
pub struct TabStore {
    conn: Connection,
}

impl TabStore {
    /// Open the store at `~/.config/tabshamer/tabs.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()
            .map_err(|e| StoreError::DataDir(e.to_string()))?
            .join("tabs.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tab_meta (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Record when a tab was opened.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn record(&self, tab_id: TabId, opened_at: DateTime<Utc>) -> Result<(), StoreError> {
        let value = serde_json::to_string(&TabRecord { opened_at })
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO tab_meta (key, value) VALUES (?1, ?2)",
            params![tab_id.to_string(), value],
        )?;
        Ok(())
    }

    /// Delete the record for a closed tab. Missing records are not an error.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn remove(&self, tab_id: TabId) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM tab_meta WHERE key = ?1",
            params![tab_id.to_string()],
        )?;
        Ok(())
    }

    /// Fetch a single tab's record, if any.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn get(&self, tab_id: TabId) -> Result<Option<TabRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM tab_meta WHERE key = ?1")?;
        let mut rows = stmt.query(params![tab_id.to_string()])?;
        match rows.next()? {
            Some(row) => {
                let value: String = row.get(0)?;
                Ok(serde_json::from_str(&value).ok())
            }
            None => Ok(None),
        }
    }

    /// Fetch all tab records.
    ///
    /// Rows whose key is not an integer or whose value does not parse as a
    /// [`TabRecord`] are skipped; the underlying table may hold keys that
    /// are not ours.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn all(&self) -> Result<HashMap<TabId, TabRecord>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT key, value FROM tab_meta")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut meta = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            let Ok(tab_id) = key.parse::<TabId>() else {
                continue;
            };
            let Ok(record) = serde_json::from_str::<TabRecord>(&value) else {
                continue;
            };
            meta.insert(tab_id, record);
        }
        Ok(meta)
    }

    /// Reconcile records against the set of currently open tabs: adopt open
    /// tabs with no record (opened_at = `now`) and drop records whose tab is
    /// gone. Restores the no-stale-records invariant after missed events.
    ///
    /// # Errors
    /// Returns an error if any read or write fails.
    pub fn sync(&self, open_ids: &[TabId], now: DateTime<Utc>) -> Result<SyncSummary, StoreError> {
        let known = self.all()?;
        let mut summary = SyncSummary::default();

        for &id in open_ids {
            if !known.contains_key(&id) {
                self.record(id, now)?;
                summary.adopted += 1;
            }
        }
        for id in known.keys() {
            if !open_ids.contains(id) {
                self.remove(*id)?;
                summary.dropped += 1;
            }
        }
        Ok(summary)
    }
}
