//! SQLite-based cook history and key-value storage.
//!
//! Provides persistent storage for:
//! - Completed cook sessions and aggregate statistics
//! - Key-value store for application state (custom catalog items)

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::{DatabaseError, Result};

use super::{data_dir, KvStore};

/// A completed cook session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CookRecord {
    pub id: i64,
    pub item_count: u32,
    /// Display names of the cooked items, comma separated.
    pub item_names: String,
    pub planned_min: f64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Aggregate history counters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CookStats {
    pub total_sessions: u64,
    pub total_planned_min: f64,
    pub today_sessions: u64,
    pub today_planned_min: f64,
}

/// SQLite database for cook history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/grillplan/grillplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("grillplan.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cook_sessions (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                item_count   INTEGER NOT NULL,
                item_names   TEXT NOT NULL DEFAULT '',
                planned_min  REAL NOT NULL,
                started_at   TEXT NOT NULL,
                completed_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_cook_sessions_completed_at
                ON cook_sessions(completed_at);",
        )?;
        Ok(())
    }

    /// Record a completed cook session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_cook(
        &self,
        item_count: u32,
        item_names: &str,
        planned_min: f64,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO cook_sessions (item_count, item_names, planned_min, started_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item_count,
                item_names,
                planned_min,
                started_at.to_rfc3339(),
                completed_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Recent cook sessions, newest first.
    pub fn history(&self, limit: u32) -> Result<Vec<CookRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, item_count, item_names, planned_min, started_at, completed_at
             FROM cook_sessions
             ORDER BY completed_at DESC, id DESC
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, f64>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, item_count, item_names, planned_min, started_at, completed_at) = row?;
            records.push(CookRecord {
                id,
                item_count,
                item_names,
                planned_min,
                started_at: parse_timestamp(&started_at)?,
                completed_at: parse_timestamp(&completed_at)?,
            });
        }
        Ok(records)
    }

    /// Aggregate counters over the whole history plus today.
    pub fn stats(&self) -> Result<CookStats, DatabaseError> {
        let mut stats = CookStats::default();

        let (total, minutes) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(planned_min), 0)
             FROM cook_sessions",
            [],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, f64>(1)?)),
        )?;
        stats.total_sessions = total;
        stats.total_planned_min = minutes;

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let (today_sessions, today_minutes) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(planned_min), 0)
             FROM cook_sessions
             WHERE completed_at >= ?1",
            params![format!("{today}T00:00:00+00:00")],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, f64>(1)?)),
        )?;
        stats.today_sessions = today_sessions;
        stats.today_planned_min = today_minutes;

        Ok(stats)
    }
}

impl KvStore for Database {
    fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::QueryFailed(format!("bad timestamp '{raw}': {e}")))
}
