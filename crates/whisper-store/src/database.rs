//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees
//! that migrations are run before any other operation.  State is mirrored
//! into a single `kv` table, matching the flat key-value contract the
//! store writes through.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
///
/// The connection sits behind a mutex so the handle can serve the async
/// [`KeyValueStore`] trait; every operation holds the lock only for the
/// duration of a single statement.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data directory:
    /// - Linux:   `~/.local/share/whisperwalls/whisperwalls.db`
    /// - macOS:   `~/Library/Application Support/com.whisperwalls.whisperwalls/whisperwalls.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\whisperwalls\whisperwalls\data\whisperwalls.db`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "whisperwalls", "whisperwalls").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("whisperwalls.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;

        // Run schema migrations.
        migrations::run_migrations(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        let conn = self.conn.lock().ok()?;
        conn.path().map(PathBuf::from)
    }
}

#[async_trait]
impl KeyValueStore for Database {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        let db = Database::open_at(&path).expect("should open");
        assert!(db.path().is_some());

        assert_eq!(db.get("missing").await.unwrap(), None);

        db.set("userId", "user_xyz").await.unwrap();
        assert_eq!(
            db.get("userId").await.unwrap().as_deref(),
            Some("user_xyz")
        );

        db.set("userId", "user_replaced").await.unwrap();
        assert_eq!(
            db.get("userId").await.unwrap().as_deref(),
            Some("user_replaced")
        );
    }

    #[tokio::test]
    async fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.set("locationRadius", "500").await.unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(
            db.get("locationRadius").await.unwrap().as_deref(),
            Some("500")
        );
    }
}
