//! SQLite-backed interaction log.
//!
//! A [`Store`] is always at the current schema: opening one applies any
//! pending migrations before it is handed out.

pub mod backup;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod records;
pub mod repo;

use crate::error::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Writers (a chat `/confirm` racing a `log` in another shell) wait this
/// long for the lock instead of failing immediately.
const BUSY_TIMEOUT: Duration = Duration::from_secs(2);

pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Opens the log at `path`, creating it with owner-only permissions if
    /// needed.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        paths::restrict_file_permissions(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::prepare(conn, Some(path.to_path_buf()))
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?, None)
    }

    fn prepare(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        migrate::run_migrations(&conn)?;
        let store = Self { conn, path };
        debug!(
            path = ?store.path.as_deref(),
            logs = store.interactions().count()?,
            "interaction log ready"
        );
        Ok(store)
    }

    /// Database file backing this store; `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn backup_to(&self, path: &Path) -> Result<()> {
        backup::backup_to(&self.conn, path)
    }

    pub fn interactions(&self) -> repo::InteractionsRepo<'_> {
        repo::InteractionsRepo::new(&self.conn)
    }
}
