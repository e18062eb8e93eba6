//! SQLite connection provider.
//!
//! `DbPool` holds only the database location. Every operation acquires its
//! own connection through [`DbPool::with_conn`] and releases it on return, so
//! the handle can be cloned freely into HTTP workers and report threads.

use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct DbPool {
    path: PathBuf,
}

impl DbPool {
    /// Handle for `path` without touching the file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Handle for `path` with the schema created/migrated.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let pool = Self::new(path);
        pool.with_conn(|conn| init_db(conn))?;
        Ok(pool)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection with the per-connection pragmas applied.
    pub fn connect(&self) -> AppResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(conn)
    }

    /// Run `func` on a connection scoped to this call.
    pub fn with_conn<F, T>(&self, func: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T>,
    {
        let mut conn = self.connect()?;
        func(&mut conn)
    }
}
