//! [`SqliteStore`] -- SQLite-backed storage implementation.

use std::path::Path;
use std::sync::Mutex;

use crm_core::kind::EntityKind;
use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::error::{Result, StorageError};
use crate::sqlite::schema;

/// SQLite-backed implementation of the [`Storage`](crate::traits::Storage) trait.
///
/// Wraps a [`rusqlite::Connection`] in a `Mutex` for thread safety.  All
/// public methods acquire the lock, execute SQL, and release it.
pub struct SqliteStore {
    pub(crate) conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at the given path.
    ///
    /// Enables WAL mode and foreign keys, then initialises the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(?path, "opening SQLite database");

        let conn = Connection::open(path).map_err(|e| {
            StorageError::Connection(format!("failed to open {}: {e}", path.display()))
        })?;

        Self::from_connection(conn)
    }

    /// Opens an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        debug!("opening in-memory SQLite database");
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("failed to open in-memory db: {e}")))?;

        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.configure_connection()?;
        store.init_schema()?;
        Ok(store)
    }

    /// Sets connection pragmas (WAL mode, foreign keys, busy timeout).
    fn configure_connection(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(|e| StorageError::Connection(format!("failed to set pragmas: {e}")))?;

        Ok(())
    }

    /// Creates all tables if they do not exist and registers the collections.
    pub(crate) fn init_schema(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        for stmt in schema::SCHEMA_STATEMENTS {
            conn.execute_batch(stmt).map_err(|e| StorageError::Schema {
                step: "tables",
                reason: format!("{e}\nStatement: {}", truncate(stmt.trim(), 120)),
            })?;
        }

        for kind in EntityKind::ALL {
            conn.execute(
                "INSERT OR IGNORE INTO collections (name) VALUES (?1)",
                params![kind.collection()],
            )
            .map_err(|e| StorageError::Schema {
                step: "collections",
                reason: format!("failed to register {kind}: {e}"),
            })?;
        }

        debug!("schema initialized");
        Ok(())
    }

    /// Acquires the connection lock. Helper used by all operation modules.
    pub(crate) fn lock_conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StorageError::Connection(format!("mutex poisoned: {e}")))
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

/// Truncates a string for error messages.
fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
