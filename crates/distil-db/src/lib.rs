pub mod migrations;
pub mod models;
pub mod queries;
pub mod session;

pub use session::Session;

use std::path::Path;

use rusqlite::Connection;
use thiserror::Error;
use tracing::info;

/// Failure raised by the storage collaborator. Uniqueness violations are the
/// interesting case for callers, so they are distinguishable.
#[derive(Debug, Error)]
#[error("storage failure: {0}")]
pub struct StorageError(#[from] pub rusqlite::Error);

impl StorageError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            &self.0,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        Self::init(conn, &path.display().to_string())
    }

    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, ":memory:")
    }

    fn init(conn: Connection, label: &str) -> Result<Self, StorageError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&conn)?;
        info!("Database opened at {label}");
        Ok(Self { conn })
    }

    /// One transactional session. All writes of one refinement go through a
    /// single session; dropping it without commit rolls everything back.
    pub fn session(&mut self) -> Result<Session<'_>, StorageError> {
        Session::begin(&mut self.conn)
    }
}
