//! Local persistence for the catalog and the login session.
//!
//! Everything lives in one `SQLite` file under the pubdesk home:
//!
//! ```text
//! <home>/
//!   catalog.sqlite   # publication table + single-row session table
//!   covers/          # uploaded cover images (see `upload`)
//! ```

mod publication;
mod session;

use std::{fs, path::PathBuf};

use rusqlite::Connection;

use crate::model::PublicationId;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("publication not found: {0}")]
    PublicationNotFound(PublicationId),

    #[error("invalid publication: {0} is required")]
    MissingField(&'static str),

    #[error("invalid publication: release date {0:?} is not a YYYY-MM-DD date")]
    InvalidReleaseDate(String),

    #[error("corrupt storage: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS publication (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        title        TEXT NOT NULL,
        release_date TEXT NOT NULL,
        description  TEXT,
        cover_url    TEXT NOT NULL,
        created_at   TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS session (
        slot       INTEGER PRIMARY KEY CHECK (slot = 0),
        token      TEXT NOT NULL,
        email      TEXT NOT NULL,
        started_at TEXT NOT NULL
    );
";

/// `SQLite`-backed storage for publications and the session.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the catalog database under `root`.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let conn = Connection::open(root.join("catalog.sqlite"))?;
        Self::with_connection(conn)
    }

    /// Storage over a private in-memory database.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }
}
