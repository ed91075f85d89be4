//! Persistence Module
//!
//! SQLite storage for user accounts and saved favorites. A single connection
//! is shared behind a mutex; every operation is one short statement.

mod favorites;
mod users;

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, ErrorCode};
use thiserror::Error;

pub use favorites::Favorite;
pub use users::User;

// == Store Error ==
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("record already exists")]
    Duplicate,

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    /// Classifies constraint violations as [`StoreError::Duplicate`].
    fn from_write(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
                StoreError::Duplicate
            }
            _ => StoreError::Database(err),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Database ==
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    ///
    /// `":memory:"` gives a private in-memory database.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Creates an empty in-memory database.
    pub fn in_memory() -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS favorites (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                place_id TEXT NOT NULL,
                name TEXT NOT NULL,
                city TEXT,
                country TEXT,
                lat REAL,
                lon REAL,
                saved_at TEXT NOT NULL
            );

            CREATE UNIQUE INDEX IF NOT EXISTS idx_favorites_user_place
                ON favorites(user_id, place_id);
            "#,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}
