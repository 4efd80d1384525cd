//! String key/value storage with browser local-storage semantics.
//!
//! # Responsibility
//! - Provide `get_item`/`set_item`/`remove_item` over named string slots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set_item` fully replaces the previous value of a key.
//! - A missing key reads as `None`, never as an error.

use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Error as JsonError;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error for key/value access and snapshot decoding.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Stored value is not a valid serialized snapshot.
    Corrupt { key: String, source: JsonError },
    /// Snapshot could not be encoded.
    Encode(JsonError),
    /// Decoded snapshot violates a list invariant.
    InvalidData(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Corrupt { key, source } => {
                write!(f, "stored value under `{key}` is not valid: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode snapshot: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl StorageError {
    /// Stable code for log lines; never quotes stored values.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "db",
            Self::Corrupt { .. } => "corrupt",
            Self::Encode(_) => "encode",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Corrupt { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named string slots, the shape of a browser's `localStorage`.
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<S: LocalStorage + ?Sized> LocalStorage for &S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// SQLite-backed local storage over the `local_storage` table.
pub struct SqliteLocalStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLocalStorage<'conn> {
    /// Wraps a connection returned by `db::open_db*` (migrations applied).
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LocalStorage for SqliteLocalStorage<'_> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        debug!(
            "event=storage_write module=storage status=ok backend=sqlite key={} bytes={}",
            key,
            value.len()
        );
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Process-local storage for tests and throwaway sessions.
///
/// Counts writes so callers can observe the one-write-per-mutation contract.
#[derive(Debug, Default)]
pub struct MemoryLocalStorage {
    items: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl LocalStorage for MemoryLocalStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
