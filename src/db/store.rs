use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::StorageError;
use crate::models::{Beer, BeerDetails};

use super::beers::{count_beers, delete_all_beers, fetch_beers, insert_beer};
use super::connection::{ensure_schema, open_connection};

/// The local beer store: one SQLite connection opened at startup and closed at
/// shutdown. Each method runs a single statement, so every call is its own
/// atomic unit and no transaction ever spans two of them.
pub struct BeerStore {
    conn: Connection,
}

impl BeerStore {
    /// Open the database file at `path`. The schema is not touched; call
    /// [`BeerStore::ensure_schema`] before anything else.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            conn: open_connection(path)?,
        })
    }

    /// Throwaway store backed by SQLite's in-memory mode.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|err| StorageError::Open {
            path: ":memory:".to_string(),
            source: Box::new(err),
        })?;
        Ok(Self { conn })
    }

    pub fn ensure_schema(&self) -> Result<(), StorageError> {
        ensure_schema(&self.conn)
    }

    pub fn insert(&self, details: &BeerDetails) -> Result<Beer, StorageError> {
        let beer = insert_beer(&self.conn, details)?;
        debug!(id = beer.id, "stored beer");
        Ok(beer)
    }

    pub fn list_all(&self) -> Result<Vec<Beer>, StorageError> {
        fetch_beers(&self.conn)
    }

    pub fn delete_all(&self) -> Result<usize, StorageError> {
        let deleted = delete_all_beers(&self.conn)?;
        debug!(deleted, "cleared beers table");
        Ok(deleted)
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        count_beers(&self.conn)
    }

    /// Close the connection explicitly so a failure to flush shows up in the
    /// logs instead of being swallowed by `Drop`.
    pub fn close(self) -> Result<(), StorageError> {
        self.conn
            .close()
            .map_err(|(_, err)| StorageError::Close(err))
    }
}
