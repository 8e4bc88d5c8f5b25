use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::StorageError;

/// Open (or create) the SQLite file at `path`, creating its parent directory
/// first so a fresh install does not need any manual setup.
pub fn open_connection(path: &Path) -> Result<Connection, StorageError> {
    let open_error = |source: Box<dyn std::error::Error + Send + Sync>| StorageError::Open {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| open_error(Box::new(err)))?;
    }

    debug!(path = %path.display(), "opening beer database");
    Connection::open(path).map_err(|err| open_error(Box::new(err)))
}

/// Create the `beers` table unless it already exists. Running this on every
/// startup is safe; a second call is a no-op.
pub fn ensure_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS beers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            brand TEXT,
            name TEXT,
            style TEXT,
            hop TEXT,
            yeast TEXT,
            malts TEXT,
            ibu TEXT,
            alcohol TEXT,
            blg TEXT
        )",
        [],
    )
    .map_err(StorageError::Schema)?;

    Ok(())
}
