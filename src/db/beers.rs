use rusqlite::{params, Connection, Row};

use crate::error::StorageError;
use crate::models::{Beer, BeerDetails};

/// Append one beer and echo the stored row back, id included, so callers can
/// update in-memory state without re-querying.
pub fn insert_beer(conn: &Connection, details: &BeerDetails) -> Result<Beer, StorageError> {
    conn.execute(
        "INSERT INTO beers (brand, name, style, hop, yeast, malts, ibu, alcohol, blg)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            details.brand,
            details.name,
            details.style,
            details.hop,
            details.yeast,
            details.malts,
            details.ibu,
            details.alcohol,
            details.blg,
        ],
    )
    .map_err(|err| StorageError::query("insert beer", err))?;

    Ok(Beer {
        id: conn.last_insert_rowid(),
        details: details.clone(),
    })
}

/// Every stored beer in insertion order. The ordering keeps the history list
/// stable between launches.
pub fn fetch_beers(conn: &Connection) -> Result<Vec<Beer>, StorageError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, brand, name, style, hop, yeast, malts, ibu, alcohol, blg
             FROM beers
             ORDER BY id",
        )
        .map_err(|err| StorageError::query("prepare beer query", err))?;

    let beers = stmt
        .query_map([], beer_from_row)
        .map_err(|err| StorageError::query("load beers", err))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| StorageError::query("collect beers", err))?;

    Ok(beers)
}

/// Remove every row. Deleting from an empty table is fine and returns zero.
pub fn delete_all_beers(conn: &Connection) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM beers", [])
        .map_err(|err| StorageError::query("delete beers", err))
}

pub fn count_beers(conn: &Connection) -> Result<usize, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM beers", [], |row| row.get::<_, usize>(0))
        .map_err(|err| StorageError::query("count beers", err))
}

fn beer_from_row(row: &Row<'_>) -> rusqlite::Result<Beer> {
    Ok(Beer {
        id: row.get(0)?,
        details: BeerDetails {
            brand: row.get(1)?,
            name: row.get(2)?,
            style: row.get(3)?,
            hop: row.get(4)?,
            yeast: row.get(5)?,
            malts: row.get(6)?,
            ibu: row.get(7)?,
            alcohol: row.get(8)?,
            blg: row.get(9)?,
        },
    })
}
