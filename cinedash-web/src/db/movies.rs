//! Movie table query
//!
//! Cells are decoded by their runtime storage class rather than a fixed Rust
//! type, so a mistyped column (e.g. `rating = 'N/A'`) still loads and is left
//! to the normalizer.

use cinedash_common::{Error, RawValue, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, SqlitePool, TypeInfo, ValueRef};
use tracing::debug;

/// The single query the dashboard issues
pub const MOVIES_QUERY: &str = "SELECT * FROM movies";

/// Columns the dashboard reads, by exact name
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "movie_name",
    "genre",
    "rating",
    "duration_minutes",
    "voting_counts",
];

/// One result row before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawMovieRow {
    pub movie_name: RawValue,
    pub genre: RawValue,
    pub rating: RawValue,
    pub duration_minutes: RawValue,
    pub voting_counts: RawValue,
}

/// Run `SELECT * FROM movies` and return every row, in store order
///
/// An empty table yields an empty vector. Extra columns are ignored; a
/// missing required column is a [`Error::Schema`].
pub async fn fetch_movie_rows(pool: &SqlitePool) -> Result<Vec<RawMovieRow>> {
    let rows = sqlx::query(MOVIES_QUERY).fetch_all(pool).await.map_err(|e| {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Error::Connection(e.to_string())
            }
            other => Error::Query(other),
        }
    })?;

    let Some(first) = rows.first() else {
        debug!("movies query returned no rows");
        return Ok(Vec::new());
    };

    let positions = column_positions(first)?;

    Ok(rows
        .iter()
        .map(|row| RawMovieRow {
            movie_name: raw_cell(row, positions[0]),
            genre: raw_cell(row, positions[1]),
            rating: raw_cell(row, positions[2]),
            duration_minutes: raw_cell(row, positions[3]),
            voting_counts: raw_cell(row, positions[4]),
        })
        .collect())
}

/// Locate each required column in the result set
fn column_positions(row: &SqliteRow) -> Result<[usize; 5]> {
    let names: Vec<&str> = row.columns().iter().map(|c| c.name()).collect();

    let mut positions = [0usize; 5];
    for (slot, wanted) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = names.iter().position(|n| *n == wanted).ok_or_else(|| {
            Error::Schema(format!(
                "movies table is missing column '{}' (found: {})",
                wanted,
                names.join(", ")
            ))
        })?;
    }
    Ok(positions)
}

/// Decode one cell by its storage class
fn raw_cell(row: &SqliteRow, index: usize) -> RawValue {
    let Ok(value) = row.try_get_raw(index) else {
        return RawValue::Null;
    };
    if value.is_null() {
        return RawValue::Null;
    }

    let storage = value.type_info().name().to_string();
    match storage.as_str() {
        "INTEGER" | "BOOLEAN" => row
            .try_get_unchecked::<i64, _>(index)
            .map(RawValue::Integer)
            .unwrap_or(RawValue::Null),
        "REAL" => row
            .try_get_unchecked::<f64, _>(index)
            .map(RawValue::Real)
            .unwrap_or(RawValue::Null),
        "BLOB" => row
            .try_get_unchecked::<Vec<u8>, _>(index)
            .map(RawValue::Blob)
            .unwrap_or(RawValue::Null),
        // TEXT is read as bytes so invalid UTF-8 still yields a string
        _ => row
            .try_get_unchecked::<Vec<u8>, _>(index)
            .map(|bytes| RawValue::Text(String::from_utf8_lossy(&bytes).into_owned()))
            .unwrap_or(RawValue::Null),
    }
}
