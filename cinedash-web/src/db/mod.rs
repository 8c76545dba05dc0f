//! Store access layer for cinedash-web
//!
//! All connections are read-only: the dashboard never writes to the store.

use cinedash_common::{Error, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

mod movies;
pub use movies::{fetch_movie_rows, RawMovieRow, MOVIES_QUERY, REQUIRED_COLUMNS};

/// Connect to the store in read-only mode
///
/// Fails with [`Error::Connection`] when the store cannot be reached or the
/// connection string is malformed.
pub async fn connect_readonly(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| Error::Connection(format!("Invalid connection string: {}", e)))?
        .read_only(true)
        .create_if_missing(false);

    SqlitePoolOptions::new()
        .max_connections(4)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .map_err(Error::from_connect)
}
