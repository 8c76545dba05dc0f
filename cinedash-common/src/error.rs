//! Common error types for CineDash

use thiserror::Error;

/// Common result type for CineDash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the dashboard crates
///
/// Empty intermediate results are not errors; they are reported as view
/// states by the pipeline. Unparseable cell values are recovered by the
/// normalizer and never reach this type.
#[derive(Error, Debug)]
pub enum Error {
    /// Store unreachable (connect or pool acquisition failed)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution failed after a connection was established
    #[error("Query error: {0}")]
    Query(#[from] sqlx::Error),

    /// Result set lacks an expected column
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify a sqlx error raised while opening a connection
    ///
    /// Anything that prevents reaching the store is a connection failure;
    /// other errors keep their query classification.
    pub fn from_connect(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_)
            | sqlx::Error::Database(_) => Error::Connection(err.to_string()),
            other => Error::Query(other),
        }
    }

    /// True when the store could not be reached
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_connection_error() {
        let err = Error::from_connect(sqlx::Error::PoolTimedOut);
        assert!(err.is_connection());
        assert!(err.to_string().starts_with("Connection error"));
    }

    #[test]
    fn test_row_not_found_stays_query_error() {
        let err = Error::from_connect(sqlx::Error::RowNotFound);
        assert!(!err.is_connection());
        assert!(matches!(err, Error::Query(_)));
    }
}
