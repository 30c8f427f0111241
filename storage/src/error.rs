//! Storage error types.
//!
//! Used by repository implementations and callers of storage APIs. Raw `sqlx::Error`s are
//! classified into connection failures, constraint violations and generic database errors.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) => match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => StorageError::ConstraintViolation(db.to_string()),
                _ if is_unreachable(db.code().as_deref()) => {
                    StorageError::Connection(err.to_string())
                }
                _ => StorageError::Database(err.to_string()),
            },
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StorageError::Connection(err.to_string()),
            other => StorageError::Database(other.to_string()),
        }
    }
}

/// SQLITE_CANTOPEN (14) and SQLITE_NOTADB (26), including their extended codes.
fn is_unreachable(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .map(|c| matches!(c & 0xff, 14 | 26))
        .unwrap_or(false)
}

/// Why a fetched `messages` row could not be turned into a [`crate::Message`].
#[derive(Error, Debug)]
pub enum RowDecodeError {
    /// A column is missing or has an unexpected type.
    #[error("column decode failed: {0}")]
    Column(#[from] sqlx::Error),
    /// The stored `period` is NULL or does not match the period format.
    #[error("message {id}: unparseable period {value:?}")]
    Period { id: i64, value: Option<String> },
}

impl From<RowDecodeError> for StorageError {
    fn from(err: RowDecodeError) -> Self {
        match err {
            RowDecodeError::Column(e) => StorageError::Database(e.to_string()),
            period => StorageError::Database(period.to_string()),
        }
    }
}
