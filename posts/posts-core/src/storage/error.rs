//! Storage errors.

use thiserror::Error;

/// Errors raised by a [`PostStore`](super::PostStore) backend.
///
/// Absence of a row is never an error; operations return `Option`/`bool`
/// for that case.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Could not reach the database or build the pool.
    #[error("database connection error: {message}")]
    Connection {
        /// Driver-level detail
        message: String,
    },

    /// Creating or dropping the table failed.
    #[error("schema error: {message}")]
    Schema {
        /// Driver-level detail
        message: String,
    },

    /// A read query failed.
    #[error("read error: {message}")]
    Read {
        /// Driver-level detail
        message: String,
    },

    /// A write query failed.
    #[error("write error: {message}")]
    Write {
        /// Driver-level detail
        message: String,
    },

    /// Row decoding or any other unexpected failure.
    #[error("internal storage error: {message}")]
    Internal {
        /// Detail
        message: String,
    },
}

impl StorageError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a read error.
    pub fn read(message: impl Into<String>) -> Self {
        Self::Read {
            message: message.into(),
        }
    }

    /// Create a write error.
    pub fn write(message: impl Into<String>) -> Self {
        Self::Write {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
