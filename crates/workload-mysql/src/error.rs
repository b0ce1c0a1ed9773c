//! Error types for the MySQL store.

use thiserror::Error;

/// Errors that can occur while talking to MySQL.
#[derive(Error, Debug)]
pub enum MySqlStoreError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// Malformed connection string.
    #[error("Invalid MySQL connection string: {0}")]
    Url(#[from] mysql_async::UrlError),

    /// An update or delete matched no parent.
    #[error("No rows affected by {0}")]
    NoRowsAffected(&'static str),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
