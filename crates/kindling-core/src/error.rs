//! Core error types for kindling-core.
//!
//! Engine transitions never fail; these errors only come out of setup
//! paths (opening storage, loading configuration or catalogs) and the
//! remote mirror, whose failures are logged rather than returned.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kindling-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog loading or validation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Remote mirror errors
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Installation device id could not be read or created
    #[error("Device id error: {0}")]
    DeviceId(#[from] crate::sync::DeviceIdError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Catalog-specific errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read the catalog file
    #[error("Failed to read catalog at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog TOML did not parse
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// A required list is empty
    #[error("Catalog has no {0}")]
    Empty(&'static str),

    /// The same id appears twice within one list
    #[error("Duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    /// The special message is also listed as a regular message
    #[error("Special message id '{0}' must not appear among regular messages")]
    SpecialMessageListed(String),
}

/// Remote mirror errors.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Endpoint is not a valid base URL
    #[error("Invalid sync endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Remote answered with a non-success status
    #[error("Remote store rejected snapshot (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    /// Mirror runtime could not be started
    #[error("Failed to start sync runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Push was called off the mirror's runtime
    #[error("No async runtime available: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(DatabaseError::from(err))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
