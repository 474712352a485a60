//! Error handling for MDRM catalog operations.
//!
//! Provides error types with context for source reading, catalog loading,
//! summary aggregation and read-only lookups.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MdrmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Database not found: {path} (run `mdrm load` first)")]
    DatabaseNotFound { path: PathBuf },

    #[error("Could not decode {path} as {tried}")]
    Encoding { path: PathBuf, tried: String },

    #[error("Invalid MDRM file: {path} - {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("Unsupported search field: {field} (expected item_name, mnemonic or item_code)")]
    InvalidSearchField { field: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, MdrmError>;
