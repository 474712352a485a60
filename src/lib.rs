//! MDRM Catalog Library
//!
//! Loads the Federal Reserve Micro Data Reference Manual (MDRM) CSV export
//! into a SQLite catalog and provides read-only lookups over it.
//!
//! This library provides tools for:
//! - Reading the export with a Windows-1252 fallback for non-UTF-8 files
//! - Resolving source headers to catalog columns, tolerating missing ones
//! - Normalizing dates, HTML entities and synthesized MDRM identifiers
//! - Bulk loading with full-replace semantics and summary statistics
//! - Search, detail and statistics queries plus canned reports

pub mod config;
pub mod constants;
pub mod error;
pub mod explorer;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod reports;
pub mod schema;
pub mod source;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{CatalogField, ColumnSpec, MdrmConfig};
pub use error::{MdrmError, Result};
pub use explorer::{Explorer, SearchField};
pub use models::{CatalogRecord, CatalogRow, CatalogStatistics, CatalogSummary, ItemType, LoadStats};
pub use pipeline::Pipeline;
