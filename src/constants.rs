//! Application constants for the MDRM catalog
//!
//! Default file locations, table names and the source header names used by
//! the Federal Reserve MDRM CSV export.

// =============================================================================
// File Locations
// =============================================================================

/// Default path of the MDRM CSV export (extracted from MDRM.zip)
pub const DEFAULT_SOURCE_PATH: &str = "MDRM_CSV.csv";

/// Default path of the generated SQLite database
pub const DEFAULT_DATABASE_PATH: &str = "mdrm_database.db";

/// Descriptive lines preceding the real header row ("PUBLIC")
pub const DEFAULT_SKIP_LINES: usize = 1;

/// SQLite sidecar files removed alongside the database on a full replace
pub const DATABASE_SIDECAR_SUFFIXES: &[&str] = &["-journal", "-wal", "-shm"];

// =============================================================================
// Tables
// =============================================================================

pub const CATALOG_TABLE: &str = "mdrm_data";
pub const SUMMARY_TABLE: &str = "mdrm_summary";

// =============================================================================
// Source Header Names
// =============================================================================

/// Source column names as they appear after header cleanup
pub mod source_columns {
    pub const MNEMONIC: &str = "Mnemonic";
    pub const ITEM_CODE: &str = "Item Code";
    pub const START_DATE: &str = "Start Date";
    pub const END_DATE: &str = "End Date";
    pub const ITEM_NAME: &str = "Item Name";
    pub const CONFIDENTIALITY: &str = "Confidentiality";
    pub const ITEM_TYPE: &str = "ItemType";
    pub const REPORTING_FORM: &str = "Reporting Form";
    pub const DESCRIPTION: &str = "Description";
    pub const SERIES_GLOSSARY: &str = "SeriesGlossary";
}

// =============================================================================
// Text Cleanup
// =============================================================================

/// HTML numeric entity for carriage return used throughout MDRM free text
pub const CARRIAGE_RETURN_ENTITY: &str = "&#x0D;";

/// HTML ampersand entity
pub const AMPERSAND_ENTITY: &str = "&amp;";

/// Date formats tried in order when parsing start/end dates
///
/// The MDRM export uses `12/31/9999 12:00:00 AM`; the remaining formats cover
/// hand-edited or re-exported files.
pub const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// Date-only formats tried after the datetime formats
pub const DATE_ONLY_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

/// Storage format for dates in the catalog table
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Storage format for load timestamps
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Statistics
// =============================================================================

/// Summary statistic names
pub mod statistics {
    pub const TOTAL_RECORDS: &str = "total_records";
    pub const UNIQUE_MNEMONICS: &str = "unique_mnemonics";
    pub const UNIQUE_ITEM_CODES: &str = "unique_item_codes";
    pub const UNIQUE_REPORTING_FORMS: &str = "unique_reporting_forms";
    pub const CONFIDENTIAL_ITEMS: &str = "confidential_items";
    pub const PUBLIC_ITEMS: &str = "public_items";
    pub const ACTIVE_ITEMS: &str = "active_items";
    pub const EXPIRED_ITEMS: &str = "expired_items";

    /// Prefix for the per-item-type count family
    pub const ITEM_TYPE_PREFIX: &str = "item_type_";
}

// =============================================================================
// Explorer Defaults
// =============================================================================

/// Default maximum number of search results
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Default number of mnemonics in the statistics frequency list
pub const DEFAULT_TOP_MNEMONICS: usize = 10;

/// Window used by the "recently added items" report
pub const RECENT_ITEMS_YEARS: i32 = 5;

/// Progress bar redraw granularity while inserting rows
pub const PROGRESS_UPDATE_INTERVAL: u64 = 1_000;
