//! Core data structures for the MDRM catalog.
//!
//! Defines normalized catalog rows, stored records, summary statistics,
//! item type classification and the statistics reported by a load run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Classification of a reporting item
///
/// The source does not enforce a closed set, so unrecognised codes are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Financial,
    Structure,
    Derived,
    Rate,
    Percentage,
    Examination,
    Projected,
    Other(String),
}

impl ItemType {
    /// Classify a raw item type code
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "F" => ItemType::Financial,
            "S" => ItemType::Structure,
            "D" => ItemType::Derived,
            "R" => ItemType::Rate,
            "P" => ItemType::Percentage,
            "E" => ItemType::Examination,
            "J" => ItemType::Projected,
            other => ItemType::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            ItemType::Financial => "F",
            ItemType::Structure => "S",
            ItemType::Derived => "D",
            ItemType::Rate => "R",
            ItemType::Percentage => "P",
            ItemType::Examination => "E",
            ItemType::Projected => "J",
            ItemType::Other(code) => code,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ItemType::Financial => "Financial/reported",
            ItemType::Structure => "Structure",
            ItemType::Derived => "Derived",
            ItemType::Rate => "Rate",
            ItemType::Percentage => "Percentage",
            ItemType::Examination => "Examination/supervision",
            ItemType::Projected => "Projected",
            ItemType::Other(_) => "Unknown",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.description())
    }
}

/// A normalized source row ready for insertion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub mdrm_identifier: Option<String>,
    pub mnemonic: Option<String>,
    pub item_code: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub item_name: Option<String>,
    pub confidentiality: Option<String>,
    pub item_type: Option<String>,
    pub reporting_form: Option<String>,
    pub description: Option<String>,
    pub series_glossary: Option<String>,
}

/// A full record as stored in the catalog table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRecord {
    pub id: i64,
    pub mdrm_identifier: Option<String>,
    pub mnemonic: Option<String>,
    pub item_code: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub item_name: Option<String>,
    pub confidentiality: Option<String>,
    pub item_type: Option<String>,
    pub reporting_form: Option<String>,
    pub description: Option<String>,
    pub series_glossary: Option<String>,
    pub created_at: Option<String>,
}

impl CatalogRecord {
    pub fn item_type(&self) -> Option<ItemType> {
        self.item_type.as_deref().map(ItemType::from_code)
    }

    pub fn is_confidential(&self) -> bool {
        self.confidentiality.as_deref() == Some("Y")
    }
}

/// Search result row, the subset of columns shown in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub mdrm_identifier: Option<String>,
    pub mnemonic: Option<String>,
    pub item_code: Option<String>,
    pub item_name: Option<String>,
    pub item_type: Option<String>,
    pub confidentiality: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// A named summary statistic, stored as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryStatistic {
    pub name: String,
    pub value: String,
}

impl SummaryStatistic {
    pub fn new(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
        }
    }
}

/// Row count for a single mnemonic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MnemonicCount {
    pub mnemonic: Option<String>,
    pub count: i64,
}

/// Everything the statistics lookup returns
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStatistics {
    #[serde(flatten)]
    pub statistics: std::collections::BTreeMap<String, String>,
    pub top_mnemonics: Vec<MnemonicCount>,
}

impl CatalogStatistics {
    /// Parse a numeric statistic, treating missing or non-numeric values as absent
    pub fn count(&self, name: &str) -> Option<i64> {
        self.statistics.get(name).and_then(|v| v.parse().ok())
    }
}

/// Counters collected while normalizing source records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub records_read: usize,
    pub records_normalized: usize,
    pub records_dropped: usize,
    pub unparsed_dates: usize,
}

/// Processing statistics for a complete load run
#[derive(Debug, Default)]
pub struct LoadStats {
    pub records_read: usize,
    pub records_inserted: usize,
    pub records_dropped: usize,
    pub statistics_written: usize,
    pub encoding: String,
    pub database_path: PathBuf,
    pub processing_time_ms: u128,
}
