//! Catalog schema and source column layout.
//!
//! Holds the SQLite DDL for the catalog and summary tables, and resolves
//! the configured column description against a real header row once, so
//! the normalizer never has to ask whether a column exists.

use crate::config::{CatalogField, ColumnRequirement, ColumnSpec};
use crate::constants::{CATALOG_TABLE, SUMMARY_TABLE};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Column definitions of the catalog fact table
const CATALOG_COLUMNS_DDL: &str = r#"
(
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    mdrm_identifier TEXT,
    mnemonic TEXT,
    item_code TEXT,
    start_date DATE,
    end_date DATE,
    item_name TEXT,
    confidentiality TEXT,
    item_type TEXT,
    reporting_form TEXT,
    description TEXT,
    series_glossary TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Secondary indexes on the fields the explorer filters or sorts on
pub const CATALOG_INDEXES: &[(&str, &str)] = &[
    ("idx_mdrm_identifier", "mdrm_identifier"),
    ("idx_mnemonic", "mnemonic"),
    ("idx_item_code", "item_code"),
    ("idx_item_name", "item_name"),
    ("idx_item_type", "item_type"),
    ("idx_reporting_form", "reporting_form"),
    ("idx_start_date", "start_date"),
    ("idx_end_date", "end_date"),
];

/// Column definitions of the key/value summary table
const SUMMARY_COLUMNS_DDL: &str = r#"
(
    statistic_name TEXT PRIMARY KEY,
    statistic_value TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;

/// Columns bound by the bulk insert, in parameter order
pub const INSERT_COLUMNS: &[&str] = &[
    "mdrm_identifier",
    "mnemonic",
    "item_code",
    "start_date",
    "end_date",
    "item_name",
    "confidentiality",
    "item_type",
    "reporting_form",
    "description",
    "series_glossary",
    "created_at",
];

/// Full catalog DDL: table plus indexes
pub fn catalog_ddl() -> String {
    let mut ddl = format!("CREATE TABLE {} {}", CATALOG_TABLE, CATALOG_COLUMNS_DDL.trim());
    ddl.push('\n');
    for (index, column) in CATALOG_INDEXES {
        ddl.push_str(&format!(
            "CREATE INDEX {} ON {}({});\n",
            index, CATALOG_TABLE, column
        ));
    }
    ddl
}

/// DDL for the summary table
pub fn summary_ddl() -> String {
    format!("CREATE TABLE {} {}", SUMMARY_TABLE, SUMMARY_COLUMNS_DDL.trim())
}

/// Parametrized insert statement matching `INSERT_COLUMNS`
pub fn insert_statement() -> String {
    let placeholders: Vec<String> = (1..=INSERT_COLUMNS.len())
        .map(|i| format!("?{}", i))
        .collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        CATALOG_TABLE,
        INSERT_COLUMNS.join(", "),
        placeholders.join(", ")
    )
}

/// Insert statement for the summary table
pub fn insert_statistic_statement() -> String {
    format!(
        "INSERT INTO {} (statistic_name, statistic_value, created_at) VALUES (?1, ?2, ?3)",
        SUMMARY_TABLE
    )
}

/// Position of a catalog field in the source header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSlot {
    Present(usize),
    Absent,
}

impl ColumnSlot {
    pub fn index(&self) -> Option<usize> {
        match self {
            ColumnSlot::Present(index) => Some(*index),
            ColumnSlot::Absent => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, ColumnSlot::Present(_))
    }
}

/// Column spec resolved against a cleaned header row
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    slots: HashMap<CatalogField, ColumnSlot>,
    header_len: usize,
    min_record_len: usize,
}

impl ColumnLayout {
    /// Resolve every configured field against `headers` (already cleaned)
    pub fn resolve(spec: &ColumnSpec, headers: &[String]) -> Self {
        let mut slots = HashMap::new();

        for field in CatalogField::ALL {
            let slot = match spec.mapping(field) {
                Some(mapping) => {
                    match headers.iter().position(|h| h == &mapping.source_name) {
                        Some(index) => ColumnSlot::Present(index),
                        None => {
                            match mapping.requirement {
                                ColumnRequirement::Required => warn!(
                                    "Expected column '{}' not found; {} will be null",
                                    mapping.source_name,
                                    field.column_name()
                                ),
                                ColumnRequirement::Optional => debug!(
                                    "Optional column '{}' not found",
                                    mapping.source_name
                                ),
                            }
                            ColumnSlot::Absent
                        }
                    }
                }
                None => ColumnSlot::Absent,
            };
            slots.insert(field, slot);
        }

        let min_record_len = slots
            .values()
            .filter_map(ColumnSlot::index)
            .max()
            .map_or(0, |index| index + 1);

        let layout = Self {
            slots,
            header_len: headers.len(),
            min_record_len,
        };

        if !layout.can_synthesize_identifier() {
            warn!("Mnemonic or Item Code column missing; MDRM identifiers will be null");
        }

        layout
    }

    pub fn slot(&self, field: CatalogField) -> ColumnSlot {
        self.slots
            .get(&field)
            .copied()
            .unwrap_or(ColumnSlot::Absent)
    }

    /// Number of columns in the resolved header row
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// Fewest fields a record needs to reach every mapped column
    pub fn min_record_len(&self) -> usize {
        self.min_record_len
    }

    /// Identifiers need both halves of the natural key
    pub fn can_synthesize_identifier(&self) -> bool {
        self.slot(CatalogField::Mnemonic).is_present()
            && self.slot(CatalogField::ItemCode).is_present()
    }

    /// Fields that resolved to no source column
    pub fn absent_fields(&self) -> Vec<CatalogField> {
        CatalogField::ALL
            .iter()
            .copied()
            .filter(|f| !self.slot(*f).is_present())
            .collect()
    }
}
