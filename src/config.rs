//! Configuration management and validation.
//!
//! Provides the run configuration for loading and browsing the catalog,
//! including the explicit description of expected source columns.

use crate::constants::{
    DEFAULT_DATABASE_PATH, DEFAULT_SEARCH_LIMIT, DEFAULT_SKIP_LINES, DEFAULT_SOURCE_PATH,
    DEFAULT_TOP_MNEMONICS, source_columns,
};
use crate::error::{MdrmError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Catalog fields that are populated from a source column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogField {
    Mnemonic,
    ItemCode,
    StartDate,
    EndDate,
    ItemName,
    Confidentiality,
    ItemType,
    ReportingForm,
    Description,
    SeriesGlossary,
}

impl CatalogField {
    /// Every source-backed field, in insert column order
    pub const ALL: [CatalogField; 10] = [
        CatalogField::Mnemonic,
        CatalogField::ItemCode,
        CatalogField::StartDate,
        CatalogField::EndDate,
        CatalogField::ItemName,
        CatalogField::Confidentiality,
        CatalogField::ItemType,
        CatalogField::ReportingForm,
        CatalogField::Description,
        CatalogField::SeriesGlossary,
    ];

    /// Column name in the catalog table
    pub fn column_name(&self) -> &'static str {
        match self {
            CatalogField::Mnemonic => "mnemonic",
            CatalogField::ItemCode => "item_code",
            CatalogField::StartDate => "start_date",
            CatalogField::EndDate => "end_date",
            CatalogField::ItemName => "item_name",
            CatalogField::Confidentiality => "confidentiality",
            CatalogField::ItemType => "item_type",
            CatalogField::ReportingForm => "reporting_form",
            CatalogField::Description => "description",
            CatalogField::SeriesGlossary => "series_glossary",
        }
    }

    /// Default header name in the MDRM export
    pub fn default_source_name(&self) -> &'static str {
        match self {
            CatalogField::Mnemonic => source_columns::MNEMONIC,
            CatalogField::ItemCode => source_columns::ITEM_CODE,
            CatalogField::StartDate => source_columns::START_DATE,
            CatalogField::EndDate => source_columns::END_DATE,
            CatalogField::ItemName => source_columns::ITEM_NAME,
            CatalogField::Confidentiality => source_columns::CONFIDENTIALITY,
            CatalogField::ItemType => source_columns::ITEM_TYPE,
            CatalogField::ReportingForm => source_columns::REPORTING_FORM,
            CatalogField::Description => source_columns::DESCRIPTION,
            CatalogField::SeriesGlossary => source_columns::SERIES_GLOSSARY,
        }
    }
}

/// Whether a source column is expected in every export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRequirement {
    /// Expected; absence is logged as a warning and the field degrades to null
    Required,
    /// May legitimately be missing; absence is logged at debug
    Optional,
}

/// Mapping of one catalog field to its source header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub field: CatalogField,
    pub source_name: String,
    pub requirement: ColumnRequirement,
}

/// Description of the expected source columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub mappings: Vec<ColumnMapping>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        let mappings = CatalogField::ALL
            .iter()
            .map(|field| ColumnMapping {
                field: *field,
                source_name: field.default_source_name().to_string(),
                requirement: match field {
                    CatalogField::Mnemonic
                    | CatalogField::ItemCode
                    | CatalogField::ItemName
                    | CatalogField::StartDate
                    | CatalogField::EndDate => ColumnRequirement::Required,
                    _ => ColumnRequirement::Optional,
                },
            })
            .collect();

        Self { mappings }
    }
}

impl ColumnSpec {
    /// Override the source header name for a field
    pub fn with_source_name(mut self, field: CatalogField, source_name: impl Into<String>) -> Self {
        if let Some(mapping) = self.mappings.iter_mut().find(|m| m.field == field) {
            mapping.source_name = source_name.into();
        }
        self
    }

    pub fn mapping(&self, field: CatalogField) -> Option<&ColumnMapping> {
        self.mappings.iter().find(|m| m.field == field)
    }
}

/// Global configuration for loading and browsing the MDRM catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdrmConfig {
    /// MDRM CSV export to ingest
    pub source_path: PathBuf,

    /// SQLite database to create (replaced on every load)
    pub database_path: PathBuf,

    /// Descriptive lines to skip before the header row
    pub skip_lines: usize,

    /// Expected source columns
    pub columns: ColumnSpec,

    /// Show a progress bar while inserting rows
    pub show_progress: bool,

    /// Default maximum number of search results
    pub search_limit: usize,

    /// Number of mnemonics in the statistics frequency list
    pub top_mnemonics: usize,
}

impl Default for MdrmConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            skip_lines: DEFAULT_SKIP_LINES,
            columns: ColumnSpec::default(),
            show_progress: true,
            search_limit: DEFAULT_SEARCH_LIMIT,
            top_mnemonics: DEFAULT_TOP_MNEMONICS,
        }
    }
}

impl MdrmConfig {
    /// Set the source CSV path
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Set the database path
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Set the number of preamble lines to skip
    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    /// Replace the expected column description
    pub fn with_columns(mut self, columns: ColumnSpec) -> Self {
        self.columns = columns;
        self
    }

    /// Disable the insertion progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Set the default search limit
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    /// Set the size of the top mnemonics list
    pub fn with_top_mnemonics(mut self, top: usize) -> Self {
        self.top_mnemonics = top;
        self
    }

    /// Check the configuration before a run
    pub fn validate(&self) -> Result<()> {
        if self.source_path.as_os_str().is_empty() {
            return Err(MdrmError::Configuration {
                message: "source path must not be empty".to_string(),
            });
        }
        if self.database_path.as_os_str().is_empty() {
            return Err(MdrmError::Configuration {
                message: "database path must not be empty".to_string(),
            });
        }
        if self.search_limit == 0 {
            return Err(MdrmError::Configuration {
                message: "search limit must be greater than zero".to_string(),
            });
        }
        if self.top_mnemonics == 0 {
            return Err(MdrmError::Configuration {
                message: "top mnemonics count must be greater than zero".to_string(),
            });
        }

        for field in CatalogField::ALL {
            if self.columns.mapping(field).is_none() {
                return Err(MdrmError::Configuration {
                    message: format!("no source column mapping for {}", field.column_name()),
                });
            }
        }

        debug!(
            "Configuration validated: source={}, database={}, skip_lines={}",
            self.source_path.display(),
            self.database_path.display(),
            self.skip_lines
        );
        Ok(())
    }
}
