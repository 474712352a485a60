//! Read-only lookups over a loaded catalog.
//!
//! Substring search, point lookup by MDRM identifier and statistics
//! retrieval. Results are serializable so the CLI can print them as JSON.

use crate::constants::{CATALOG_TABLE, SUMMARY_TABLE};
use crate::error::{MdrmError, Result};
use crate::models::{CatalogRecord, CatalogStatistics, CatalogSummary, MnemonicCount};

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

const SUMMARY_COLUMNS: &str = "mdrm_identifier, mnemonic, item_code, item_name, item_type, \
                               confidentiality, start_date, end_date";

const RECORD_COLUMNS: &str = "id, mdrm_identifier, mnemonic, item_code, start_date, end_date, \
                              item_name, confidentiality, item_type, reporting_form, \
                              description, series_glossary, created_at";

/// Column a free-text search matches against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchField {
    #[default]
    ItemName,
    Mnemonic,
    ItemCode,
}

impl SearchField {
    pub fn column(&self) -> &'static str {
        match self {
            SearchField::ItemName => "item_name",
            SearchField::Mnemonic => "mnemonic",
            SearchField::ItemCode => "item_code",
        }
    }

    fn order_by(&self) -> &'static str {
        match self {
            SearchField::ItemName | SearchField::Mnemonic => "item_name",
            SearchField::ItemCode => "mnemonic, item_name",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SearchField {
    type Err = MdrmError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "item_name" => Ok(SearchField::ItemName),
            "mnemonic" => Ok(SearchField::Mnemonic),
            "item_code" => Ok(SearchField::ItemCode),
            _ => Err(MdrmError::InvalidSearchField {
                field: s.to_string(),
            }),
        }
    }
}

/// Read-only handle on a catalog database
#[derive(Debug)]
pub struct Explorer {
    conn: Connection,
}

impl Explorer {
    /// Open an existing catalog read-only
    pub fn open(db_path: &Path) -> Result<Self> {
        if !db_path.exists() {
            return Err(MdrmError::DatabaseNotFound {
                path: db_path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!("Opened {} read-only", db_path.display());
        Ok(Self { conn })
    }

    /// Wrap an already-open connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Case-insensitive substring search on `field`
    ///
    /// A blank query lists the most recently started items instead.
    pub fn search(
        &self,
        query: &str,
        field: SearchField,
        limit: usize,
    ) -> Result<Vec<CatalogSummary>> {
        let query = query.trim();
        let limit = sql_limit(limit);

        if query.is_empty() {
            let sql = format!(
                "SELECT {} FROM {} ORDER BY start_date DESC LIMIT ?1",
                SUMMARY_COLUMNS, CATALOG_TABLE
            );
            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params![limit], summary_from_row)?;
            return Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?);
        }

        let sql = format!(
            "SELECT {} FROM {} WHERE {} LIKE ?1 ESCAPE '\\' ORDER BY {} LIMIT ?2",
            SUMMARY_COLUMNS,
            CATALOG_TABLE,
            field.column(),
            field.order_by()
        );
        let pattern = format!("%{}%", escape_like(query));
        debug!("Searching {} for {:?}", field, pattern);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![pattern, limit], summary_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Full record for an exact MDRM identifier
    ///
    /// Identifiers are not unique; the earliest loaded row wins.
    pub fn details(&self, identifier: &str) -> Result<Option<CatalogRecord>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE mdrm_identifier = ?1 ORDER BY id LIMIT 1",
            RECORD_COLUMNS, CATALOG_TABLE
        );
        Ok(self
            .conn
            .query_row(&sql, params![identifier], record_from_row)
            .optional()?)
    }

    /// All stored summary statistics plus the `top_n` most frequent mnemonics
    pub fn statistics(&self, top_n: usize) -> Result<CatalogStatistics> {
        let mut statistics = BTreeMap::new();
        {
            let mut stmt = self.conn.prepare(&format!(
                "SELECT statistic_name, statistic_value FROM {}",
                SUMMARY_TABLE
            ))?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?;
            for row in rows {
                let (name, value) = row?;
                statistics.insert(name, value.unwrap_or_default());
            }
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT mnemonic, COUNT(*) AS count FROM {} \
             GROUP BY mnemonic ORDER BY count DESC, mnemonic LIMIT ?1",
            CATALOG_TABLE
        ))?;
        let top_mnemonics = stmt
            .query_map(params![sql_limit(top_n)], |row| {
                Ok(MnemonicCount {
                    mnemonic: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(CatalogStatistics {
            statistics,
            top_mnemonics,
        })
    }

    /// Run a static query and stringify every value (NULL becomes "NULL")
    pub fn query_table(&self, sql: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();
        let column_count = columns.len();

        let rows = stmt
            .query_map([], |row| {
                let mut values = Vec::with_capacity(column_count);
                for i in 0..column_count {
                    let value = match row.get::<_, Value>(i)? {
                        Value::Null => "NULL".to_string(),
                        Value::Integer(n) => n.to_string(),
                        Value::Real(f) => f.to_string(),
                        Value::Text(s) => s,
                        Value::Blob(_) => "<blob>".to_string(),
                    };
                    values.push(value);
                }
                Ok(values)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok((columns, rows))
    }
}

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<CatalogSummary> {
    Ok(CatalogSummary {
        mdrm_identifier: row.get(0)?,
        mnemonic: row.get(1)?,
        item_code: row.get(2)?,
        item_name: row.get(3)?,
        item_type: row.get(4)?,
        confidentiality: row.get(5)?,
        start_date: row.get(6)?,
        end_date: row.get(7)?,
    })
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CatalogRecord> {
    Ok(CatalogRecord {
        id: row.get(0)?,
        mdrm_identifier: row.get(1)?,
        mnemonic: row.get(2)?,
        item_code: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        item_name: row.get(6)?,
        confidentiality: row.get(7)?,
        item_type: row.get(8)?,
        reporting_form: row.get(9)?,
        description: row.get(10)?,
        series_glossary: row.get(11)?,
        created_at: row.get(12)?,
    })
}

/// Row limit as a non-negative SQLite integer
fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

/// Escape LIKE wildcards so the query matches literally
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
