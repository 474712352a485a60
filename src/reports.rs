//! Canned exploration reports.
//!
//! The standard set of example queries shown after a load: summary
//! statistics, sample rows, mnemonic and item type distributions, and
//! date-relative breakdowns.

use crate::constants::{CATALOG_TABLE, RECENT_ITEMS_YEARS, STORED_DATE_FORMAT, SUMMARY_TABLE};
use crate::error::Result;
use crate::explorer::Explorer;
use crate::models::ItemType;

use chrono::{Months, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// A titled query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub title: String,
    pub sql: String,
}

impl ReportQuery {
    fn new(title: &str, sql: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            sql: sql.into(),
        }
    }
}

/// Tabular result of a report query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    /// Render as a left-aligned text table
    pub fn to_table_string(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, value) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(display_value(value).chars().count());
                }
            }
        }

        let format_row = |values: &[String]| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(v, w)| format!("{:<width$}", display_value(v), width = *w))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&format_row(&self.columns));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_row(row));
            out.push('\n');
        }
        out
    }
}

/// Newlines in descriptions would break the table layout
fn display_value(value: &str) -> String {
    value.replace('\n', " ")
}

/// CASE expression mapping item type codes to descriptions
fn item_type_case() -> String {
    let arms: Vec<String> = ["F", "S", "D", "R", "P", "E", "J"]
        .iter()
        .map(|code| {
            format!(
                "WHEN item_type = '{}' THEN '{}'",
                code,
                ItemType::from_code(code).description()
            )
        })
        .collect();
    format!("CASE {} ELSE 'Unknown' END", arms.join(" "))
}

/// The standard report set, with date-relative reports anchored to `today`
pub fn standard_reports(today: NaiveDate) -> Vec<ReportQuery> {
    let today_str = today.format(STORED_DATE_FORMAT).to_string();
    let recent_cutoff = today
        .checked_sub_months(Months::new(12 * RECENT_ITEMS_YEARS as u32))
        .unwrap_or(NaiveDate::MIN)
        .format(STORED_DATE_FORMAT)
        .to_string();

    vec![
        ReportQuery::new(
            "Database Summary Statistics",
            format!(
                "SELECT statistic_name, statistic_value FROM {} ORDER BY statistic_name",
                SUMMARY_TABLE
            ),
        ),
        ReportQuery::new(
            "Sample MDRM Data Records",
            format!(
                "SELECT mdrm_identifier, mnemonic, item_code, item_name, item_type FROM {} LIMIT 10",
                CATALOG_TABLE
            ),
        ),
        ReportQuery::new(
            "Top 15 Mnemonics by Item Count",
            format!(
                "SELECT mnemonic, COUNT(*) AS item_count FROM {} \
                 GROUP BY mnemonic ORDER BY item_count DESC, mnemonic LIMIT 15",
                CATALOG_TABLE
            ),
        ),
        ReportQuery::new(
            "Item Types Distribution",
            format!(
                "SELECT item_type, {} AS type_description, COUNT(*) AS count FROM {} \
                 WHERE item_type IS NOT NULL AND item_type != '' \
                 GROUP BY item_type ORDER BY count DESC, item_type",
                item_type_case(),
                CATALOG_TABLE
            ),
        ),
        ReportQuery::new(
            "Sample Assets-Related Items",
            format!(
                "SELECT mdrm_identifier, mnemonic, item_name, item_type FROM {} \
                 WHERE item_name LIKE '%ASSETS%' ORDER BY mnemonic, item_name LIMIT 10",
                CATALOG_TABLE
            ),
        ),
        ReportQuery::new(
            "Active vs Expired Items",
            format!(
                "SELECT CASE WHEN end_date > '{}' THEN 'Active' ELSE 'Expired' END AS status, \
                 COUNT(*) AS count FROM {} GROUP BY status ORDER BY status",
                today_str, CATALOG_TABLE
            ),
        ),
        ReportQuery::new(
            "Confidentiality Distribution",
            format!(
                "SELECT CASE WHEN confidentiality = 'Y' THEN 'Confidential' \
                 WHEN confidentiality = 'N' THEN 'Public' ELSE 'Unknown' END AS confidentiality_status, \
                 COUNT(*) AS count FROM {} GROUP BY confidentiality_status \
                 ORDER BY confidentiality_status",
                CATALOG_TABLE
            ),
        ),
        ReportQuery::new(
            "Recently Added Items (Last 5 Years)",
            format!(
                "SELECT mdrm_identifier, mnemonic, item_name, start_date FROM {} \
                 WHERE start_date >= '{}' ORDER BY start_date DESC LIMIT 10",
                CATALOG_TABLE, recent_cutoff
            ),
        ),
    ]
}

/// Run every standard report
pub fn run_reports(explorer: &Explorer, today: NaiveDate) -> Result<Vec<Report>> {
    standard_reports(today)
        .into_iter()
        .map(|query| {
            debug!("Running report '{}'", query.title);
            let (columns, rows) = explorer.query_table(&query.sql)?;
            Ok(Report {
                title: query.title,
                columns,
                rows,
            })
        })
        .collect()
}
