//! Summary statistics over a loaded catalog.
//!
//! Computes the fixed count statistics plus one `item_type_<code>` row per
//! distinct item type and stores them in the summary table. Active/expired
//! counts are relative to the `today` passed in, so they are a snapshot.

use crate::constants::{CATALOG_TABLE, STORED_DATE_FORMAT, STORED_TIMESTAMP_FORMAT, statistics};
use crate::error::Result;
use crate::models::SummaryStatistic;
use crate::schema::{insert_statistic_statement, summary_ddl};

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Transaction, params};
use tracing::{debug, info};

/// Parameters a fixed statistic query binds
#[derive(Debug, Clone, Copy)]
enum Binding {
    None,
    Today,
}

/// Fixed statistics as (name, aggregate, filter, binding), evaluated in order
const FIXED_STATISTICS: &[(&str, &str, &str, Binding)] = &[
    (statistics::TOTAL_RECORDS, "COUNT(*)", "", Binding::None),
    (
        statistics::UNIQUE_MNEMONICS,
        "COUNT(DISTINCT mnemonic)",
        "",
        Binding::None,
    ),
    (
        statistics::UNIQUE_ITEM_CODES,
        "COUNT(DISTINCT item_code)",
        "",
        Binding::None,
    ),
    (
        statistics::UNIQUE_REPORTING_FORMS,
        "COUNT(DISTINCT reporting_form)",
        "WHERE reporting_form IS NOT NULL AND reporting_form != ''",
        Binding::None,
    ),
    (
        statistics::CONFIDENTIAL_ITEMS,
        "COUNT(*)",
        "WHERE confidentiality = 'Y'",
        Binding::None,
    ),
    (
        statistics::PUBLIC_ITEMS,
        "COUNT(*)",
        "WHERE confidentiality = 'N'",
        Binding::None,
    ),
    (
        statistics::ACTIVE_ITEMS,
        "COUNT(*)",
        "WHERE end_date > ?1",
        Binding::Today,
    ),
    (
        statistics::EXPIRED_ITEMS,
        "COUNT(*)",
        "WHERE end_date IS NULL OR end_date <= ?1",
        Binding::Today,
    ),
];

fn statistic_query(aggregate: &str, filter: &str) -> String {
    format!("SELECT {} FROM {} {}", aggregate, CATALOG_TABLE, filter)
        .trim_end()
        .to_string()
}

/// Computes and persists summary statistics for a populated catalog
pub struct SummaryAggregator<'c> {
    conn: &'c mut Connection,
}

impl<'c> SummaryAggregator<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }

    /// Create the summary table and fill it
    ///
    /// Runs in one transaction, so a failing query leaves no summary table.
    pub fn compute(
        &mut self,
        today: NaiveDate,
        computed_at: NaiveDateTime,
    ) -> Result<Vec<SummaryStatistic>> {
        let today = today.format(STORED_DATE_FORMAT).to_string();
        let created_at = computed_at.format(STORED_TIMESTAMP_FORMAT).to_string();

        let tx = self.conn.transaction()?;
        tx.execute_batch(&summary_ddl())?;

        let mut computed = Vec::new();
        for (name, aggregate, filter, binding) in FIXED_STATISTICS {
            let sql = statistic_query(aggregate, filter);
            let value: i64 = match binding {
                Binding::None => tx.query_row(&sql, [], |row| row.get(0))?,
                Binding::Today => tx.query_row(&sql, params![today], |row| row.get(0))?,
            };
            debug!("{} = {}", name, value);
            computed.push(SummaryStatistic::new(*name, value));
        }

        computed.extend(item_type_counts(&tx)?);

        {
            let mut stmt = tx.prepare(&insert_statistic_statement())?;
            for stat in &computed {
                stmt.execute(params![stat.name, stat.value, created_at])?;
            }
        }
        tx.commit()?;

        info!("Stored {} summary statistics", computed.len());
        Ok(computed)
    }
}

/// One statistic per distinct non-empty item type
fn item_type_counts(tx: &Transaction<'_>) -> Result<Vec<SummaryStatistic>> {
    let mut stmt = tx.prepare(&format!(
        "SELECT item_type, COUNT(*) FROM {} \
         WHERE item_type IS NOT NULL AND item_type != '' \
         GROUP BY item_type ORDER BY item_type",
        CATALOG_TABLE
    ))?;

    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut stats = Vec::new();
    for row in rows {
        let (item_type, count) = row?;
        stats.push(SummaryStatistic::new(
            format!("{}{}", statistics::ITEM_TYPE_PREFIX, item_type),
            count,
        ));
    }
    Ok(stats)
}
