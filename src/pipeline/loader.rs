//! Catalog loading into a fresh SQLite database.
//!
//! Every load is a full replace: the existing database file (and its
//! journal sidecars) is removed before the schema is created again, and all
//! rows are inserted in a single transaction.

use crate::constants::{
    CATALOG_TABLE, DATABASE_SIDECAR_SUFFIXES, PROGRESS_UPDATE_INTERVAL, STORED_TIMESTAMP_FORMAT,
};
use crate::error::Result;
use crate::models::CatalogRow;
use crate::schema::{catalog_ddl, insert_statement};

use chrono::NaiveDateTime;
use indicatif::{ProgressBar, ProgressStyle};
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Creates the catalog schema and bulk-loads normalized rows
#[derive(Debug)]
pub struct CatalogLoader {
    conn: Connection,
    path: Option<PathBuf>,
    show_progress: bool,
}

impl CatalogLoader {
    /// Replace any database at `db_path` with an empty catalog
    pub fn create(db_path: &Path) -> Result<Self> {
        remove_existing_database(db_path)?;

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        let loader = Self {
            conn,
            path: Some(db_path.to_path_buf()),
            show_progress: false,
        };
        loader.init_schema()?;
        Ok(loader)
    }

    /// Empty catalog in an in-memory database
    pub fn create_in_memory() -> Result<Self> {
        let loader = Self {
            conn: Connection::open_in_memory()?,
            path: None,
            show_progress: false,
        };
        loader.init_schema()?;
        Ok(loader)
    }

    /// Show a progress bar while inserting
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(&catalog_ddl())?;
        debug!("Catalog schema created");
        Ok(())
    }

    /// Insert every row in one transaction and return the stored row count
    ///
    /// Any failed insert rolls the whole transaction back.
    pub fn load(&mut self, rows: &[CatalogRow], loaded_at: NaiveDateTime) -> Result<usize> {
        let created_at = loaded_at.format(STORED_TIMESTAMP_FORMAT).to_string();
        let progress = self.progress_bar(rows.len() as u64);

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&insert_statement())?;
            for (i, row) in rows.iter().enumerate() {
                stmt.execute(params![
                    row.mdrm_identifier,
                    row.mnemonic,
                    row.item_code,
                    row.start_date,
                    row.end_date,
                    row.item_name,
                    row.confidentiality,
                    row.item_type,
                    row.reporting_form,
                    row.description,
                    row.series_glossary,
                    created_at,
                ])?;

                if (i as u64 + 1) % PROGRESS_UPDATE_INTERVAL == 0 {
                    progress.set_position(i as u64 + 1);
                }
            }
        }
        tx.commit()?;
        progress.finish_and_clear();

        let count = self.record_count()?;
        info!(
            "Inserted {} records into {}",
            count,
            self.path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ":memory:".to_string())
        );
        Ok(count)
    }

    /// Number of rows in the catalog table
    pub fn record_count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", CATALOG_TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Hand the connection on to the summary step
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress || len == 0 {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Inserting records");
        pb
    }
}

/// Remove a database file and its journal sidecars if present
pub fn remove_existing_database(db_path: &Path) -> Result<()> {
    if db_path.exists() {
        info!("Removing existing database {}", db_path.display());
        fs::remove_file(db_path)?;
    }

    for suffix in DATABASE_SIDECAR_SUFFIXES {
        let mut sidecar = db_path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = PathBuf::from(sidecar);
        if sidecar.exists() {
            debug!("Removing {}", sidecar.display());
            fs::remove_file(&sidecar)?;
        }
    }

    Ok(())
}
