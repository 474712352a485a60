//! Batch ingestion pipeline.
//!
//! Orchestrates the complete MDRM load: read the source export, normalize
//! its records, replace the catalog database and compute the summary
//! statistics, reporting progress as it goes.

pub mod loader;
pub mod summary;

#[cfg(test)]
pub mod tests;

use self::{loader::CatalogLoader, summary::SummaryAggregator};

use crate::config::MdrmConfig;
use crate::constants::{CATALOG_TABLE, SUMMARY_TABLE};
use crate::error::Result;
use crate::models::LoadStats;
use crate::normalizer::Normalizer;
use crate::source::read_source;

use chrono::{Local, NaiveDate, Utc};
use colored::*;
use std::time::Instant;
use tracing::debug;

/// Runs the full read → normalize → load → summarize batch
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: MdrmConfig,
}

impl Pipeline {
    pub fn new(config: MdrmConfig) -> Self {
        Self { config }
    }

    /// Run the pipeline against today's local date
    pub fn run(&self) -> Result<LoadStats> {
        self.run_with_date(Local::now().date_naive())
    }

    /// Run the pipeline, classifying active/expired items relative to `today`
    pub fn run_with_date(&self, today: NaiveDate) -> Result<LoadStats> {
        self.config.validate()?;
        let start_time = Instant::now();

        println!("{}", "MDRM Database Creator".bright_green().bold());
        println!(
            "  {} {}",
            "Source:".bright_cyan(),
            self.config.source_path.display()
        );
        println!(
            "  {} {}",
            "Database:".bright_cyan(),
            self.config.database_path.display()
        );

        // Step 1: Read the export before touching the existing database
        println!("\n{}", "Reading MDRM CSV file...".bright_yellow());
        let table = read_source(&self.config.source_path, self.config.skip_lines)?;
        println!(
            "  {} {} records ({})",
            "Loaded".bright_green(),
            table.len().to_string().bright_white().bold(),
            table.encoding
        );

        // Step 2: Normalize
        let normalizer = Normalizer::for_table(&self.config.columns, &table);
        let (rows, normalize_stats) = normalizer.normalize_all(&table);
        debug!("Normalize stats: {:?}", normalize_stats);

        // Step 3: Replace the catalog
        println!("\n{}", "Creating SQLite database...".bright_yellow());
        let loaded_at = Utc::now().naive_utc();
        let mut loader = CatalogLoader::create(&self.config.database_path)?
            .with_progress(self.config.show_progress);
        let records_inserted = loader.load(&rows, loaded_at)?;
        println!(
            "  {} {} records",
            "Inserted".bright_green(),
            records_inserted.to_string().bright_white().bold()
        );

        // Step 4: Summary statistics
        println!("\n{}", "Creating summary statistics...".bright_yellow());
        let mut conn = loader.into_connection();
        let statistics = SummaryAggregator::new(&mut conn).compute(today, loaded_at)?;

        let stats = LoadStats {
            records_read: normalize_stats.records_read,
            records_inserted,
            records_dropped: normalize_stats.records_dropped,
            statistics_written: statistics.len(),
            encoding: table.encoding.to_string(),
            database_path: self.config.database_path.clone(),
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        print_summary(&stats);
        Ok(stats)
    }
}

fn print_summary(stats: &LoadStats) {
    println!("\n{}", "Database creation completed successfully!".bright_green().bold());
    println!(
        "  {} {}",
        "Database file:".bright_cyan(),
        stats.database_path.display()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Total records processed:".bright_cyan(),
        stats.records_read.to_string().bright_white().bold()
    );
    if stats.records_dropped > 0 {
        println!(
            "  {} {}",
            "Records dropped:".bright_red(),
            stats.records_dropped.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Statistics written:".bright_cyan(),
        stats.statistics_written.to_string().bright_white()
    );

    println!("\n{}", "Sample queries you can run:".bright_yellow());
    println!("  1. SELECT COUNT(*) FROM {};", CATALOG_TABLE);
    println!("  2. SELECT * FROM {};", SUMMARY_TABLE);
    println!("  3. SELECT DISTINCT mnemonic FROM {} LIMIT 10;", CATALOG_TABLE);
    println!(
        "  4. SELECT * FROM {} WHERE item_name LIKE '%ASSETS%' LIMIT 5;",
        CATALOG_TABLE
    );
}
