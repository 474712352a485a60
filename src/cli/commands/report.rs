//! Report command: run the standard exploration queries

use super::shared::print_report;
use crate::explorer::Explorer;
use crate::reports::run_reports;
use chrono::Local;
use colored::*;
use std::path::Path;

pub fn run_report(database: &Path) -> anyhow::Result<()> {
    let explorer = Explorer::open(database)?;
    let reports = run_reports(&explorer, Local::now().date_naive())?;

    println!("{}", "MDRM Database Reports".bright_green().bold());
    for report in &reports {
        print_report(report);
    }
    Ok(())
}
