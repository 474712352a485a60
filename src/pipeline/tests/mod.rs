//! Integration tests for the pipeline module
//!
//! Runs the complete load against small MDRM exports written to temp dirs.

pub mod basic_pipeline;

use crate::config::MdrmConfig;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HEADER: &str = "Mnemonic,Item Code,Start Date,End Date,Item Name,Confidentiality,ItemType,Reporting Form,Description,SeriesGlossary";

/// Sample export rows in the published layout
pub const SAMPLE_ROWS: &[&str] = &[
    "RCON,2170,1/1/1976 12:00:00 AM,12/31/9999 12:00:00 AM,TOTAL ASSETS,N,F,FFIEC 031,\"Total assets&#x0D;as reported\",",
    "RCFD,2170,3/31/1984 12:00:00 AM,12/31/9999 12:00:00 AM,TOTAL ASSETS,N,F,FFIEC 031,,",
    "RCON,3210,1/1/2001 12:00:00 AM,6/30/2010 12:00:00 AM,TOTAL EQUITY CAPITAL,N,D,FFIEC 041,Equity &amp; surplus,",
    "RSSD,9001,1/1/1990 12:00:00 AM,12/31/9999 12:00:00 AM,ENTITY ID,Y,S,FR Y-6,,",
    "RIAD,4340,1/1/2022 12:00:00 AM,,NET INCOME,,R,,,",
];

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Write an export with the usual "PUBLIC" preamble line
pub fn write_export(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
    let mut content = String::from("PUBLIC\n");
    content.push_str(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }

    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn config_for(temp_dir: &TempDir, source: PathBuf) -> MdrmConfig {
    MdrmConfig::default()
        .with_source_path(source)
        .with_database_path(temp_dir.path().join("mdrm_database.db"))
        .without_progress()
}
