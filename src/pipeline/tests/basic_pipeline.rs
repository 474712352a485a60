//! Basic pipeline integration tests

use super::{SAMPLE_ROWS, config_for, today, write_export};
use crate::explorer::{Explorer, SearchField};
use crate::pipeline::Pipeline;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Catalog rows without the load-specific columns
fn fact_rows(db_path: &Path) -> Vec<Vec<Option<String>>> {
    let conn = Connection::open(db_path).unwrap();
    let mut stmt = conn
        .prepare(
            "SELECT mdrm_identifier, mnemonic, item_code, start_date, end_date, item_name, \
             confidentiality, item_type, reporting_form, description, series_glossary \
             FROM mdrm_data ORDER BY id",
        )
        .unwrap();
    let rows = stmt
        .query_map([], |row| {
            (0..11)
                .map(|i| row.get::<_, Option<String>>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap();
    rows
}

fn summary_pairs(db_path: &Path) -> Vec<(String, String)> {
    let conn = Connection::open(db_path).unwrap();
    let mut stmt = conn
        .prepare("SELECT statistic_name, statistic_value FROM mdrm_summary ORDER BY statistic_name")
        .unwrap();
    let pairs = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap();
    pairs
}

#[test]
fn test_basic_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_export(temp_dir.path(), "MDRM_CSV.csv", SAMPLE_ROWS);
    let config = config_for(&temp_dir, source);

    let stats = Pipeline::new(config.clone()).run_with_date(today()).unwrap();

    assert_eq!(stats.records_read, 5);
    assert_eq!(stats.records_inserted, 5);
    assert_eq!(stats.records_dropped, 0);
    assert_eq!(stats.encoding, "UTF-8");
    assert_eq!(stats.database_path, config.database_path);
    assert!(config.database_path.exists());
}

#[test]
fn test_normalized_values_are_stored() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_export(temp_dir.path(), "MDRM_CSV.csv", SAMPLE_ROWS);
    let config = config_for(&temp_dir, source);
    Pipeline::new(config.clone()).run_with_date(today()).unwrap();

    let explorer = Explorer::open(&config.database_path).unwrap();
    let record = explorer.details("RCON2170").unwrap().unwrap();
    assert_eq!(record.start_date.unwrap().to_string(), "1976-01-01");
    assert_eq!(record.end_date.unwrap().to_string(), "9999-12-31");
    assert_eq!(record.description.as_deref(), Some("Total assets\nas reported"));
    assert!(record.created_at.is_some());

    let equity = explorer.details("RCON3210").unwrap().unwrap();
    assert_eq!(equity.description.as_deref(), Some("Equity & surplus"));

    let income = explorer.details("RIAD4340").unwrap().unwrap();
    assert_eq!(income.end_date, None);
    assert_eq!(income.confidentiality, None);
    assert_eq!(income.reporting_form, None);
}

#[test]
fn test_total_assets_lookup() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_export(temp_dir.path(), "MDRM_CSV.csv", SAMPLE_ROWS);
    let config = config_for(&temp_dir, source);
    Pipeline::new(config.clone()).run_with_date(today()).unwrap();

    let explorer = Explorer::open(&config.database_path).unwrap();
    let results = explorer.search("assets", SearchField::ItemName, 50).unwrap();
    let mut identifiers: Vec<_> = results
        .iter()
        .filter_map(|r| r.mdrm_identifier.as_deref())
        .collect();
    identifiers.sort();
    assert_eq!(identifiers, vec!["RCFD2170", "RCON2170"]);

    assert!(explorer.details("NOPE0000").unwrap().is_none());
}

#[test]
fn test_reload_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_export(temp_dir.path(), "MDRM_CSV.csv", SAMPLE_ROWS);
    let config = config_for(&temp_dir, source);

    Pipeline::new(config.clone()).run_with_date(today()).unwrap();
    let first = fact_rows(&config.database_path);
    let first_summary = summary_pairs(&config.database_path);

    Pipeline::new(config.clone()).run_with_date(today()).unwrap();
    let second = fact_rows(&config.database_path);
    let second_summary = summary_pairs(&config.database_path);

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
    assert!(first_summary.contains(&("total_records".to_string(), "5".to_string())));
    assert_eq!(first_summary, second_summary);
}

#[test]
fn test_trailing_comma_export() {
    let temp_dir = TempDir::new().unwrap();
    let content = format!(
        "PUBLIC\n{},\n{}\n",
        super::HEADER,
        "RCON,2170,1/1/1976 12:00:00 AM,12/31/9999 12:00:00 AM,TOTAL ASSETS,N,F,FFIEC 031,,,"
    );
    let source = temp_dir.path().join("MDRM_CSV.csv");
    fs::write(&source, content).unwrap();

    let stats = Pipeline::new(config_for(&temp_dir, source))
        .run_with_date(today())
        .unwrap();
    assert_eq!(stats.records_inserted, 1);
    assert_eq!(stats.records_dropped, 0);
}

#[test]
fn test_rows_without_trailing_comma_are_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let content = format!(
        "PUBLIC\n{},\n{}\n{}\n",
        super::HEADER,
        "RCON,2170,1/1/1976 12:00:00 AM,12/31/9999 12:00:00 AM,TOTAL ASSETS,N,F,FFIEC 031,,",
        "RCFD,2170,1/1/1976 12:00:00 AM,12/31/9999 12:00:00 AM,TOTAL ASSETS,N,F,FFIEC 031,,,"
    );
    let source = temp_dir.path().join("MDRM_CSV.csv");
    fs::write(&source, content).unwrap();

    let config = config_for(&temp_dir, source);
    let stats = Pipeline::new(config.clone()).run_with_date(today()).unwrap();
    assert_eq!(stats.records_inserted, 2);
    assert_eq!(stats.records_dropped, 0);

    let explorer = Explorer::open(&config.database_path).unwrap();
    let record = explorer.details("RCON2170").unwrap().unwrap();
    assert_eq!(record.reporting_form.as_deref(), Some("FFIEC 031"));
}

#[test]
fn test_windows_1252_export() {
    let temp_dir = TempDir::new().unwrap();
    let mut content = b"PUBLIC\n".to_vec();
    content.extend_from_slice(super::HEADER.as_bytes());
    content.extend_from_slice(b"\nRCON,9999,1/1/2000,12/31/9999,CAF\xC9 LOANS,N,F,,,\n");
    let source = temp_dir.path().join("MDRM_CSV.csv");
    fs::write(&source, content).unwrap();

    let config = config_for(&temp_dir, source);
    let stats = Pipeline::new(config.clone()).run_with_date(today()).unwrap();
    assert_eq!(stats.encoding, "windows-1252");

    let explorer = Explorer::open(&config.database_path).unwrap();
    let record = explorer.details("RCON9999").unwrap().unwrap();
    assert_eq!(record.item_name.as_deref(), Some("CAF\u{c9} LOANS"));
}
