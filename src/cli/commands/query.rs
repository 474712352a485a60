//! Read-only lookup commands: search, show and stats

use super::shared::{display_or_dash, print_json, print_report};
use crate::cli::args::{SearchArgs, ShowArgs, StatsArgs};
use crate::config::MdrmConfig;
use crate::explorer::{Explorer, SearchField};
use crate::models::{CatalogRecord, CatalogSummary};
use crate::reports::Report;
use colored::*;
use serde_json::{Value, json};
use tracing::{debug, warn};

pub fn run_search(config: &MdrmConfig, args: &SearchArgs) -> anyhow::Result<()> {
    config.validate()?;
    let explorer = Explorer::open(&config.database_path)?;

    let results = search_results(&explorer, args, config.search_limit)?;
    debug!("Search matched {} items", results.len());

    if args.json {
        return print_json(&results);
    }

    if results.is_empty() {
        println!("{}", "No matching items found".bright_yellow());
        return Ok(());
    }

    println!(
        "{} {}",
        results.len().to_string().bright_white().bold(),
        "matching items".bright_green()
    );
    print_report(&summary_table(&results));
    Ok(())
}

pub fn run_show(config: &MdrmConfig, args: &ShowArgs) -> anyhow::Result<()> {
    let explorer = Explorer::open(&config.database_path)?;
    let record = explorer.details(&args.identifier)?;

    if args.json {
        return print_json(&record_json(record.as_ref())?);
    }

    match record {
        Some(record) => {
            print_record(&record);
            Ok(())
        }
        None => {
            println!(
                "{} {}",
                "Item not found:".bright_red(),
                args.identifier.bright_white()
            );
            Ok(())
        }
    }
}

pub fn run_stats(config: &MdrmConfig, args: &StatsArgs) -> anyhow::Result<()> {
    config.validate()?;
    let explorer = Explorer::open(&config.database_path)?;
    let stats = explorer.statistics(config.top_mnemonics)?;

    if args.json {
        return print_json(&stats);
    }

    println!("{}", "MDRM Catalog Statistics".bright_green().bold());
    for (name, value) in &stats.statistics {
        println!("  {} {}", format!("{}:", name).bright_cyan(), value.bright_white());
    }

    print_report(&Report {
        title: format!("Top {} Mnemonics", config.top_mnemonics),
        columns: vec!["mnemonic".to_string(), "count".to_string()],
        rows: stats
            .top_mnemonics
            .iter()
            .map(|m| vec![display_or_dash(&m.mnemonic), m.count.to_string()])
            .collect(),
    });
    Ok(())
}

/// An unknown field is logged and yields no results
fn search_results(
    explorer: &Explorer,
    args: &SearchArgs,
    limit: usize,
) -> anyhow::Result<Vec<CatalogSummary>> {
    match args.field.parse::<SearchField>() {
        Ok(field) => Ok(explorer.search(&args.query, field, limit)?),
        Err(e) => {
            warn!("{}", e);
            Ok(Vec::new())
        }
    }
}

fn record_json(record: Option<&CatalogRecord>) -> anyhow::Result<Value> {
    match record {
        Some(record) => Ok(serde_json::to_value(record)?),
        None => Ok(json!({ "error": "Item not found" })),
    }
}

fn summary_table(results: &[CatalogSummary]) -> Report {
    Report {
        title: "Search Results".to_string(),
        columns: ["identifier", "mnemonic", "item_code", "item_name", "type", "start", "end"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        rows: results
            .iter()
            .map(|r| {
                vec![
                    display_or_dash(&r.mdrm_identifier),
                    display_or_dash(&r.mnemonic),
                    display_or_dash(&r.item_code),
                    display_or_dash(&r.item_name),
                    display_or_dash(&r.item_type),
                    display_or_dash(&r.start_date),
                    display_or_dash(&r.end_date),
                ]
            })
            .collect(),
    }
}

fn print_record(record: &CatalogRecord) {
    println!(
        "{}",
        display_or_dash(&record.mdrm_identifier).bright_green().bold()
    );

    let item_type = match record.item_type() {
        Some(kind) => format!("{} ({})", kind.code(), kind.description()),
        None => "-".to_string(),
    };

    let fields = [
        ("Mnemonic:", display_or_dash(&record.mnemonic)),
        ("Item code:", display_or_dash(&record.item_code)),
        ("Item name:", display_or_dash(&record.item_name)),
        ("Item type:", item_type),
        ("Confidential:", display_or_dash(&record.confidentiality)),
        ("Reporting form:", display_or_dash(&record.reporting_form)),
        ("Start date:", display_or_dash(&record.start_date)),
        ("End date:", display_or_dash(&record.end_date)),
        ("Loaded at:", display_or_dash(&record.created_at)),
    ];
    for (label, value) in fields {
        println!("  {} {}", label.bright_cyan(), value);
    }

    if let Some(description) = &record.description {
        println!("\n{}", "Description:".bright_cyan());
        println!("{}", description);
    }
    if let Some(glossary) = &record.series_glossary {
        println!("\n{}", "Series glossary:".bright_cyan());
        println!("{}", glossary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogRow;
    use crate::pipeline::loader::CatalogLoader;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn search_args(query: &str, field: &str) -> SearchArgs {
        SearchArgs {
            query: query.to_string(),
            field: field.to_string(),
            limit: None,
            json: true,
        }
    }

    fn catalog_row() -> CatalogRow {
        CatalogRow {
            mdrm_identifier: Some("RCON2170".to_string()),
            mnemonic: Some("RCON".to_string()),
            item_code: Some("2170".to_string()),
            item_name: Some("TOTAL ASSETS".to_string()),
            ..Default::default()
        }
    }

    fn loaded_at() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn explorer() -> Explorer {
        let mut loader = CatalogLoader::create_in_memory().unwrap();
        loader.load(&[catalog_row()], loaded_at()).unwrap();
        Explorer::from_connection(loader.into_connection())
    }

    #[test]
    fn test_unknown_search_field_gives_empty_result() {
        let explorer = explorer();

        let results = search_results(&explorer, &search_args("ASSETS", "description"), 50).unwrap();
        assert!(results.is_empty());

        let results = search_results(&explorer, &search_args("ASSETS", "item-name"), 50).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_missing_record_json() {
        assert_eq!(record_json(None).unwrap(), json!({ "error": "Item not found" }));

        let record = explorer().details("RCON2170").unwrap();
        let value = record_json(record.as_ref()).unwrap();
        assert_eq!(value["mdrm_identifier"], "RCON2170");
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_show_missing_identifier_succeeds() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("catalog.db");
        let mut loader = CatalogLoader::create(&db_path).unwrap();
        loader.load(&[catalog_row()], loaded_at()).unwrap();
        drop(loader);

        let config = MdrmConfig::default().with_database_path(db_path.clone());
        let args = ShowArgs {
            identifier: "RCON0000".to_string(),
            json: true,
        };
        assert!(run_show(&config, &args).is_ok());
    }

    #[test]
    fn test_zero_search_limit_is_rejected() {
        let config = MdrmConfig::default().with_search_limit(0);
        assert!(run_search(&config, &search_args("ASSETS", "item-name")).is_err());
    }

    #[test]
    fn test_summary_table_shape() {
        let results = vec![CatalogSummary {
            mdrm_identifier: Some("RCON2170".to_string()),
            mnemonic: Some("RCON".to_string()),
            item_code: Some("2170".to_string()),
            item_name: Some("TOTAL ASSETS".to_string()),
            item_type: Some("F".to_string()),
            confidentiality: Some("N".to_string()),
            start_date: NaiveDate::from_ymd_opt(1976, 1, 1),
            end_date: None,
        }];

        let table = summary_table(&results);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].len(), table.columns.len());
        assert_eq!(table.rows[0][5], "1976-01-01");
        assert_eq!(table.rows[0][6], "-");
    }
}
