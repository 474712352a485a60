//! Shared components for CLI commands

use crate::cli::args::Args;
use crate::reports::Report;
use anyhow::Context;
use colored::*;
use serde::Serialize;
use tracing::debug;

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mdrm_catalog={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Pretty-print any result as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Print a titled table
pub fn print_report(report: &Report) {
    println!("\n{}", report.title.bright_yellow().bold());
    println!("{}", "-".repeat(report.title.chars().count()).bright_yellow());
    if report.rows.is_empty() {
        println!("{}", "(no rows)".dimmed());
    } else {
        print!("{}", report.to_table_string());
    }
}

/// Render an optional value for display
pub fn display_or_dash<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}
