//! Command-line argument definitions for the MDRM catalog tool
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::MdrmConfig;
use crate::constants::{DEFAULT_DATABASE_PATH, DEFAULT_SKIP_LINES, DEFAULT_SOURCE_PATH};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the MDRM catalog tool
///
/// Loads the Federal Reserve Micro Data Reference Manual CSV export into a
/// SQLite catalog and answers lookups against it.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mdrm",
    version,
    about = "Load the Federal Reserve MDRM CSV export into SQLite and search it",
    long_about = "Builds a queryable SQLite catalog from the Micro Data Reference Manual \
                  CSV export. Each load fully replaces the database and recomputes the \
                  summary statistics; the search, show, stats and report commands read \
                  the catalog without modifying it."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SQLite catalog database path
    #[arg(
        long = "database",
        value_name = "PATH",
        global = true,
        help = "SQLite catalog database path [default: mdrm_database.db]"
    )]
    pub database: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true, help = "Enable debug logging")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only log warnings and errors, hide progress bars"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Load the MDRM CSV export, replacing the catalog database
    Load(LoadArgs),
    /// Search catalog items by name, mnemonic or item code
    Search(SearchArgs),
    /// Show every field of one item by MDRM identifier
    Show(ShowArgs),
    /// Show the summary statistics and most frequent mnemonics
    Stats(StatsArgs),
    /// Run the standard exploration reports
    Report,
}

/// Arguments for the load command
#[derive(Debug, Clone, ClapArgs)]
pub struct LoadArgs {
    /// MDRM CSV export to read
    #[arg(
        short = 's',
        long = "source",
        value_name = "PATH",
        default_value = DEFAULT_SOURCE_PATH,
        help = "MDRM CSV export to read"
    )]
    pub source: PathBuf,

    /// Lines before the header row
    #[arg(
        long = "skip-lines",
        value_name = "N",
        default_value_t = DEFAULT_SKIP_LINES,
        help = "Preamble lines before the header row"
    )]
    pub skip_lines: usize,

    /// Disable the insert progress bar
    #[arg(long = "no-progress", help = "Disable the insert progress bar")]
    pub no_progress: bool,
}

/// Arguments for the search command
#[derive(Debug, Clone, ClapArgs)]
pub struct SearchArgs {
    /// Text to match; empty lists the most recently started items
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Column to search
    #[arg(
        short = 'f',
        long = "field",
        value_name = "FIELD",
        default_value = "item_name",
        help = "Column to search: item-name, mnemonic or item-code"
    )]
    pub field: String,

    /// Maximum number of results
    #[arg(
        short = 'l',
        long = "limit",
        value_name = "N",
        help = "Maximum number of results [default: 50]"
    )]
    pub limit: Option<usize>,

    /// Print results as JSON
    #[arg(long = "json")]
    pub json: bool,
}

/// Arguments for the show command
#[derive(Debug, Clone, ClapArgs)]
pub struct ShowArgs {
    /// MDRM identifier, e.g. RCON2170
    #[arg(value_name = "IDENTIFIER")]
    pub identifier: String,

    /// Print the record as JSON
    #[arg(long = "json")]
    pub json: bool,
}

/// Arguments for the stats command
#[derive(Debug, Clone, ClapArgs)]
pub struct StatsArgs {
    /// Number of mnemonics to list
    #[arg(
        short = 't',
        long = "top",
        value_name = "N",
        help = "Number of most frequent mnemonics to list [default: 10]"
    )]
    pub top: Option<usize>,

    /// Print statistics as JSON
    #[arg(long = "json")]
    pub json: bool,
}

impl Args {
    /// Log level for the tracing filter
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Database path, falling back to the default location
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH))
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default configuration with the global flags applied
    pub fn base_config(&self) -> MdrmConfig {
        MdrmConfig::default().with_database_path(self.database_path())
    }
}

impl LoadArgs {
    /// Build the pipeline configuration, with CLI flags over defaults
    pub fn to_config(&self, args: &Args) -> MdrmConfig {
        let config = args
            .base_config()
            .with_source_path(self.source.clone())
            .with_skip_lines(self.skip_lines);

        if self.no_progress || !args.show_progress() {
            config.without_progress()
        } else {
            config
        }
    }
}

impl SearchArgs {
    /// Lookup configuration, with `--limit` over the configured default
    pub fn to_config(&self, args: &Args) -> MdrmConfig {
        let config = args.base_config();
        match self.limit {
            Some(limit) => config.with_search_limit(limit),
            None => config,
        }
    }
}

impl StatsArgs {
    /// Lookup configuration, with `--top` over the configured default
    pub fn to_config(&self, args: &Args) -> MdrmConfig {
        let config = args.base_config();
        match self.top {
            Some(top) => config.with_top_mnemonics(top),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_SEARCH_LIMIT, DEFAULT_TOP_MNEMONICS};

    #[test]
    fn test_no_subcommand() {
        let args = Args::try_parse_from(["mdrm"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.database_path(), PathBuf::from(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn test_load_defaults() {
        let args = Args::try_parse_from(["mdrm", "load"]).unwrap();
        let Some(Commands::Load(load)) = &args.command else {
            panic!("expected load command");
        };

        let config = load.to_config(&args);
        assert_eq!(config.source_path, PathBuf::from(DEFAULT_SOURCE_PATH));
        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(config.skip_lines, DEFAULT_SKIP_LINES);
        assert!(config.show_progress);
    }

    #[test]
    fn test_load_overrides() {
        let args = Args::try_parse_from([
            "mdrm",
            "load",
            "--source",
            "export.csv",
            "--database",
            "out/catalog.db",
            "--skip-lines",
            "0",
            "--no-progress",
        ])
        .unwrap();
        let Some(Commands::Load(load)) = &args.command else {
            panic!("expected load command");
        };

        let config = load.to_config(&args);
        assert_eq!(config.source_path, PathBuf::from("export.csv"));
        assert_eq!(config.database_path, PathBuf::from("out/catalog.db"));
        assert_eq!(config.skip_lines, 0);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_search_args() {
        let args =
            Args::try_parse_from(["mdrm", "search", "assets", "--field", "item-code", "--json"])
                .unwrap();
        let Some(Commands::Search(search)) = &args.command else {
            panic!("expected search command");
        };
        assert_eq!(search.query, "assets");
        assert_eq!(search.field, "item-code");
        assert_eq!(search.limit, None);
        assert!(search.json);
        assert_eq!(search.to_config(&args).search_limit, DEFAULT_SEARCH_LIMIT);
    }

    #[test]
    fn test_search_limit_override() {
        let args = Args::try_parse_from(["mdrm", "search", "assets", "-l", "5"]).unwrap();
        let Some(Commands::Search(search)) = &args.command else {
            panic!("expected search command");
        };
        assert_eq!(search.to_config(&args).search_limit, 5);
    }

    #[test]
    fn test_stats_top_from_config() {
        let args = Args::try_parse_from(["mdrm", "stats", "--database", "other.db"]).unwrap();
        let Some(Commands::Stats(stats)) = &args.command else {
            panic!("expected stats command");
        };
        let config = stats.to_config(&args);
        assert_eq!(config.top_mnemonics, DEFAULT_TOP_MNEMONICS);
        assert_eq!(config.database_path, PathBuf::from("other.db"));

        let args = Args::try_parse_from(["mdrm", "stats", "--top", "3"]).unwrap();
        let Some(Commands::Stats(stats)) = &args.command else {
            panic!("expected stats command");
        };
        assert_eq!(stats.to_config(&args).top_mnemonics, 3);
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(Args::try_parse_from(["mdrm"]).unwrap().get_log_level(), "info");
        assert_eq!(Args::try_parse_from(["mdrm", "-v"]).unwrap().get_log_level(), "debug");
        assert_eq!(Args::try_parse_from(["mdrm", "stats", "-q"]).unwrap().get_log_level(), "warn");
        assert!(Args::try_parse_from(["mdrm", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_show_requires_identifier() {
        assert!(Args::try_parse_from(["mdrm", "show"]).is_err());
    }
}
