//! Command implementations for the MDRM catalog CLI
//!
//! Each subcommand lives in its own module. The load command writes the
//! catalog; every other command opens it read-only.

pub mod load;
pub mod query;
pub mod report;
pub mod shared;

pub use shared::setup_logging;

use crate::cli::args::{Args, Commands};

/// Dispatch to the subcommand handler
///
/// Callers handle the no-subcommand case before calling this.
pub fn run(args: Args) -> anyhow::Result<()> {
    setup_logging(&args)?;

    match &args.command {
        Some(Commands::Load(load_args)) => load::run_load(&args, load_args),
        Some(Commands::Search(search_args)) => {
            query::run_search(&search_args.to_config(&args), search_args)
        }
        Some(Commands::Show(show_args)) => query::run_show(&args.base_config(), show_args),
        Some(Commands::Stats(stats_args)) => {
            query::run_stats(&stats_args.to_config(&args), stats_args)
        }
        Some(Commands::Report) => report::run_report(&args.database_path()),
        None => Ok(()),
    }
}
