use clap::Parser;
use mdrm_catalog::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("MDRM Catalog - Federal Reserve Micro Data Reference Manual Loader");
    println!("=================================================================");
    println!();
    println!("Load the MDRM CSV export into a SQLite catalog and search it.");
    println!();
    println!("USAGE:");
    println!("    mdrm <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    load        Load the CSV export, replacing the catalog database");
    println!("    search      Search items by name, mnemonic or item code");
    println!("    show        Show every field of one item");
    println!("    stats       Show summary statistics and top mnemonics");
    println!("    report      Run the standard exploration reports");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    --database <PATH>  Catalog database [default: mdrm_database.db]");
    println!("    -v, --verbose      Enable debug logging");
    println!("    -q, --quiet        Only log warnings and errors");
    println!("    -h, --help         Show help information");
    println!("    -V, --version      Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Build the catalog from the default export:");
    println!("    mdrm load --source MDRM_CSV.csv");
    println!();
    println!("    # Find total assets items:");
    println!("    mdrm search \"total assets\"");
    println!();
    println!("    # Look up one item as JSON:");
    println!("    mdrm show RCON2170 --json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    mdrm <COMMAND> --help");
}
