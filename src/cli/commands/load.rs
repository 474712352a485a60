//! Load command: rebuild the catalog from the CSV export

use crate::cli::args::{Args, LoadArgs};
use crate::pipeline::Pipeline;
use anyhow::Context;
use tracing::{debug, info};

pub fn run_load(args: &Args, load_args: &LoadArgs) -> anyhow::Result<()> {
    let config = load_args.to_config(args);
    debug!("Load configuration: {:?}", config);

    info!("Starting MDRM catalog load");
    let stats = Pipeline::new(config)
        .run()
        .with_context(|| format!("Failed to load {}", load_args.source.display()))?;

    info!(
        "Load finished: {} inserted, {} dropped in {}ms",
        stats.records_inserted, stats.records_dropped, stats.processing_time_ms
    );
    Ok(())
}
