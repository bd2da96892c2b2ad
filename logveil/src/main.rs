// logveil/src/main.rs
//! Logveil entry point.

use anyhow::Result;
use clap::Parser;

use logveil::cli::Cli;
use logveil::commands::sanitize::{report_stats, run_sanitize, SanitizeOptions};
use logveil::logger;

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));

    let opts = SanitizeOptions {
        config_path: args.config,
        input_path: args.input,
        output_path: args.output,
        lines: args.lines,
        regions: args.region,
        strategy: args.strategy.map(Into::into),
        stats: args.stats,
    };

    if let Some(stats) = run_sanitize(&opts)? {
        report_stats(&stats);
    }
    Ok(())
}
