//! Command-line build tool for ChesterGL
//!
//! Replacement for the old Makefile: fetches externs, writes the Closure
//! Compiler flag file, compiles `chester.js` and optionally runs JSDoc.

use chester_compiler::BuildPipeline;
use chester_core::ChesterResult;
use clap::Parser;
use log::{debug, info};
use std::process::ExitCode;

mod args;
use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    env_logger::Builder::from_default_env()
        .filter_level(cli.level_filter())
        .format_timestamp_secs()
        .init();
}

fn run(cli: &Cli) -> ChesterResult<()> {
    let config = cli.build_config()?;
    info!(
        "Building ChesterGL ({} mode) into {}",
        config.mode,
        config.output_dir.display()
    );

    let mut pipeline = BuildPipeline::new(config);
    let report = pipeline.run()?;

    debug!("Build report: {:?}", report);
    Ok(())
}
