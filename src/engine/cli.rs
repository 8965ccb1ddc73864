//! CLI command handlers: `mill` runs the digest pipeline, `tree` renders a directory.

use anyhow::Result;
use log::debug;
use std::path::Path;
use std::time::Instant;

use crate::engine::arg_parser::{Cli, Commands};
use crate::tree;
use crate::types::MillOpts;
use crate::utils::setup_logging;

/// Dispatch the parsed command line.
pub fn handle_run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Mill {
            values,
            slow_ms,
            verbose,
        } => handle_mill(values, *slow_ms, *verbose),
        Commands::Tree { dir, files, verbose } => handle_tree(dir, *files, *verbose),
    }
}

/// Run the digest pipeline over `values` and print the combined digest.
fn handle_mill(values: &[i64], slow_ms: Option<u64>, verbose: bool) -> Result<()> {
    setup_logging(verbose);
    let opts = MillOpts {
        slow_delay_ms: slow_ms,
    };
    let started = Instant::now();
    let combined = crate::mill(values, &opts);
    debug!("milled {} value(s) in {:?}", values.len(), started.elapsed());
    println!("{combined}");
    Ok(())
}

/// Render the tree of `dir` and print it.
fn handle_tree(dir: &Path, files: bool, verbose: bool) -> Result<()> {
    setup_logging(verbose);
    let rendered = tree::render(dir, files)?;
    print!("{rendered}");
    Ok(())
}
