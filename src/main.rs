//! Hashmill CLI: mill digests an integer sequence; tree renders a directory.

use anyhow::Result;
use clap::Parser;
use hashmill::engine::arg_parser::Cli;
use hashmill::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
