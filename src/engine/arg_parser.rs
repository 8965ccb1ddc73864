use clap::{Parser, Subcommand};
use std::path::PathBuf;

struct DefaultArgs;

impl DefaultArgs {
    pub const DIR: &'static str = ".";
}

/// Concurrent multi-stage digest pipeline.
#[derive(Clone, Parser)]
#[command(name = "hashmill")]
#[command(about = "Digest an integer sequence through a concurrent pipeline, or render a directory tree.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    /// Digest a sequence of integers into one combined string.
    Mill {
        /// Integers to digest, in order. An empty sequence prints an empty digest.
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        values: Vec<i64>,

        /// Add artificial slow-digest latency (milliseconds) to make the stage
        /// overlap visible. The output is unchanged.
        #[arg(long, value_name = "MS")]
        slow_ms: Option<u64>,

        /// Verbose output.
        #[arg(long, short = 'v')]
        verbose: bool,
    },

    /// Print an indented tree of a directory.
    Tree {
        /// Directory to render. Default: current directory.
        #[arg(value_name = "DIR", default_value = DefaultArgs::DIR)]
        dir: PathBuf,

        /// Include regular files, annotated with their byte size.
        #[arg(long, short = 'f')]
        files: bool,

        /// Verbose output.
        #[arg(long, short = 'v')]
        verbose: bool,
    },
}
