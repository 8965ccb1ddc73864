//! Engine module: CLI surface and the digest primitives.

pub mod arg_parser;
pub mod cli;
pub mod hashing;

// Re-export commonly used items
pub use arg_parser::{Cli, Commands};
pub use cli::handle_run;
pub use hashing::{Blake3Md5, DigestSuite, ThrottledSuite, default_suite};
