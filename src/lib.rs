//! Hashmill: concurrent multi-stage digest pipeline with ordered fan-out

pub mod engine;
pub mod pipeline;
pub mod tree;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::sync::Arc;
use std::time::Duration;

use engine::hashing::{Blake3Md5, DigestSuite, ThrottledSuite, default_suite};

/// Result alias used by public hashmill API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: digest `values` through the standard pipeline and
/// return the combined string.
///
/// The chain is per-item digest → batch digest → combine. One concurrent unit
/// per value computes `fast_checksum(v) + fast_checksum(slow_digest(v))`;
/// each of those strings fans out into six indexed checksums concatenated in
/// index order; the per-item results are then sorted and `_`-joined. Every
/// stage emits in input order despite the fan-out, so the result depends only
/// on `values`: two runs over the same sequence are byte-identical.
///
/// Uses the reference [`Blake3Md5`] suite, throttled when
/// `opts.slow_delay_ms` is set; [`mill_with_suite`] accepts caller-supplied
/// primitives instead. Spawns threads proportional to `values.len()`.
///
/// ```
/// let combined = hashmill::mill(&[7, 42], &hashmill::MillOpts::default());
/// assert_eq!(combined.split('_').count(), 2);
/// ```
pub fn mill(values: &[i64], opts: &MillOpts) -> String {
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );
    let suite: Arc<dyn DigestSuite> = match opts.slow_delay_ms {
        Some(ms) => Arc::new(ThrottledSuite::new(Blake3Md5, Duration::from_millis(ms))),
        None => default_suite(),
    };
    mill_with_suite(values, suite)
}

/// [`mill`] with caller-supplied digest primitives: same standard chain, any
/// [`DigestSuite`]. This is the collaborator boundary; the pipeline only
/// composes the suite's outputs and never inspects them.
pub fn mill_with_suite(values: &[i64], suite: Arc<dyn DigestSuite>) -> String {
    let seed: Vec<Payload> = values.iter().copied().map(Payload::Int).collect();
    let drained = pipeline::run_pipeline(seed, pipeline::standard_stages(suite));
    match drained.into_iter().next_back() {
        Some(payload) => payload.into_text("pipeline result"),
        None => String::new(),
    }
}
