//! Digest primitives composed by the pipeline stages.

use md5::{Digest, Md5};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::utils::config::DigestConsts;

/// The two string→string digest primitives the pipeline composes.
///
/// Both must be pure, deterministic, and panic-free for any input string; the
/// pipeline never inspects their internals, only concatenates and sorts their
/// outputs. `slow_digest` is the dominant-cost operation and is the one the
/// per-item stage parallelizes hardest.
pub trait DigestSuite: Send + Sync {
    /// Cheap keyed checksum of `s`.
    fn fast_checksum(&self, s: &str) -> String;
    /// Expensive digest of `s`.
    fn slow_digest(&self, s: &str) -> String;
}

/// Reference suite: keyed blake3 as the fast checksum, MD5 as the slow digest.
///
/// Outputs are lowercase hex, fixed widths [`DigestConsts::FAST_HEX_LEN`] and
/// [`DigestConsts::SLOW_HEX_LEN`]. The blake3 key is a crate-wide constant,
/// so outputs are stable across runs and hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Md5;

impl DigestSuite for Blake3Md5 {
    fn fast_checksum(&self, s: &str) -> String {
        blake3::keyed_hash(&DigestConsts::CHECKSUM_KEY, s.as_bytes())
            .to_hex()
            .to_string()
    }

    fn slow_digest(&self, s: &str) -> String {
        format!("{:x}", Md5::digest(s.as_bytes()))
    }
}

/// Wraps a suite and sleeps before every `slow_digest` call.
///
/// Digest values are untouched; only latency is added, so the pipeline's
/// ordering behavior can be observed (CLI `--slow-ms`) or stress-tested
/// without changing any output byte.
pub struct ThrottledSuite<S> {
    inner: S,
    delay: Duration,
}

impl<S> ThrottledSuite<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

impl<S: DigestSuite> DigestSuite for ThrottledSuite<S> {
    fn fast_checksum(&self, s: &str) -> String {
        self.inner.fast_checksum(s)
    }

    fn slow_digest(&self, s: &str) -> String {
        thread::sleep(self.delay);
        self.inner.slow_digest(s)
    }
}

/// Suite used when the caller does not supply one.
pub fn default_suite() -> Arc<dyn DigestSuite> {
    Arc::new(Blake3Md5)
}
