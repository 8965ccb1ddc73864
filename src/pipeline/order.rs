//! Write-order turnstile: lets a stage's concurrent units emit in input order.

use std::panic;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crate::utils::config::PipelineConsts;

/// Grants stream-write turns to a stage's units in sequence-number order.
///
/// Holds "the sequence number allowed to write next", starting at
/// [`PipelineConsts::FIRST_SEQ`]. A unit spawned for input k calls
/// [`wait_turn(k)`](Self::wait_turn) before writing its output and
/// [`advance`](Self::advance) immediately after, so writes reach the output
/// stream in input arrival order no matter which unit finishes computing
/// first.
///
/// The wait is a busy-spin that yields the thread on every iteration: it
/// consumes CPU until the turn arrives. Waiters are bounded by the stage's
/// in-flight units and each turn window is one stream write long. One
/// turnstile belongs to exactly one stage of one run; never share it wider.
pub struct Turnstile {
    next_seq: AtomicU64,
}

impl Turnstile {
    pub fn new() -> Self {
        Self {
            next_seq: AtomicU64::new(PipelineConsts::FIRST_SEQ),
        }
    }

    /// Spin, yielding, until the counter reaches `seq`.
    pub fn wait_turn(&self, seq: u64) {
        while self.next_seq.load(Ordering::Acquire) != seq {
            thread::yield_now();
        }
    }

    /// Hand the turn to the next sequence number. Called exactly once per
    /// unit, right after its write; skipping it stalls every later unit.
    pub fn advance(&self) {
        self.next_seq.fetch_add(1, Ordering::Release);
    }
}

impl Default for Turnstile {
    fn default() -> Self {
        Self::new()
    }
}

/// Join a spawned unit, re-raising its panic on the calling thread.
///
/// Keeps the fail-fast contract: a unit's panic is never swallowed into a
/// `Result`, it takes the joining thread (and with it the run) down too.
pub fn join_unit<T>(handle: JoinHandle<T>) -> T {
    match handle.join() {
        Ok(value) => value,
        Err(payload) => panic::resume_unwind(payload),
    }
}
