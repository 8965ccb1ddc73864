//! Pipeline executor: chain stages with streams, run them, drain the result.

use crossbeam_channel::unbounded;
use log::debug;
use std::mem;
use std::thread;

use crate::types::{Payload, StageFn};

use super::order::join_unit;

/// Run `stages` as a chain of concurrently executing threads.
///
/// Creates one unbounded stream per hand-off (n+1 for n stages), seeds the
/// first with `seed` and closes it, wires each stage's receiver to the
/// previous stream and its sender to the next, then blocks draining the final
/// stream until every producer is gone. Returns the drained values in write
/// order; for the standard chain that is a single value, the combined digest.
/// With zero stages the seed drains straight through.
///
/// Failure semantics are fail-fast: after draining, the stage threads are
/// joined and the first panic among them is re-raised here, so a contract
/// violation in any stage aborts the whole run and no partial result reaches
/// the caller.
pub fn run_pipeline(seed: Vec<Payload>, stages: Vec<StageFn>) -> Vec<Payload> {
    let stage_count = stages.len();

    let (seed_tx, mut tail) = unbounded::<Payload>();
    for payload in seed {
        let _ = seed_tx.send(payload);
    }
    drop(seed_tx);

    let mut handles = Vec::with_capacity(stage_count);
    for stage in stages {
        let (tx, rx) = unbounded::<Payload>();
        let input = mem::replace(&mut tail, rx);
        handles.push(thread::spawn(move || stage(input, tx)));
    }

    let mut drained = Vec::new();
    while let Ok(payload) = tail.recv() {
        drained.push(payload);
    }
    debug!(
        "executor: final stream closed, {} value(s) out of {} stage(s)",
        drained.len(),
        stage_count
    );

    for handle in handles {
        join_unit(handle);
    }

    drained
}
