//! Batch digest stage: indexed sub-checksums per item, concatenated in index order.

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::sync::Arc;
use std::thread;

use crate::engine::hashing::DigestSuite;
use crate::types::{Payload, StageFn};
use crate::utils::config::PipelineConsts;

use super::order::{Turnstile, join_unit};

const STAGE: &str = "batch digest";

/// Build the batch digest stage.
///
/// For each input string `s` at 1-based arrival index `k`, a unit thread
/// computes `fast_checksum(i.to_string() + s)` for every index in
/// `0..`[`PipelineConsts::BATCH_WIDTH`] concurrently, concatenates the results
/// in index order, and writes the concatenation at turn `k`. Output order
/// across items matches input order; within an item the index order is fixed
/// no matter which sub-checksum finishes first.
///
/// A non-text payload is a contract violation and panics the stage.
pub fn batch_digest_stage(suite: Arc<dyn DigestSuite>) -> StageFn {
    Box::new(move |input: Receiver<Payload>, output: Sender<Payload>| {
        let turnstile = Arc::new(Turnstile::new());
        let mut units = Vec::new();
        let mut seq = 0_u64;

        while let Ok(payload) = input.recv() {
            let text = payload.into_text(STAGE);
            seq += 1;
            let suite = Arc::clone(&suite);
            let turnstile = Arc::clone(&turnstile);
            let output = output.clone();
            units.push(thread::spawn(move || {
                batch_unit(text, seq, suite, turnstile, output)
            }));
        }

        debug!("{STAGE}: input closed after {seq} items, joining units");
        for unit in units {
            join_unit(unit);
        }
    })
}

/// One unit: indices 1.. on sub-threads, index 0 on the unit's own thread.
/// Joining in spawn order is both the unit-scoped completion barrier and what
/// pins the concatenation to index order.
fn batch_unit(
    text: String,
    seq: u64,
    suite: Arc<dyn DigestSuite>,
    turnstile: Arc<Turnstile>,
    output: Sender<Payload>,
) {
    let subs: Vec<_> = (1..PipelineConsts::BATCH_WIDTH)
        .map(|idx| {
            let suite = Arc::clone(&suite);
            let text = text.clone();
            thread::spawn(move || suite.fast_checksum(&format!("{idx}{text}")))
        })
        .collect();

    let mut combined = suite.fast_checksum(&format!("0{text}"));
    for sub in subs {
        combined.push_str(&join_unit(sub));
    }

    turnstile.wait_turn(seq);
    let _ = output.send(Payload::Text(combined));
    turnstile.advance();
}
