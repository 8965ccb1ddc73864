//! Per-item digest stage: one concurrent unit per input integer.

use crossbeam_channel::{Receiver, Sender};
use log::debug;
use std::sync::Arc;
use std::thread;

use crate::engine::hashing::DigestSuite;
use crate::types::{Payload, StageFn};

use super::order::{Turnstile, join_unit};

const STAGE: &str = "per-item digest";

/// Build the per-item digest stage.
///
/// For each integer `v` at 1-based arrival index `k`, a unit thread computes
/// `fast_checksum(v) + fast_checksum(slow_digest(v))` and writes it at turn
/// `k`, so output order matches input order however the units interleave.
/// One unit per item, no cap. The stage returns (closing its output) only
/// after the input stream is exhausted and every unit has written.
///
/// A non-integer payload is a contract violation and panics the stage.
pub fn item_digest_stage(suite: Arc<dyn DigestSuite>) -> StageFn {
    Box::new(move |input: Receiver<Payload>, output: Sender<Payload>| {
        let turnstile = Arc::new(Turnstile::new());
        let mut units = Vec::new();
        let mut seq = 0_u64;

        while let Ok(payload) = input.recv() {
            let value = payload.into_int(STAGE);
            seq += 1;
            let text = value.to_string();
            let suite = Arc::clone(&suite);
            let turnstile = Arc::clone(&turnstile);
            let output = output.clone();
            units.push(thread::spawn(move || {
                digest_unit(text, seq, suite, turnstile, output)
            }));
        }

        debug!("{STAGE}: input closed after {seq} items, joining units");
        for unit in units {
            join_unit(unit);
        }
    })
}

/// One unit. The slow digest runs on the unit's own thread first; only then
/// does the side thread checksum its result (the side task depends on it),
/// overlapped with the direct checksum of the plain value here.
fn digest_unit(
    text: String,
    seq: u64,
    suite: Arc<dyn DigestSuite>,
    turnstile: Arc<Turnstile>,
    output: Sender<Payload>,
) {
    let slow = suite.slow_digest(&text);
    let side = {
        let suite = Arc::clone(&suite);
        thread::spawn(move || suite.fast_checksum(&slow))
    };
    let direct = suite.fast_checksum(&text);
    let of_slow = join_unit(side);

    turnstile.wait_turn(seq);
    let _ = output.send(Payload::Text(direct + &of_slow));
    turnstile.advance();
}
