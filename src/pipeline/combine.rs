//! Combine stage: sort every batch digest and join into the final result.

use crossbeam_channel::{Receiver, Sender};
use log::debug;

use crate::types::{Payload, StageFn};
use crate::utils::config::PipelineConsts;

const STAGE: &str = "combine";

/// Build the combine stage.
///
/// Purely sequential: drains its whole input, sorts the collected strings
/// bytewise ascending, joins them with [`PipelineConsts::JOIN_SEPARATOR`],
/// and emits the result exactly once; the empty input joins to `""`. This is
/// the only stage whose output is ordered by value rather than by arrival:
/// the sort makes the result invariant under input permutation while keeping
/// duplicates.
///
/// A non-text payload is a contract violation and panics the stage.
pub fn combine_stage() -> StageFn {
    Box::new(move |input: Receiver<Payload>, output: Sender<Payload>| {
        let mut digests = Vec::new();
        while let Ok(payload) = input.recv() {
            digests.push(payload.into_text(STAGE));
        }

        digests.sort();
        debug!("{STAGE}: input closed, joining {} digests", digests.len());
        let _ = output.send(Payload::Text(digests.join(PipelineConsts::JOIN_SEPARATOR)));
    })
}
