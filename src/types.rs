//! Public and internal types for the hashmill API and pipeline.

use crossbeam_channel::{Receiver, Sender};

/// One value carried on a pipeline stream.
///
/// Streams are payload-generic so stages compose in any order; each stage
/// checks the variant it consumes. Receiving the wrong variant is a
/// programming-contract violation and panics immediately (see
/// [`Payload::into_int`] / [`Payload::into_text`]); there is no recoverable
/// wrong-payload path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Int(i64),
    Text(String),
}

impl Payload {
    /// Variant name for log and panic messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Int(_) => "integer",
            Payload::Text(_) => "text",
        }
    }

    /// Unwrap an integer payload.
    ///
    /// # Panics
    /// When the payload is not an integer. `stage` names the consumer in the
    /// panic message; the panic aborts the whole pipeline run.
    pub fn into_int(self, stage: &str) -> i64 {
        match self {
            Payload::Int(v) => v,
            other => panic!("{stage}: integer payload expected, got {}", other.kind()),
        }
    }

    /// Unwrap a text payload.
    ///
    /// # Panics
    /// When the payload is not text. Same fail-fast contract as
    /// [`Payload::into_int`].
    pub fn into_text(self, stage: &str) -> String {
        match self {
            Payload::Text(s) => s,
            other => panic!("{stage}: text payload expected, got {}", other.kind()),
        }
    }
}

/// A pipeline stage: owns exactly one input stream and one output stream.
///
/// A stage returns only after all input has been consumed and every unit it
/// spawned has written its output; dropping the `Sender` on return is what
/// closes the stage's output stream. Built-in stages live in
/// [`crate::pipeline`]; callers may pass any closure with this shape to
/// [`run_pipeline`](crate::pipeline::run_pipeline).
pub type StageFn = Box<dyn FnOnce(Receiver<Payload>, Sender<Payload>) + Send + 'static>;

/// Options for [`mill`](crate::mill). Only the knobs that apply when using
/// the crate with the reference digest suite.
#[derive(Clone, Debug, Default)]
pub struct MillOpts {
    /// Artificial latency added to every slow digest, in milliseconds.
    /// Makes the stage overlap observable (the combined output is unchanged).
    pub slow_delay_ms: Option<u64>,
}
