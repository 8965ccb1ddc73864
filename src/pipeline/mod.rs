//! Pipeline components: executor, write-order turnstile, and the built-in stages.

pub mod batch_digest;
pub mod combine;
pub mod executor;
pub mod item_digest;
pub mod order;

pub use batch_digest::batch_digest_stage;
pub use combine::combine_stage;
pub use executor::run_pipeline;
pub use item_digest::item_digest_stage;
pub use order::{Turnstile, join_unit};

use crate::engine::hashing::DigestSuite;
use crate::types::StageFn;
use std::sync::Arc;

/// The standard chain: per-item digest → batch digest → combine. Seed it with
/// integers; the final stream carries exactly one text value, the combined
/// digest.
pub fn standard_stages(suite: Arc<dyn DigestSuite>) -> Vec<StageFn> {
    vec![
        item_digest_stage(Arc::clone(&suite)),
        batch_digest_stage(suite),
        combine_stage(),
    ]
}
