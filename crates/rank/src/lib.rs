//! Confidence ranking and best-candidate selection.
//!
//! Total scores are rescaled onto a confidence range across the entire
//! batch, floored into buckets, and one candidate is kept per input id.

pub mod batch;
pub mod confidence;
pub mod select;

use serde::{Deserialize, Serialize};

pub use batch::{bucket_histogram, resolve_batch, BatchOutcome};
pub use confidence::{bucket, ConfidenceScale};
pub use select::{select_best, selection_order, RankedCandidate};

/// Configuration for confidence rescaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Confidence of the batch minimum
    pub floor: f64,
    /// Confidence of the batch maximum
    pub ceiling: f64,
    /// Confidence assigned to every pair when all scores are equal
    pub degenerate: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            floor: 1.0,
            ceiling: 10.0,
            degenerate: 1.0,
        }
    }
}
