//! Candidate scoring for organization matching.
//!
//! Combines name similarity, state and city agreement, geographic distance
//! and date plausibility into one additive integer score per
//! (input record, candidate) pair. Every applied delta is recorded as a
//! `ScoreSignal`; every signal that could not be evaluated is recorded as a
//! `ScoreIssue`.

pub mod bands;
pub mod dates;
pub mod scorer;

use serde::{Deserialize, Serialize};

pub use bands::{distance_delta, magnitude_delta, name_band_delta, plausibility_penalty};
pub use dates::{date_diff_years, ReferenceDate};
pub use scorer::CandidateScorer;

/// Configuration for the candidate scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Points for a state agreement
    pub state_bonus: i32,
    /// Points for an exact city agreement
    pub city_bonus: i32,
    /// Divisor turning a day count into years
    pub days_per_year: f64,
    /// Use the reassignment record date when the filing date predates incorporation
    pub reassignment_override: bool,
    /// Only `us_xx` jurisdiction codes supply a state
    pub us_only_jurisdiction: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            state_bonus: 5,
            city_bonus: 5,
            days_per_year: 365.0,
            reassignment_override: true,
            us_only_jurisdiction: true,
        }
    }
}
