//! Batch-wide rescaling of total scores.

use serde::{Deserialize, Serialize};

use crate::RankConfig;

/// Running min/max of total scores.
///
/// Partitions of a batch can each build a scale and [`merge`](Self::merge)
/// them; the result is the same as observing every score in one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceScale {
    min: Option<i32>,
    max: Option<i32>,
}

impl ConfidenceScale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scores<I: IntoIterator<Item = i32>>(scores: I) -> Self {
        let mut scale = Self::new();
        for score in scores {
            scale.observe(score);
        }
        scale
    }

    pub fn observe(&mut self, score: i32) {
        self.min = Some(self.min.map_or(score, |min| min.min(score)));
        self.max = Some(self.max.map_or(score, |max| max.max(score)));
    }

    pub fn merge(self, other: Self) -> Self {
        let pick = |a: Option<i32>, b: Option<i32>, f: fn(i32, i32) -> i32| match (a, b) {
            (Some(a), Some(b)) => Some(f(a, b)),
            (a, b) => a.or(b),
        };
        Self {
            min: pick(self.min, other.min, i32::min),
            max: pick(self.max, other.max, i32::max),
        }
    }

    pub fn min(&self) -> Option<i32> {
        self.min
    }

    pub fn max(&self) -> Option<i32> {
        self.max
    }

    /// All observed scores are equal (or nothing was observed).
    pub fn is_degenerate(&self) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => min == max,
            _ => true,
        }
    }

    /// Linear rescale of `score` onto the configured range, rounded to two decimals.
    pub fn confidence(&self, score: i32, config: &RankConfig) -> f64 {
        let (Some(min), Some(max)) = (self.min, self.max) else {
            return config.degenerate;
        };
        if min == max {
            return config.degenerate;
        }
        let fraction = f64::from(score - min) / f64::from(max - min);
        let value = config.floor + (config.ceiling - config.floor) * fraction;
        (value * 100.0).round() / 100.0
    }
}

/// Integer bucket of a confidence value.
pub fn bucket(confidence: f64) -> i32 {
    confidence.floor() as i32
}
