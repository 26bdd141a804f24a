//! Best-name selection across a candidate's current, alternate and former names.

use orglink_model::{CandidateRecord, NameField};
use serde::{Deserialize, Serialize};

use crate::fuzzy::fuzzy_ratio;
use crate::normalize::normalize_name;

/// Trait for name similarity scorers.
///
/// Scores are in `0..=100`; inputs are already normalized.
pub trait Similarity: Send + Sync {
    fn ratio(&self, a: &str, b: &str) -> u8;
}

/// Insertion/deletion edit-distance ratio.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndelRatio;

impl Similarity for IndelRatio {
    fn ratio(&self, a: &str, b: &str) -> u8 {
        fuzzy_ratio(a, b)
    }
}

/// The best name score for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMatch {
    /// `None` when there was nothing to compare
    pub score: Option<u8>,
    pub matched_name: Option<String>,
    pub matched_field: Option<NameField>,
}

impl NameMatch {
    fn missing() -> Self {
        Self {
            score: None,
            matched_name: None,
            matched_field: None,
        }
    }
}

/// Compares a target organization name against every name a candidate has held.
#[derive(Debug, Default, Clone)]
pub struct NameMatcher<S = IndelRatio> {
    similarity: S,
}

impl NameMatcher<IndelRatio> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Similarity> NameMatcher<S> {
    pub fn with_similarity(similarity: S) -> Self {
        Self { similarity }
    }

    /// Normalize `target` and find the candidate name most similar to it.
    pub fn best_match(&self, target: &str, candidate: &CandidateRecord) -> NameMatch {
        self.best_match_normalized(&normalize_name(target), candidate)
    }

    /// Like [`best_match`](Self::best_match) for a target that is already normalized.
    ///
    /// An exact match on the current name returns immediately. Otherwise ties
    /// prefer the current name, then alternates, then former names.
    pub fn best_match_normalized(&self, target: &str, candidate: &CandidateRecord) -> NameMatch {
        if target.is_empty() {
            return NameMatch::missing();
        }

        let mut best = NameMatch::missing();

        let current = normalize_name(&candidate.name);
        if !current.is_empty() {
            let q = self.similarity.ratio(target, &current);
            if q == 100 {
                return NameMatch {
                    score: Some(100),
                    matched_name: Some(current),
                    matched_field: Some(NameField::Current),
                };
            }
            best = NameMatch {
                score: Some(q),
                matched_name: Some(current),
                matched_field: Some(NameField::Current),
            };
        }

        let history = candidate
            .alternative_names
            .iter()
            .map(|name| (name, NameField::Alternate))
            .chain(
                candidate
                    .previous_names
                    .iter()
                    .map(|name| (name, NameField::Former)),
            );

        for (raw, field) in history {
            let name = normalize_name(raw);
            if name.is_empty() {
                continue;
            }
            let score = self.similarity.ratio(target, &name);
            if best.score.map_or(true, |current_best| score > current_best) {
                best = NameMatch {
                    score: Some(score),
                    matched_name: Some(name),
                    matched_field: Some(field),
                };
            }
        }

        best
    }
}
