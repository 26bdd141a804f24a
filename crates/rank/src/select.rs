//! Best-candidate selection per input record.

use std::cmp::Ordering;

use orglink_model::{parse_date, ScoredCandidate, SelectedMatch};
use serde::{Deserialize, Serialize};

/// A scored candidate with its batch-normalized confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub scored: ScoredCandidate,
    pub confidence: f64,
    pub score_bucket: i32,
}

impl RankedCandidate {
    pub fn to_selection(&self) -> SelectedMatch {
        let ScoredCandidate {
            input_id,
            candidate,
            result,
            ..
        } = &self.scored;
        SelectedMatch {
            id: input_id.clone(),
            candidate_name: candidate.name.clone(),
            company_number: candidate.company_number.clone(),
            total_score: result.total_score,
            confidence: self.confidence,
            score_bucket: self.score_bucket,
            matched_field: result.matched_field,
            matched_name: result.matched_name.clone(),
            date_diff_years: result.date_diff_years,
        }
    }
}

/// Selection order: higher bucket, then larger date difference, then later
/// record date. Missing values sort last.
pub fn selection_order(a: &RankedCandidate, b: &RankedCandidate) -> Ordering {
    b.score_bucket
        .cmp(&a.score_bucket)
        .then_with(|| {
            descending_nulls_last(
                a.scored.result.date_diff_years,
                b.scored.result.date_diff_years,
            )
        })
        .then_with(|| {
            descending_nulls_last(
                parse_date(a.scored.record_date.as_deref()).valid(),
                parse_date(b.scored.record_date.as_deref()).valid(),
            )
        })
}

fn descending_nulls_last<T: PartialOrd>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The winning candidate of one input record; full ties keep the earlier candidate.
pub fn select_best(candidates: &[RankedCandidate]) -> Option<&RankedCandidate> {
    candidates.iter().min_by(|a, b| selection_order(a, b))
}
