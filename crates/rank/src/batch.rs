//! Parallel batch resolution.

use std::collections::{BTreeMap, HashMap, HashSet};

use orglink_features::Similarity;
use orglink_model::{
    BatchIssue, BatchIssueKind, CandidateRecord, InputRecord, ScoredCandidate, SelectedMatch,
};
use orglink_score::CandidateScorer;
use rayon::prelude::*;

use crate::confidence::{bucket, ConfidenceScale};
use crate::select::{select_best, RankedCandidate};
use crate::RankConfig;

/// Everything produced for one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// One row per input id that had candidates, in input order
    pub selections: Vec<SelectedMatch>,
    /// Every scored pair, grouped by input in input order
    pub ranked: Vec<RankedCandidate>,
    pub issues: Vec<BatchIssue>,
    pub scale: ConfidenceScale,
}

impl BatchOutcome {
    /// Ranked candidates of one input id.
    pub fn candidates_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a RankedCandidate> {
        self.ranked.iter().filter(move |r| r.scored.input_id == id)
    }
}

/// Score, rescale and select across a whole batch.
///
/// Input records are scored in parallel. Confidence needs the batch-wide
/// min/max, so it is only assigned once every pair has been scored.
pub fn resolve_batch<S: Similarity>(
    inputs: &[InputRecord],
    candidates: &HashMap<String, Vec<CandidateRecord>>,
    scorer: &CandidateScorer<S>,
    config: &RankConfig,
) -> BatchOutcome {
    let mut issues = Vec::new();
    let unique = dedup_inputs(inputs, &mut issues);

    let known: HashSet<&str> = unique.iter().map(|input| input.id.as_str()).collect();
    let mut orphans: Vec<(&String, usize)> = candidates
        .iter()
        .filter(|(id, rows)| !known.contains(id.as_str()) && !rows.is_empty())
        .map(|(id, rows)| (id, rows.len()))
        .collect();
    orphans.sort();
    issues.extend(orphans.into_iter().map(|(id, count)| BatchIssue {
        id: id.clone(),
        kind: BatchIssueKind::OrphanCandidates { count },
    }));

    for input in &unique {
        if candidates.get(&input.id).map_or(true, Vec::is_empty) {
            issues.push(BatchIssue {
                id: input.id.clone(),
                kind: BatchIssueKind::EmptyCandidateSet,
            });
        }
    }

    tracing::info!(inputs = unique.len(), "Scoring batch");

    let groups: Vec<Vec<ScoredCandidate>> = unique
        .par_iter()
        .map(|input| score_input(input, candidates.get(&input.id), scorer))
        .collect();

    let scale = groups
        .par_iter()
        .map(|group| ConfidenceScale::from_scores(group.iter().map(|s| s.result.total_score)))
        .reduce(ConfidenceScale::new, ConfidenceScale::merge);

    tracing::info!(
        pairs = groups.iter().map(Vec::len).sum::<usize>(),
        min = ?scale.min(),
        max = ?scale.max(),
        "Scored all pairs"
    );

    let mut selections = Vec::new();
    let mut ranked = Vec::new();
    for group in groups {
        let group: Vec<RankedCandidate> = group
            .into_iter()
            .map(|scored| {
                let confidence = scale.confidence(scored.result.total_score, config);
                RankedCandidate {
                    scored,
                    confidence,
                    score_bucket: bucket(confidence),
                }
            })
            .collect();
        if let Some(best) = select_best(&group) {
            selections.push(best.to_selection());
        }
        ranked.extend(group);
    }

    for issue in &issues {
        tracing::warn!(id = %issue.id, issue = issue.kind.label(), "Batch issue");
    }
    tracing::info!(selected = selections.len(), issues = issues.len(), "Batch resolved");

    BatchOutcome {
        selections,
        ranked,
        issues,
        scale,
    }
}

/// First record per id. A repeat with different field values is reported.
fn dedup_inputs<'a>(inputs: &'a [InputRecord], issues: &mut Vec<BatchIssue>) -> Vec<&'a InputRecord> {
    let mut seen: HashMap<&str, &InputRecord> = HashMap::new();
    let mut reported: HashSet<&str> = HashSet::new();
    let mut unique = Vec::new();

    for input in inputs {
        match seen.get(input.id.as_str()) {
            None => {
                seen.insert(&input.id, input);
                unique.push(input);
            }
            Some(first) if *first != input && reported.insert(&input.id) => {
                issues.push(BatchIssue {
                    id: input.id.clone(),
                    kind: BatchIssueKind::DuplicateInput,
                });
            }
            Some(_) => {}
        }
    }

    unique
}

fn score_input<S: Similarity>(
    input: &InputRecord,
    candidates: Option<&Vec<CandidateRecord>>,
    scorer: &CandidateScorer<S>,
) -> Vec<ScoredCandidate> {
    candidates
        .map(|rows| rows.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|candidate| ScoredCandidate {
            input_id: input.id.clone(),
            candidate: candidate.clone(),
            result: scorer.score(input, candidate),
            record_date: input.record_date.clone(),
        })
        .collect()
}

/// Number of selections per bucket, highest bucket first.
pub fn bucket_histogram(selections: &[SelectedMatch]) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for selection in selections {
        *counts.entry(selection.score_bucket).or_default() += 1;
    }
    counts.into_iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use orglink_geo::GeoResolver;
    use orglink_score::ScoreConfig;
    use pretty_assertions::assert_eq;

    fn scorer() -> CandidateScorer {
        CandidateScorer::new(GeoResolver::default(), ScoreConfig::default())
    }

    fn batch(pairs: &[(&str, &[&str])]) -> HashMap<String, Vec<CandidateRecord>> {
        pairs
            .iter()
            .map(|(id, names)| {
                (
                    id.to_string(),
                    names.iter().map(|n| CandidateRecord::new(*n)).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_one_selection_per_input() {
        let inputs = vec![InputRecord::new("1", "Acme Tools"), InputRecord::new("2", "Globex")];
        let candidates = batch(&[("1", &["Acme Tool", "Acme Tools Inc"]), ("2", &["Globex Corp"])]);
        let outcome = resolve_batch(&inputs, &candidates, &scorer(), &RankConfig::default());

        assert_eq!(outcome.selections.len(), 2);
        assert_eq!(outcome.selections[0].id, "1");
        assert_eq!(outcome.selections[0].candidate_name, "Acme Tools Inc");
        assert_eq!(outcome.ranked.len(), 3);
        assert_eq!(outcome.candidates_for("1").count(), 2);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_batch_issues_do_not_abort() {
        let inputs = vec![
            InputRecord::new("1", "Acme"),
            InputRecord::new("1", "Acme Renamed"),
            InputRecord::new("1", "Acme"),
            InputRecord::new("2", "Empty"),
        ];
        let candidates = batch(&[("1", &["Acme"]), ("9", &["Stray", "Stray Two"])]);
        let outcome = resolve_batch(&inputs, &candidates, &scorer(), &RankConfig::default());

        assert_eq!(outcome.selections.len(), 1);
        assert_eq!(
            outcome.issues,
            vec![
                BatchIssue {
                    id: "1".to_string(),
                    kind: BatchIssueKind::DuplicateInput
                },
                BatchIssue {
                    id: "9".to_string(),
                    kind: BatchIssueKind::OrphanCandidates { count: 2 }
                },
                BatchIssue {
                    id: "2".to_string(),
                    kind: BatchIssueKind::EmptyCandidateSet
                },
            ]
        );
    }

    #[test]
    fn test_identical_duplicate_is_silent() {
        let inputs = vec![InputRecord::new("1", "Acme"), InputRecord::new("1", "Acme")];
        let candidates = batch(&[("1", &["Acme"])]);
        let outcome = resolve_batch(&inputs, &candidates, &scorer(), &RankConfig::default());
        assert!(outcome.issues.is_empty());
        assert_eq!(outcome.ranked.len(), 1);
    }

    #[test]
    fn test_bucket_histogram() {
        let selection = |bucket: i32| SelectedMatch {
            id: bucket.to_string(),
            candidate_name: String::new(),
            company_number: None,
            total_score: 0,
            confidence: f64::from(bucket),
            score_bucket: bucket,
            matched_field: None,
            matched_name: None,
            date_diff_years: None,
        };
        let selections: Vec<_> = [3, 10, 3, 7].into_iter().map(selection).collect();
        assert_eq!(bucket_histogram(&selections), vec![(10, 1), (7, 1), (3, 2)]);
    }
}
