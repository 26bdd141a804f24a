//! Explanation generation for match scores.
//!
//! Converts the signals and issues recorded while scoring a pair into
//! human-readable explanations for review of individual matches.

use orglink_model::{MatchResult, NameField, ScoreIssue, ScoreSignal};
use serde::{Deserialize, Serialize};

/// A structured explanation of one score contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// Short summary (1 line)
    pub summary: String,

    /// Detailed explanation (1-2 sentences)
    pub detail: String,

    /// Points contributed; 0 for issues
    pub delta: i32,

    pub evidence: Vec<EvidenceItem>,
}

/// A piece of evidence supporting an explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub kind: String,

    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl EvidenceItem {
    fn new(kind: &str, value: impl ToString) -> Self {
        Self {
            kind: kind.to_string(),
            value: value.to_string(),
            context: None,
        }
    }

    fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// Explanations for every signal and issue of a scored pair, in scoring order.
pub fn explain_result(result: &MatchResult, organization: &str) -> Vec<Explanation> {
    result
        .signals
        .iter()
        .map(|signal| explain_signal(signal, organization, result))
        .chain(result.issues.iter().map(explain_issue))
        .collect()
}

/// Generate the explanation for a single signal.
pub fn explain_signal(signal: &ScoreSignal, organization: &str, result: &MatchResult) -> Explanation {
    let delta = signal.delta();
    match signal {
        ScoreSignal::NameBand { score, length, .. } => {
            let matched = result.matched_name.as_deref().unwrap_or_default();
            let field = result.matched_field.map_or("current", |f| f.as_str());
            Explanation {
                summary: format!("Name similarity {score}"),
                detail: format!(
                    "'{organization}' scored {score} against the {field} name '{matched}'. \
                     The normalized name has {length} characters."
                ),
                delta,
                evidence: vec![
                    EvidenceItem::new("name_score", score),
                    EvidenceItem::new("matched_name", matched).with_context(field),
                ],
            }
        }

        ScoreSignal::NameMissing { .. } => Explanation {
            summary: "No name to compare".to_string(),
            detail: format!(
                "No similarity could be computed for '{organization}'. \
                 A data gap scores below any weak match."
            ),
            delta,
            evidence: vec![],
        },

        ScoreSignal::StateAgreement { source, .. } => Explanation {
            summary: format!("Same state ({})", source.as_str()),
            detail: format!(
                "The candidate's {} state agrees with the input state.",
                source.as_str()
            ),
            delta,
            evidence: vec![EvidenceItem::new("state_source", source.as_str())],
        },

        ScoreSignal::CityAgreement { source, .. } => Explanation {
            summary: format!("Same city ({})", source.as_str()),
            detail: format!(
                "The candidate's {} city agrees with the input city, so distance is not scored.",
                source.as_str()
            ),
            delta,
            evidence: vec![EvidenceItem::new("city_source", source.as_str())],
        },

        ScoreSignal::DatePlausibility { diff_years, .. } => Explanation {
            summary: "Filed before incorporation".to_string(),
            detail: format!(
                "The earliest patent was filed {:.1} years before the company was incorporated.",
                diff_years.abs()
            ),
            delta,
            evidence: vec![EvidenceItem::new("date_diff_years", diff_years)],
        },

        ScoreSignal::Distance { miles, .. } => Explanation {
            summary: format!("{miles:.1} miles away"),
            detail: format!(
                "The nearest resolvable candidate location is {miles:.1} miles from the input city."
            ),
            delta,
            evidence: vec![EvidenceItem::new("miles", miles)],
        },

        ScoreSignal::DateMagnitude { diff_years, .. } => Explanation {
            summary: format!("{diff_years:.1} years from incorporation"),
            detail: format!(
                "The reference date is {diff_years:.3} years after incorporation \
                 (negative means before)."
            ),
            delta,
            evidence: vec![EvidenceItem::new("date_diff_years", diff_years)],
        },
    }
}

/// Generate the explanation for a signal that could not be evaluated.
pub fn explain_issue(issue: &ScoreIssue) -> Explanation {
    let (detail, evidence) = match issue {
        ScoreIssue::MissingName => ("The name comparison had nothing to compare.".to_string(), vec![]),
        ScoreIssue::UnresolvableGeography => (
            "No candidate location resolved to coordinates; distance contributes nothing."
                .to_string(),
            vec![],
        ),
        ScoreIssue::MissingDate { field } => (
            format!("No {} is available; date signals are skipped.", field.as_str()),
            vec![EvidenceItem::new("field", field.as_str())],
        ),
        ScoreIssue::MalformedDate { field, value } => (
            format!("The {} '{}' could not be read.", field.as_str(), value),
            vec![EvidenceItem::new("field", field.as_str()).with_context(value.as_str())],
        ),
    };
    Explanation {
        summary: issue.label().to_string(),
        detail,
        delta: 0,
        evidence,
    }
}

/// One-line summary of a scored pair.
pub fn summarize_match(result: &MatchResult) -> String {
    let level = match result.total_score {
        s if s >= 15 => "STRONG MATCH",
        s if s >= 5 => "POSSIBLE MATCH",
        _ => "WEAK MATCH",
    };

    let labels: Vec<_> = result
        .signals
        .iter()
        .filter(|s| s.delta() != 0)
        .map(|s| format!("{} {:+}", s.label(), s.delta()))
        .collect();
    let mut summary = format!("{level} ({:+}): {}", result.total_score, labels.join(", "));

    if !result.issues.is_empty() {
        let issues: Vec<_> = result.issues.iter().map(ScoreIssue::label).collect();
        summary.push_str(&format!(" [{}]", issues.join(", ")));
    }
    if result.matched_field == Some(NameField::Former) {
        summary.push_str(" (matched a former name)");
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use orglink_model::{DateField, LocationSource};
    use pretty_assertions::assert_eq;

    fn result(signals: Vec<ScoreSignal>, issues: Vec<ScoreIssue>) -> MatchResult {
        let total_score = signals.iter().map(ScoreSignal::delta).sum();
        MatchResult {
            name_score: Some(100),
            matched_name: Some("Acme Manufacturing".to_string()),
            matched_field: Some(NameField::Current),
            city_match: true,
            state_match: true,
            city_distance: None,
            date_diff_years: Some(4.589),
            total_score,
            signals,
            issues,
        }
    }

    #[test]
    fn test_explain_name_band() {
        let r = result(vec![ScoreSignal::NameBand { score: 100, length: 18, delta: 5 }], vec![]);
        let explanation = explain_signal(&r.signals[0], "Acme Manufacturing Llc", &r);
        assert_eq!(explanation.delta, 5);
        assert!(explanation.detail.contains("current name 'Acme Manufacturing'"));
    }

    #[test]
    fn test_explain_result_includes_issues() {
        let r = result(
            vec![ScoreSignal::StateAgreement { source: LocationSource::Address, delta: 5 }],
            vec![ScoreIssue::MissingDate { field: DateField::IncorporationDate }],
        );
        let explanations = explain_result(&r, "Acme");
        assert_eq!(explanations.len(), 2);
        assert_eq!(explanations[0].summary, "Same state (address)");
        assert_eq!(explanations[1].summary, "Missing Date");
        assert_eq!(explanations[1].delta, 0);
    }

    #[test]
    fn test_summarize_match() {
        let r = result(
            vec![
                ScoreSignal::NameBand { score: 100, length: 18, delta: 5 },
                ScoreSignal::StateAgreement { source: LocationSource::Address, delta: 5 },
                ScoreSignal::CityAgreement { source: LocationSource::Address, delta: 5 },
                ScoreSignal::DatePlausibility { diff_years: -5.419, delta: -3 },
                ScoreSignal::DateMagnitude { diff_years: -5.419, delta: 5 },
            ],
            vec![],
        );
        assert_eq!(
            summarize_match(&r),
            "STRONG MATCH (+17): Name Similarity +5, Same State +5, Same City +5, \
             Filed Before Incorporation -3, Date Proximity +5"
        );
    }

    #[test]
    fn test_summarize_weak_with_issues() {
        let r = result(
            vec![ScoreSignal::NameMissing { delta: -10 }],
            vec![ScoreIssue::MissingName, ScoreIssue::UnresolvableGeography],
        );
        assert_eq!(
            summarize_match(&r),
            "WEAK MATCH (-10): Name Missing -10 [Missing Name, Unresolvable Geography]"
        );
    }
}
