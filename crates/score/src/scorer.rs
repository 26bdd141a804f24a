//! The additive point scorer.

use orglink_features::{normalize_name, IndelRatio, NameMatcher, Similarity};
use orglink_geo::{canonical_state, jurisdiction_state, standardize_city, GeoResolver};
use orglink_model::{
    CandidateRecord, DateField, InputRecord, LocationSource, MatchResult, ScoreIssue, ScoreSignal,
};

use crate::bands::{distance_delta, magnitude_delta, name_band_delta, plausibility_penalty};
use crate::dates::{date_diff_years, read_date, reference_date};
use crate::ScoreConfig;

/// Scores input/candidate pairs.
///
/// Holds only read-only state, so one scorer can be shared across threads.
#[derive(Debug, Clone)]
pub struct CandidateScorer<S = IndelRatio> {
    matcher: NameMatcher<S>,
    geo: GeoResolver,
    config: ScoreConfig,
}

impl CandidateScorer<IndelRatio> {
    pub fn new(geo: GeoResolver, config: ScoreConfig) -> Self {
        Self::with_matcher(NameMatcher::new(), geo, config)
    }
}

impl<S: Similarity> CandidateScorer<S> {
    pub fn with_matcher(matcher: NameMatcher<S>, geo: GeoResolver, config: ScoreConfig) -> Self {
        Self {
            matcher,
            geo,
            config,
        }
    }

    /// Score one candidate for one input record.
    pub fn score(&self, input: &InputRecord, candidate: &CandidateRecord) -> MatchResult {
        let mut signals = Vec::new();
        let mut issues = Vec::new();

        // Name
        let target = normalize_name(&input.organization);
        let name = self.matcher.best_match_normalized(&target, candidate);
        match name.score {
            Some(score) => {
                let length = target.chars().count();
                signals.push(ScoreSignal::NameBand {
                    score,
                    length,
                    delta: name_band_delta(Some(score), length),
                });
            }
            None => {
                issues.push(ScoreIssue::MissingName);
                signals.push(ScoreSignal::NameMissing {
                    delta: name_band_delta(None, 0),
                });
            }
        }

        // State
        let state_source = self.state_agreement(input, candidate);
        if let Some(source) = state_source {
            signals.push(ScoreSignal::StateAgreement {
                source,
                delta: self.config.state_bonus,
            });
        }

        // City
        let city_source = city_agreement(input, candidate);
        if let Some(source) = city_source {
            signals.push(ScoreSignal::CityAgreement {
                source,
                delta: self.config.city_bonus,
            });
        }
        let city_exact = city_source.is_some();

        // Date plausibility
        let filed = read_date(input.date_filed_min.as_deref(), DateField::DateFiledMin, &mut issues);
        let incorporated = read_date(
            candidate.incorporation_date.as_deref(),
            DateField::IncorporationDate,
            &mut issues,
        );
        let assignee_matches = self.config.reassignment_override
            && !target.is_empty()
            && input
                .assignee
                .as_deref()
                .is_some_and(|assignee| normalize_name(assignee) == target);
        let reference = reference_date(input, filed, incorporated, assignee_matches, &mut issues);
        let date_diff = match (reference, incorporated) {
            (Some(reference), Some(incorporated)) => Some(date_diff_years(
                reference.date(),
                incorporated,
                self.config.days_per_year,
            )),
            _ => None,
        };

        if let (Some(filed), Some(incorporated), Some(diff)) = (filed, incorporated, date_diff) {
            if filed < incorporated {
                let delta = plausibility_penalty(diff);
                if delta != 0 {
                    signals.push(ScoreSignal::DatePlausibility {
                        diff_years: diff,
                        delta,
                    });
                }
            }
        }

        // Distance
        let city_distance = self.nearest_distance(input, candidate);
        if !city_exact {
            match city_distance {
                Some(miles) => signals.push(ScoreSignal::Distance {
                    miles,
                    delta: distance_delta(miles),
                }),
                None => issues.push(ScoreIssue::UnresolvableGeography),
            }
        }

        // Date magnitude
        if let Some(diff) = date_diff {
            signals.push(ScoreSignal::DateMagnitude {
                diff_years: diff,
                delta: magnitude_delta(diff),
            });
        }

        let total_score: i32 = signals.iter().map(ScoreSignal::delta).sum();

        tracing::debug!(
            id = %input.id,
            candidate = %candidate.name,
            name_score = ?name.score,
            total_score,
            "Scored candidate"
        );

        MatchResult {
            name_score: name.score,
            matched_name: name.matched_name,
            matched_field: name.matched_field,
            city_match: city_exact,
            state_match: state_source.is_some(),
            city_distance,
            date_diff_years: date_diff,
            total_score,
            signals,
            issues,
        }
    }

    /// First candidate state source agreeing with the input state.
    fn state_agreement(
        &self,
        input: &InputRecord,
        candidate: &CandidateRecord,
    ) -> Option<LocationSource> {
        let wanted = canonical_state(&input.state)?;
        let sources = [
            (LocationSource::Jurisdiction, self.jurisdiction_state(candidate)),
            (
                LocationSource::Address,
                candidate.address_state.as_deref().and_then(canonical_state),
            ),
            (
                LocationSource::Agent,
                candidate.agent_state.as_deref().and_then(canonical_state),
            ),
        ];
        sources
            .into_iter()
            .find(|(_, state)| state.as_ref() == Some(&wanted))
            .map(|(source, _)| source)
    }

    fn jurisdiction_state(&self, candidate: &CandidateRecord) -> Option<String> {
        candidate
            .jurisdiction_code
            .as_deref()
            .and_then(|code| jurisdiction_state(code, self.config.us_only_jurisdiction))
    }

    /// Smallest resolvable distance from the input location to any candidate location.
    ///
    /// A candidate location without a state borrows the jurisdiction state.
    fn nearest_distance(&self, input: &InputRecord, candidate: &CandidateRecord) -> Option<f64> {
        let origin = self.geo.coordinates(&input.city, &input.state)?;
        let fallback_state = self.jurisdiction_state(candidate);

        [
            (&candidate.address_city, &candidate.address_state),
            (&candidate.agent_city, &candidate.agent_state),
            (&candidate.data_city, &candidate.data_state),
        ]
        .into_iter()
        .filter_map(|(city, state)| {
            let city = city.as_deref().filter(|c| !c.trim().is_empty())?;
            let state = state
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .or(fallback_state.as_deref())?;
            self.geo.distance_from(origin, city, state)
        })
        .reduce(f64::min)
    }
}

/// First candidate city source agreeing exactly with the input city.
fn city_agreement(input: &InputRecord, candidate: &CandidateRecord) -> Option<LocationSource> {
    let wanted = standardize_city(&input.city);
    if wanted.is_empty() {
        return None;
    }
    [
        (LocationSource::Data, &candidate.data_city),
        (LocationSource::Address, &candidate.address_city),
        (LocationSource::Agent, &candidate.agent_city),
    ]
    .into_iter()
    .find(|(_, city)| city.as_deref().is_some_and(|city| standardize_city(city) == wanted))
    .map(|(source, _)| source)
}
