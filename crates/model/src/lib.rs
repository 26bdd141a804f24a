//! Core domain model for orglink entity resolution.
//!
//! This crate defines the fundamental types used throughout the system:
//! - `InputRecord`: a patent-assignee organization to resolve
//! - `CandidateRecord`: one company-registry hit for an input record
//! - `MatchResult`: the scored comparison of one input/candidate pair
//! - `ScoreSignal` / `ScoreIssue`: what moved the score, and what was missing
//! - `SelectedMatch`: the single best candidate kept per input record

pub mod dates;

use serde::{Deserialize, Serialize};

pub use dates::{is_null_marker, parse_date, ParsedDate};

/// Which of a candidate's names produced the best name score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameField {
    /// Current registered name
    Current,
    /// One of the registry's alternative names
    Alternate,
    /// One of the registry's previous names
    Former,
}

impl NameField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Alternate => "alternate",
            Self::Former => "former",
        }
    }
}

/// Where a candidate's location value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// State suffix of the registry jurisdiction code
    Jurisdiction,
    /// Registered address
    Address,
    /// Registered agent
    Agent,
    /// Free-text description fields
    Data,
}

impl LocationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jurisdiction => "jurisdiction",
            Self::Address => "address",
            Self::Agent => "agent",
            Self::Data => "data",
        }
    }
}

/// A patent-assignee organization instance to resolve.
///
/// Dates are kept as raw strings; parsing happens during scoring so that a
/// malformed value can be reported against the pair instead of failing the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    /// Unique per record; the dedup key for final selection
    pub id: String,

    /// Organization name as it appears in the patent source
    #[serde(default)]
    pub organization: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    /// Earliest known patent filing date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_filed_min: Option<String>,

    /// Earliest known patent grant date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_granted_min: Option<String>,

    /// Assignee of a later reassignment transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Assignor of a later reassignment transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignor: Option<String>,

    /// Effective date of the reassignment transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_date: Option<String>,
}

impl InputRecord {
    /// Create a minimal record for testing.
    pub fn new(id: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            organization: organization.into(),
            city: String::new(),
            state: String::new(),
            date_filed_min: None,
            date_granted_min: None,
            assignee: None,
            assignor: None,
            record_date: None,
        }
    }

    pub fn with_location(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = city.into();
        self.state = state.into();
        self
    }

    pub fn with_date_filed_min(mut self, date: impl Into<String>) -> Self {
        self.date_filed_min = Some(date.into());
        self
    }

    pub fn with_reassignment(
        mut self,
        assignee: impl Into<String>,
        record_date: impl Into<String>,
    ) -> Self {
        self.assignee = Some(assignee.into());
        self.record_date = Some(record_date.into());
        self
    }
}

/// One company-registry hit considered as a possible match for an input record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Registry identifier of the company
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_number: Option<String>,

    /// Current registered name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub alternative_names: Vec<String>,

    #[serde(default)]
    pub previous_names: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incorporation_date: Option<String>,

    /// Registry jurisdiction, e.g. `us_il`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_state: Option<String>,

    /// City parsed out of free-text description fields (lowest trust)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_state: Option<String>,
}

impl CandidateRecord {
    /// Create a minimal candidate for testing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_incorporation_date(mut self, date: impl Into<String>) -> Self {
        self.incorporation_date = Some(date.into());
        self
    }

    pub fn with_address(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.address_city = Some(city.into());
        self.address_state = Some(state.into());
        self
    }

    pub fn with_agent(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.agent_city = Some(city.into());
        self.agent_state = Some(state.into());
        self
    }

    pub fn with_jurisdiction(mut self, code: impl Into<String>) -> Self {
        self.jurisdiction_code = Some(code.into());
        self
    }
}

/// Which date field an issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    DateFiledMin,
    IncorporationDate,
    RecordDate,
}

impl DateField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateFiledMin => "date_filed_min",
            Self::IncorporationDate => "incorporation_date",
            Self::RecordDate => "record_date",
        }
    }
}

/// One additive contribution to a pair's total score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ScoreSignal {
    /// Name similarity band, gated by organization name length
    NameBand {
        score: u8,
        length: usize,
        delta: i32,
    },

    /// No name score could be computed
    NameMissing { delta: i32 },

    /// Input state equals one of the candidate's states
    StateAgreement { source: LocationSource, delta: i32 },

    /// Input city equals one of the candidate's cities
    CityAgreement { source: LocationSource, delta: i32 },

    /// Patent filed before the company was incorporated
    DatePlausibility { diff_years: f64, delta: i32 },

    /// Nearest resolvable candidate location
    Distance { miles: f64, delta: i32 },

    /// Gap between reference date and incorporation date
    DateMagnitude { diff_years: f64, delta: i32 },
}

impl ScoreSignal {
    /// Points this signal contributed.
    pub fn delta(&self) -> i32 {
        match self {
            Self::NameBand { delta, .. }
            | Self::NameMissing { delta }
            | Self::StateAgreement { delta, .. }
            | Self::CityAgreement { delta, .. }
            | Self::DatePlausibility { delta, .. }
            | Self::Distance { delta, .. }
            | Self::DateMagnitude { delta, .. } => *delta,
        }
    }

    /// Get a human-readable label for this signal.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NameBand { .. } => "Name Similarity",
            Self::NameMissing { .. } => "Name Missing",
            Self::StateAgreement { .. } => "Same State",
            Self::CityAgreement { .. } => "Same City",
            Self::DatePlausibility { .. } => "Filed Before Incorporation",
            Self::Distance { .. } => "Nearby Location",
            Self::DateMagnitude { .. } => "Date Proximity",
        }
    }
}

/// A signal that could not be evaluated for a pair. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum ScoreIssue {
    /// Target name normalized to nothing
    MissingName,

    /// Neither side of any location pair resolved to coordinates
    UnresolvableGeography,

    /// A date needed for the date signals is absent
    MissingDate { field: DateField },

    /// A date is present but unparsable
    MalformedDate { field: DateField, value: String },
}

impl ScoreIssue {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingName => "Missing Name",
            Self::UnresolvableGeography => "Unresolvable Geography",
            Self::MissingDate { .. } => "Missing Date",
            Self::MalformedDate { .. } => "Malformed Date",
        }
    }
}

/// The scored comparison of one input record against one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Fuzzy name similarity 0-100, `None` when the target name is empty
    pub name_score: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_field: Option<NameField>,

    pub city_match: bool,

    pub state_match: bool,

    /// Minimum resolvable distance in miles
    pub city_distance: Option<f64>,

    /// `(reference date - incorporation date) / 365 days`
    pub date_diff_years: Option<f64>,

    pub total_score: i32,

    #[serde(default)]
    pub signals: Vec<ScoreSignal>,

    #[serde(default)]
    pub issues: Vec<ScoreIssue>,
}

impl MatchResult {
    /// Recompute the total from the recorded signals.
    pub fn signal_total(&self) -> i32 {
        self.signals.iter().map(ScoreSignal::delta).sum()
    }

    pub fn has_date_issue(&self) -> bool {
        self.issues.iter().any(|issue| {
            matches!(
                issue,
                ScoreIssue::MissingDate { .. } | ScoreIssue::MalformedDate { .. }
            )
        })
    }
}

/// A candidate together with its score for one input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub input_id: String,
    pub candidate: CandidateRecord,
    pub result: MatchResult,

    /// Reassignment record date of the input, used as the last tie-break
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_date: Option<String>,
}

/// The single best candidate kept for one input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedMatch {
    pub id: String,
    pub candidate_name: String,

    #[serde(default)]
    pub company_number: Option<String>,

    pub total_score: i32,

    /// Batch-normalized confidence, 1.00 - 10.00
    pub confidence: f64,

    /// Floor of `confidence`
    pub score_bucket: i32,

    #[serde(default)]
    pub matched_field: Option<NameField>,

    #[serde(default)]
    pub matched_name: Option<String>,

    /// Null when the date signals could not be computed
    #[serde(default)]
    pub date_diff_years: Option<f64>,
}

/// A per-id problem found while assembling or ranking a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchIssue {
    pub id: String,
    pub kind: BatchIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum BatchIssueKind {
    /// Input record had no candidates to score
    EmptyCandidateSet,

    /// The same id appeared again with different field values; the first is kept
    DuplicateInput,

    /// Candidates were supplied for an id with no input record
    OrphanCandidates { count: usize },
}

impl BatchIssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmptyCandidateSet => "empty candidate set",
            Self::DuplicateInput => "duplicate input id",
            Self::OrphanCandidates { .. } => "candidates without input",
        }
    }
}
