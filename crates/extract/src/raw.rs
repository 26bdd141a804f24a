//! Registry rows as exported, before blob extraction.

use orglink_model::{is_null_marker, CandidateRecord, InputRecord};
use serde::{Deserialize, Serialize};

use crate::data::{parse_descriptions, resolve_data_location};
use crate::history::parse_name_history;

/// One registry hit as it appears in the candidate export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Id of the input record this hit was retrieved for
    pub id: String,

    #[serde(default)]
    pub company_number: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// Name-history blob
    #[serde(default)]
    pub alternative_names: Option<String>,

    /// Name-history blob
    #[serde(default)]
    pub previous_names: Option<String>,

    #[serde(default)]
    pub incorporation_date: Option<String>,

    #[serde(default)]
    pub jurisdiction_code: Option<String>,

    #[serde(default)]
    pub address_city: Option<String>,

    #[serde(default)]
    pub address_state: Option<String>,

    #[serde(default)]
    pub agent_city: Option<String>,

    #[serde(default)]
    pub agent_state: Option<String>,

    /// Free-text `Description` blob
    #[serde(default)]
    pub data: Option<String>,
}

/// Build a typed candidate for `input` from a raw registry row.
///
/// Unreadable name-history blobs are logged and treated as empty.
pub fn assemble_candidate(raw: &RawCandidate, input: &InputRecord) -> CandidateRecord {
    let descriptions = raw.data.as_deref().map(parse_descriptions).unwrap_or_default();
    let location = resolve_data_location(&descriptions, &input.city, &input.state);

    CandidateRecord {
        company_number: present(&raw.company_number),
        name: present(&raw.name).unwrap_or_default(),
        alternative_names: history_names(&raw.id, "alternative_names", raw.alternative_names.as_deref()),
        previous_names: history_names(&raw.id, "previous_names", raw.previous_names.as_deref()),
        incorporation_date: present(&raw.incorporation_date),
        jurisdiction_code: present(&raw.jurisdiction_code),
        address_city: present(&raw.address_city),
        address_state: present(&raw.address_state),
        agent_city: present(&raw.agent_city),
        agent_state: present(&raw.agent_state),
        data_city: location.city,
        data_state: location.state,
    }
}

fn history_names(id: &str, field: &str, blob: Option<&str>) -> Vec<String> {
    let Some(blob) = blob else {
        return Vec::new();
    };
    match parse_name_history(blob) {
        Ok(entries) => entries.into_iter().map(|entry| entry.name).collect(),
        Err(e) => {
            tracing::warn!(id, field, error = %e, "Ignoring name history");
            Vec::new()
        }
    }
}

/// Trimmed value, with blanks and null markers as `None`.
pub fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !is_null_marker(v))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw() -> RawCandidate {
        RawCandidate {
            id: "7".to_string(),
            company_number: Some("C123".to_string()),
            name: Some(" ACME MANUFACTURING ".to_string()),
            alternative_names: Some("[{'company_name': 'Acme Mfg Co', 'end_date': None}]".to_string()),
            previous_names: Some("nan".to_string()),
            incorporation_date: Some("2005-06-01".to_string()),
            jurisdiction_code: Some("us_il".to_string()),
            address_city: Some("".to_string()),
            address_state: Some("NaN".to_string()),
            agent_city: Some("Chicago".to_string()),
            agent_state: Some("Il".to_string()),
            data: Some("[{'datum': {'Description': 'Springfield, Il'}}]".to_string()),
        }
    }

    #[test]
    fn test_assemble_candidate() {
        let input = InputRecord::new("7", "Acme Manufacturing Llc").with_location("Springfield", "Illinois");
        let candidate = assemble_candidate(&raw(), &input);

        assert_eq!(candidate.name, "ACME MANUFACTURING");
        assert_eq!(candidate.alternative_names, vec!["Acme Mfg Co"]);
        assert!(candidate.previous_names.is_empty());
        assert_eq!(candidate.address_city, None);
        assert_eq!(candidate.address_state, None);
        assert_eq!(candidate.agent_city.as_deref(), Some("Chicago"));
        assert_eq!(candidate.data_city.as_deref(), Some("Springfield"));
        assert_eq!(candidate.data_state.as_deref(), Some("Il"));
    }

    #[test]
    fn test_bad_blob_is_not_fatal() {
        let mut raw = raw();
        raw.previous_names = Some("<<unreadable>>".to_string());
        let input = InputRecord::new("7", "Acme");
        let candidate = assemble_candidate(&raw, &input);
        assert!(candidate.previous_names.is_empty());
        assert_eq!(candidate.alternative_names.len(), 1);
    }

    #[test]
    fn test_raw_missing_columns_default() {
        let json = serde_json::json!({"id": "9", "name": "Widget Works", "jurisdiction_code": "us_mn"});
        let parsed: RawCandidate = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Widget Works"));
        assert_eq!(parsed.data, None);
    }
}
