//! Alternative and previous company names.

use orglink_model::is_null_marker;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{repr, snippet, ExtractError};

/// One historical or alternate name of a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalName {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl HistoricalName {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_date: None,
            end_date: None,
        }
    }
}

const NAME_KEYS: [&str; 2] = ["company_name", "name"];

/// Parse a name-history blob into its entries.
///
/// Accepts JSON arrays and Python-repr lists, of mappings or of plain strings.
/// Null markers and empty containers give an empty list. Entries with a blank
/// name are dropped.
pub fn parse_name_history(blob: &str) -> Result<Vec<HistoricalName>, ExtractError> {
    let blob = blob.trim();
    if is_empty_blob(blob) {
        return Ok(Vec::new());
    }

    let entries = match serde_json::from_str::<Value>(blob) {
        Ok(value) => from_json(&value),
        Err(_) => from_repr(blob),
    };

    match entries {
        Some(entries) => Ok(entries
            .into_iter()
            .filter(|entry| !entry.name.trim().is_empty())
            .collect()),
        None => Err(ExtractError::Unrecognized {
            snippet: snippet(blob),
        }),
    }
}

/// Null marker or an empty container.
pub fn is_empty_blob(blob: &str) -> bool {
    let blob = blob.trim();
    is_null_marker(blob) || matches!(blob, "[]" | "{}" | "()" | "[{}]")
}

fn from_json(value: &Value) -> Option<Vec<HistoricalName>> {
    match value {
        Value::Array(items) => {
            let entries: Vec<_> = items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(from_json_object(map)),
                    Value::String(name) => Some(HistoricalName::new(name.as_str())),
                    _ => None,
                })
                .collect();
            (!entries.is_empty()).then_some(entries)
        }
        Value::Object(map) => Some(vec![from_json_object(map)]),
        _ => None,
    }
}

fn from_json_object(map: &Map<String, Value>) -> HistoricalName {
    let field = |wanted: &str| {
        map.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(wanted))
            .and_then(|(_, value)| value.as_str())
            .map(str::to_string)
    };
    HistoricalName {
        name: NAME_KEYS.iter().find_map(|key| field(key)).unwrap_or_default(),
        start_date: field("start_date"),
        end_date: field("end_date"),
    }
}

fn from_repr(blob: &str) -> Option<Vec<HistoricalName>> {
    let mappings = repr::mappings(blob);
    if !mappings.is_empty() {
        let entries = mappings
            .into_iter()
            .map(|pairs| {
                let field = |wanted: &str| {
                    pairs
                        .iter()
                        .find(|(key, _)| key == wanted)
                        .and_then(|(_, value)| value.clone())
                };
                HistoricalName {
                    name: NAME_KEYS.iter().find_map(|key| field(key)).unwrap_or_default(),
                    start_date: field("start_date"),
                    end_date: field("end_date"),
                }
            })
            .collect();
        return Some(entries);
    }

    if blob.starts_with('[') || blob.starts_with('(') {
        let names = repr::quoted_strings(blob);
        if !names.is_empty() {
            return Some(names.into_iter().map(HistoricalName::new).collect());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_repr_blob() {
        let blob = "[{'company_name': 'ACME MFG CO', 'start_date': '1990-01-01', 'end_date': None}, \
                    {'company_name': \"O'Brien Widgets\", 'type': 'trading'}]";
        let names = parse_name_history(blob).unwrap();
        assert_eq!(
            names,
            vec![
                HistoricalName {
                    name: "ACME MFG CO".to_string(),
                    start_date: Some("1990-01-01".to_string()),
                    end_date: None,
                },
                HistoricalName::new("O'Brien Widgets"),
            ]
        );
    }

    #[test]
    fn test_title_cased_keys() {
        let names = parse_name_history("[{'Company_Name': 'Acme Tool', 'Con_Date': '2001-02-03'}]").unwrap();
        assert_eq!(names, vec![HistoricalName::new("Acme Tool")]);
    }

    #[test]
    fn test_json_blob() {
        let blob = r#"[{"company_name": "Acme Holdings", "end_date": "2004-05-06"}, "Acme Inc"]"#;
        let names = parse_name_history(blob).unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names[0].end_date.as_deref(), Some("2004-05-06"));
        assert_eq!(names[1].name, "Acme Inc");
    }

    #[test]
    fn test_plain_list() {
        let names = parse_name_history("['Acme Co', 'Acme Corp']").unwrap();
        assert_eq!(names, vec![HistoricalName::new("Acme Co"), HistoricalName::new("Acme Corp")]);
    }

    #[test]
    fn test_empty_blobs() {
        for blob in ["", "  ", "nan", "None", "[]", "{}"] {
            assert_eq!(parse_name_history(blob).unwrap(), vec![], "blob {blob:?}");
        }
    }

    #[test]
    fn test_blank_names_dropped() {
        let names = parse_name_history("[{'company_name': '  ', 'end_date': None}]").unwrap();
        assert!(names.is_empty());
    }

    #[test]
    fn test_unrecognized() {
        let err = parse_name_history("garbage without structure").unwrap_err();
        assert!(matches!(err, ExtractError::Unrecognized { .. }));
    }
}
