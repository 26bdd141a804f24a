//! Locations buried in the registry's free-text `Description` fields.

use orglink_geo::{canonical_state, standardize_city};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::history::is_empty_blob;
use crate::repr;

/// City and state recovered from description text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLocation {
    pub city: Option<String>,
    pub state: Option<String>,
}

/// Every `Description` value in a `data` blob, in order of appearance.
pub fn parse_descriptions(blob: &str) -> Vec<String> {
    let blob = blob.trim();
    if is_empty_blob(blob) {
        return Vec::new();
    }

    let mut found = Vec::new();
    match serde_json::from_str::<Value>(blob) {
        Ok(value) => collect_json_descriptions(&value, &mut found),
        Err(_) => found.extend(
            repr::pairs(blob)
                .into_iter()
                .filter(|(key, _)| key == "description")
                .filter_map(|(_, value)| value),
        ),
    }

    found.retain(|d| !d.trim().is_empty());
    found
}

fn collect_json_descriptions(value: &Value, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::String(text) if key.eq_ignore_ascii_case("description") => {
                        found.push(text.clone())
                    }
                    _ => collect_json_descriptions(value, found),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_json_descriptions(item, found);
            }
        }
        _ => {}
    }
}

/// Find the input's city and state among comma-separated description fragments.
///
/// The first fragment matching the city and, independently, the first matching
/// the state are kept as written.
pub fn resolve_data_location(descriptions: &[String], city: &str, state: &str) -> DataLocation {
    let target_city = standardize_city(city);
    let target_state = canonical_state(state);
    let mut location = DataLocation::default();

    let fragments = descriptions
        .iter()
        .flat_map(|description| description.split(','))
        .map(|fragment| fragment.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|fragment| !fragment.is_empty());

    for fragment in fragments {
        if location.city.is_none()
            && !target_city.is_empty()
            && standardize_city(&fragment) == target_city
        {
            location.city = Some(fragment.clone());
        }
        if location.state.is_none()
            && target_state.is_some()
            && canonical_state(&fragment) == target_state
        {
            location.state = Some(fragment);
        }
        if location.city.is_some() && location.state.is_some() {
            break;
        }
    }

    location
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_repr_descriptions() {
        let blob = "[{'datum': {'Title': 'Office', 'Description': '100 Main St, Springfield, Il 62701'}}, \
                    {'datum': {'Description': 'Chicago, Illinois'}}]";
        assert_eq!(
            parse_descriptions(blob),
            vec!["100 Main St, Springfield, Il 62701", "Chicago, Illinois"]
        );
    }

    #[test]
    fn test_parse_json_descriptions() {
        let blob = r#"[{"datum": {"description": "Peoria, IL"}}, {"datum": {"title": "x"}}]"#;
        assert_eq!(parse_descriptions(blob), vec!["Peoria, IL"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_descriptions("nan").is_empty());
        assert!(parse_descriptions("[{'Title': 'no text'}]").is_empty());
    }

    #[test]
    fn test_resolve_location() {
        let descriptions = vec![
            "Agent Office, Chicago, Il".to_string(),
            "100 Main St, Springfield, Il 62701".to_string(),
        ];
        let location = resolve_data_location(&descriptions, "Springfield", "Illinois");
        assert_eq!(
            location,
            DataLocation {
                city: Some("Springfield".to_string()),
                state: Some("Il".to_string()),
            }
        );
    }

    #[test]
    fn test_resolve_location_no_match() {
        let descriptions = vec!["Peoria, Il".to_string()];
        let location = resolve_data_location(&descriptions, "Springfield", "Missouri");
        assert_eq!(location, DataLocation::default());
    }

    #[test]
    fn test_resolve_location_blank_input() {
        let descriptions = vec!["Springfield, Il".to_string()];
        assert_eq!(resolve_data_location(&descriptions, "", ""), DataLocation::default());
    }
}
