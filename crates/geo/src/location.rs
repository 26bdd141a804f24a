//! City and state standardization.

use once_cell::sync::Lazy;
use orglink_features::title_case;
use regex::Regex;

/// Leading `"<anything>, "` as found in registry address fields.
static LEADING_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^,]*,\s*").expect("valid leading clause pattern"));

/// Two-letter state followed by a postal code, e.g. `Pa 19103`.
static STATE_WITH_ZIP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{2})\s+\d.*$").expect("valid zip pattern"));

/// `Commonwealth Of ...`, `State Of ...`
static OF_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^.*\bof\s+").expect("valid of-prefix pattern"));

/// Full US state names and their postal codes.
pub const US_STATES: [(&str, &str); 52] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("District Of Columbia", "DC"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Puerto Rico", "PR"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// City-name abbreviations expanded when they lead a multi-word name or end in a period.
const CITY_PREFIXES: [(&str, &str); 4] = [
    ("St", "Saint"),
    ("Ft", "Fort"),
    ("Mt", "Mount"),
    ("Pte", "Pointe"),
];

/// Look up the postal code for a full state name or an existing code.
pub fn us_state_code(value: &str) -> Option<&'static str> {
    let value = value.trim();
    US_STATES
        .iter()
        .find(|(name, code)| name.eq_ignore_ascii_case(value) || code.eq_ignore_ascii_case(value))
        .map(|(_, code)| *code)
}

/// Remove address noise around a state value.
pub fn clean_state(raw: &str) -> String {
    let value = LEADING_CLAUSE.replace(raw.trim(), "");
    let value = STATE_WITH_ZIP.replace(value.trim(), "$1");
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical comparison form of a state.
///
/// Known US states become their upper-case postal code; anything else is the
/// cleaned value upper-cased. Blank input has no state.
pub fn canonical_state(raw: &str) -> Option<String> {
    let cleaned = clean_state(raw);
    if cleaned.is_empty() {
        return None;
    }
    if let Some(code) = us_state_code(&cleaned) {
        return Some(code.to_string());
    }

    let without_of = OF_PREFIX.replace(&cleaned, "");
    if let Some(code) = us_state_code(&without_of) {
        return Some(code.to_string());
    }

    Some(cleaned.to_uppercase())
}

/// State encoded in a registry jurisdiction code such as `us_il`.
///
/// With `us_only`, only `us_xx` codes naming a known US state yield a value.
pub fn jurisdiction_state(code: &str, us_only: bool) -> Option<String> {
    let (country, region) = code.trim().split_once('_')?;
    if region.is_empty() {
        return None;
    }
    if us_only {
        if !country.eq_ignore_ascii_case("us") {
            return None;
        }
        return us_state_code(region)
            .filter(|state| state.eq_ignore_ascii_case(region))
            .map(str::to_string);
    }
    canonical_state(region)
}

/// Canonical comparison form of a city.
pub fn standardize_city(raw: &str) -> String {
    let value = LEADING_CLAUSE.replace(raw.trim(), "");
    let tokens: Vec<String> = value.split_whitespace().map(title_case).collect();
    let count = tokens.len();

    tokens
        .into_iter()
        .enumerate()
        .map(|(i, token)| expand_city_token(i, count, token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn expand_city_token(index: usize, count: usize, token: String) -> String {
    if token == "Mpls" {
        return "Minneapolis".to_string();
    }
    let (bare, dotted) = match token.strip_suffix('.') {
        Some(bare) => (bare, true),
        None => (token.as_str(), false),
    };
    let leads = index == 0 && count > 1;
    CITY_PREFIXES
        .iter()
        .find(|(abbr, _)| *abbr == bare && (dotted || leads) && index + 1 < count)
        .map(|(_, full)| full.to_string())
        .unwrap_or_else(|| token.clone())
}
