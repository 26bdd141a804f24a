//! Organization name canonicalization.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^()]*\)").expect("valid parenthetical pattern"));

/// Hyphens, dashes, plus signs and slashes with any surrounding spaces.
static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[-\u{2010}-\u{2015}+/]\s*").expect("valid separator pattern"));

/// Legal-entity designators stripped wherever they appear as a token.
/// Compared lowercase with periods already removed.
const LEGAL_DESIGNATORS: [&str; 22] = [
    "llc", "inc", "incorporated", "ltd", "limited", "plc", "pllc", "lp", "llp", "lc", "ag",
    "gmbh", "sa", "kg", "pvt", "bv", "nv", "ab", "pty", "spa", "corp", "corporation",
];

/// Token-level abbreviation expansions.
const ABBREVIATIONS: [(&str, &str); 3] = [
    ("mfg", "Manufacturing"),
    ("intl", "International"),
    ("mgmt", "Management"),
];

/// Result of normalizing a name, including whether the fallback kicked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedName {
    pub value: String,

    /// The name consisted only of legal designators; the unstripped form was kept
    pub suffix_only: bool,
}

/// Canonicalize an organization name for comparison.
///
/// Idempotent: `normalize_name(&normalize_name(x)) == normalize_name(x)`.
pub fn normalize_name(raw: &str) -> String {
    normalize_name_detailed(raw).value
}

/// Like [`normalize_name`], reporting when a suffix-only name was retained.
pub fn normalize_name_detailed(raw: &str) -> NormalizedName {
    let text = PARENTHETICAL.replace_all(raw, " ");
    let text = text.replace('&', " And ");
    let mut text = SEPARATOR.replace_all(&text, " ").into_owned();
    text.retain(|c| !matches!(c, '@' | '?' | '\'' | '\u{2019}' | ',' | '(' | ')' | '.'));

    let mut tokens: Vec<String> = text
        .split_whitespace()
        .filter(|token| !token.eq_ignore_ascii_case("dba"))
        .map(title_case)
        .map(expand_abbreviation)
        .collect();

    if tokens.last().is_some_and(|t| t == "Corp") {
        if let Some(last) = tokens.last_mut() {
            *last = "Corporation".to_string();
        }
    }

    let stripped = strip_designators(&tokens);
    let suffix_only = stripped.is_empty() && !tokens.is_empty();
    if !suffix_only {
        tokens = stripped;
    }

    if tokens.last().is_some_and(|t| t == "Co") {
        if let Some(last) = tokens.last_mut() {
            *last = "Company".to_string();
        }
    }

    NormalizedName {
        value: tokens.join(" "),
        suffix_only,
    }
}

/// Uppercase the first character of a token and lowercase the rest.
///
/// Only one uppercase character is kept when the first character expands
/// (`ß` to `SS`), so a second pass leaves the token unchanged.
pub fn title_case(token: &str) -> String {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    upper
        .next()
        .into_iter()
        .chain(upper.flat_map(char::to_lowercase))
        .chain(chars.flat_map(char::to_lowercase))
        .collect()
}

fn expand_abbreviation(token: String) -> String {
    let lower = token.to_lowercase();
    ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == lower)
        .map(|(_, full)| full.to_string())
        .unwrap_or(token)
}

fn is_designator(token: &str) -> bool {
    let lower = token.to_lowercase();
    LEGAL_DESIGNATORS.contains(&lower.as_str())
}

fn strip_designators(tokens: &[String]) -> Vec<String> {
    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        // "L L C" spelled out with spaces
        if i + 2 < tokens.len() && tokens[i] == "L" && tokens[i + 1] == "L" && tokens[i + 2] == "C" {
            i += 3;
            continue;
        }
        if !is_designator(&tokens[i]) {
            kept.push(tokens[i].clone());
        }
        i += 1;
    }
    kept
}
