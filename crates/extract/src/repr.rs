//! Scanning of Python-repr style containers.
//!
//! Registry exports store nested lists as their Python `repr`, e.g.
//! `[{'company_name': 'Acme Co', 'end_date': None}]`. Values holding an
//! apostrophe are double-quoted by the writer.

use once_cell::sync::Lazy;
use regex::Regex;

/// A flat `{...}` mapping with no nested braces.
static MAPPING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^{}]*\}").expect("valid mapping pattern"));

/// `'key': 'value'`, `'key': "value"`, `'key': None`.
static PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"['"]([A-Za-z_][A-Za-z0-9_]*)['"]\s*:\s*(?:'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)"|None|null|NaN|nan)"#,
    )
    .expect("valid pair pattern")
});

static QUOTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)""#).expect("valid quoted pattern")
});

/// Key/value pairs of one mapping, keys lower-cased.
pub(crate) fn pairs(text: &str) -> Vec<(String, Option<String>)> {
    PAIR.captures_iter(text)
        .map(|caps| {
            let key = caps[1].to_ascii_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3)).map(|m| unescape(m.as_str()));
            (key, value)
        })
        .collect()
}

/// Every flat mapping in the text that holds at least one pair.
pub(crate) fn mappings(text: &str) -> Vec<Vec<(String, Option<String>)>> {
    MAPPING
        .find_iter(text)
        .map(|m| pairs(m.as_str()))
        .filter(|pairs| !pairs.is_empty())
        .collect()
}

/// Quoted string literals, for plain `['A', 'B']` lists.
pub(crate) fn quoted_strings(text: &str) -> Vec<String> {
    QUOTED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| unescape(m.as_str()))
        .collect()
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pairs() {
        let found = pairs(r#"{'Company_Name': "O'Brien Tool", 'end_date': None, 'type': 'trading'}"#);
        assert_eq!(
            found,
            vec![
                ("company_name".to_string(), Some("O'Brien Tool".to_string())),
                ("end_date".to_string(), None),
                ("type".to_string(), Some("trading".to_string())),
            ]
        );
    }

    #[test]
    fn test_escaped_quote() {
        let found = pairs(r"{'name': 'Macy\'s'}");
        assert_eq!(found[0].1.as_deref(), Some("Macy's"));
    }

    #[test]
    fn test_mappings_skip_empty() {
        assert_eq!(mappings("[{}, {'a': 'b'}]").len(), 1);
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(quoted_strings("['Acme Co', \"Bob's\"]"), vec!["Acme Co", "Bob's"]);
    }
}
