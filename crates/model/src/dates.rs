//! Lenient date parsing for upstream date columns.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Outcome of reading an optional raw date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Missing,
    Malformed,
    Valid(NaiveDate),
}

impl ParsedDate {
    pub fn valid(self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(date),
            _ => None,
        }
    }
}

/// Parse a raw date value. Blank values and `nan`/`NaT`/`None` markers are missing.
pub fn parse_date(raw: Option<&str>) -> ParsedDate {
    let value = match raw.map(str::trim) {
        Some(v) if !is_null_marker(v) => v,
        _ => return ParsedDate::Missing,
    };

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return ParsedDate::Valid(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return ParsedDate::Valid(datetime.date());
        }
    }
    // ISO datetimes with an offset, e.g. 2004-03-01T00:00:00Z
    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(value) {
        return ParsedDate::Valid(datetime.date_naive());
    }

    ParsedDate::Malformed
}

/// Whether a raw cell holds one of the usual null spellings.
pub fn is_null_marker(value: &str) -> bool {
    let value = value.trim();
    value.is_empty()
        || ["nan", "nat", "none", "null"]
            .iter()
            .any(|marker| value.eq_ignore_ascii_case(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_formats() {
        assert_eq!(parse_date(Some("2010-01-01")), ParsedDate::Valid(ymd(2010, 1, 1)));
        assert_eq!(parse_date(Some("06/01/2005")), ParsedDate::Valid(ymd(2005, 6, 1)));
        assert_eq!(parse_date(Some("2005/06/01")), ParsedDate::Valid(ymd(2005, 6, 1)));
        assert_eq!(parse_date(Some("2004-03-01T00:00:00")), ParsedDate::Valid(ymd(2004, 3, 1)));
        assert_eq!(parse_date(Some("2004-03-01T00:00:00Z")), ParsedDate::Valid(ymd(2004, 3, 1)));
    }

    #[test]
    fn test_missing_and_malformed() {
        assert_eq!(parse_date(None), ParsedDate::Missing);
        assert_eq!(parse_date(Some("  ")), ParsedDate::Missing);
        assert_eq!(parse_date(Some("NaT")), ParsedDate::Missing);
        assert_eq!(parse_date(Some("yesterday")), ParsedDate::Malformed);
        assert_eq!(parse_date(Some("2010-13-45")), ParsedDate::Malformed);
    }
}
