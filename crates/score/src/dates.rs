//! Reference-date selection and year differences.

use chrono::NaiveDate;
use orglink_model::{parse_date, DateField, InputRecord, ParsedDate, ScoreIssue};

/// The date compared against a candidate's incorporation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceDate {
    /// Earliest patent filing date
    Filed(NaiveDate),
    /// Record date of a reassignment to the same organization
    Reassigned(NaiveDate),
}

impl ReferenceDate {
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Filed(date) | Self::Reassigned(date) => *date,
        }
    }
}

/// Signed years from `incorporated` to `reference`, rounded to three decimals.
pub fn date_diff_years(reference: NaiveDate, incorporated: NaiveDate, days_per_year: f64) -> f64 {
    let years = (reference - incorporated).num_days() as f64 / days_per_year;
    (years * 1000.0).round() / 1000.0
}

/// Parse a date field, recording a missing or malformed value.
pub(crate) fn read_date(
    raw: Option<&str>,
    field: DateField,
    issues: &mut Vec<ScoreIssue>,
) -> Option<NaiveDate> {
    match parse_date(raw) {
        ParsedDate::Valid(date) => Some(date),
        ParsedDate::Missing => {
            issues.push(ScoreIssue::MissingDate { field });
            None
        }
        ParsedDate::Malformed => {
            let value = raw.unwrap_or_default().to_string();
            tracing::warn!(field = field.as_str(), %value, "Malformed date");
            issues.push(ScoreIssue::MalformedDate { field, value });
            None
        }
    }
}

/// Pick the reference date for an input record.
///
/// When the filing date predates incorporation and the input carries a
/// reassignment whose assignee normalizes to the same organization, the
/// reassignment's record date is used instead. A missing or unreadable
/// record date then yields no reference date at all.
pub(crate) fn reference_date(
    input: &InputRecord,
    filed: Option<NaiveDate>,
    incorporated: Option<NaiveDate>,
    assignee_matches: bool,
    issues: &mut Vec<ScoreIssue>,
) -> Option<ReferenceDate> {
    let filed_first = matches!((filed, incorporated), (Some(f), Some(i)) if f < i);
    if filed_first && assignee_matches {
        return read_date(input.record_date.as_deref(), DateField::RecordDate, issues)
            .map(ReferenceDate::Reassigned);
    }
    filed.map(ReferenceDate::Filed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_diff_years() {
        assert_eq!(date_diff_years(ymd(2010, 1, 1), ymd(2005, 6, 1), 365.0), 4.589);
        assert_eq!(date_diff_years(ymd(2000, 1, 1), ymd(2005, 6, 1), 365.0), -5.419);
        assert_eq!(date_diff_years(ymd(2005, 6, 1), ymd(2005, 6, 1), 365.0), 0.0);
    }

    #[test]
    fn test_read_date_records_issues() {
        let mut issues = Vec::new();
        assert_eq!(read_date(None, DateField::DateFiledMin, &mut issues), None);
        assert_eq!(read_date(Some("13/45/2001"), DateField::IncorporationDate, &mut issues), None);
        assert_eq!(
            issues,
            vec![
                ScoreIssue::MissingDate { field: DateField::DateFiledMin },
                ScoreIssue::MalformedDate {
                    field: DateField::IncorporationDate,
                    value: "13/45/2001".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_reassignment_overrides_when_filed_first() {
        let input = InputRecord::new("1", "Acme").with_reassignment("Acme", "2007-03-01");
        let mut issues = Vec::new();
        let reference =
            reference_date(&input, Some(ymd(2000, 1, 1)), Some(ymd(2005, 6, 1)), true, &mut issues);
        assert_eq!(reference, Some(ReferenceDate::Reassigned(ymd(2007, 3, 1))));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_no_override_when_filed_after_incorporation() {
        let input = InputRecord::new("1", "Acme").with_reassignment("Acme", "2007-03-01");
        let mut issues = Vec::new();
        let reference =
            reference_date(&input, Some(ymd(2010, 1, 1)), Some(ymd(2005, 6, 1)), true, &mut issues);
        assert_eq!(reference, Some(ReferenceDate::Filed(ymd(2010, 1, 1))));
    }

    #[test]
    fn test_malformed_record_date_has_no_reference() {
        let input = InputRecord::new("1", "Acme").with_reassignment("Acme", "someday");
        let mut issues = Vec::new();
        let reference =
            reference_date(&input, Some(ymd(2000, 1, 1)), Some(ymd(2005, 6, 1)), true, &mut issues);
        assert_eq!(reference, None);
        assert!(matches!(
            issues.as_slice(),
            [ScoreIssue::MalformedDate { field: DateField::RecordDate, .. }]
        ));
    }

    #[test]
    fn test_missing_record_date_has_no_reference() {
        let mut input = InputRecord::new("1", "Acme");
        input.assignee = Some("Acme".to_string());
        let mut issues = Vec::new();
        let reference =
            reference_date(&input, Some(ymd(2000, 1, 1)), Some(ymd(2005, 6, 1)), true, &mut issues);
        assert_eq!(reference, None);
        assert_eq!(issues, vec![ScoreIssue::MissingDate { field: DateField::RecordDate }]);
    }
}
